//! Email backend for application mailers.
//!
//! Takes the framework-neutral [`OutgoingMessage`] an application builds and
//! delivers it with one `send` per recipient.

use crate::client::{AdsMediaClient, EmailApi};
use crate::config::{API_KEY_ENV, FROM_NAME_ENV, resolve_api_key};
use crate::error::AdsMediaResult;
use crate::models::EmailMessage;
use core_config::env_optional;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sender name used when neither settings nor environment provide one.
pub const DEFAULT_FROM_NAME: &str = "ADSMedia";

const HTML_MIME: &str = "text/html";

/// Alternative body attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub content: String,
    pub mime_type: String,
}

/// A message as composed by the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub subject: String,
    /// Main body; HTML unless an HTML alternative is attached.
    pub body: String,
    pub to: Vec<String>,
    pub reply_to: Vec<String>,
    pub alternatives: Vec<Alternative>,
}

impl OutgoingMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            to,
            ..Default::default()
        }
    }

    pub fn with_reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to.push(address.into());
        self
    }

    pub fn attach_alternative(
        mut self,
        content: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        self.alternatives.push(Alternative {
            content: content.into(),
            mime_type: mime_type.into(),
        });
        self
    }

    /// First HTML alternative, or the body itself.
    fn html(&self) -> &str {
        self.alternatives
            .iter()
            .find(|alt| alt.mime_type.eq_ignore_ascii_case(HTML_MIME))
            .map(|alt| alt.content.as_str())
            .unwrap_or(&self.body)
    }

    /// Converts to one API message per recipient.
    fn to_api_messages(&self, from_name: &str) -> Vec<EmailMessage> {
        let html = self.html();
        // Plain body only goes out as text when an HTML alternative replaced it
        let text = (html != self.body).then(|| self.body.clone());

        self.to
            .iter()
            .map(|recipient| {
                let mut message = EmailMessage::new(recipient.clone(), self.subject.clone(), html)
                    .with_from_name(from_name);
                if let Some(text) = &text {
                    message = message.with_text(text.clone());
                }
                if let Some(reply_to) = self.reply_to.first() {
                    message = message.with_reply_to(reply_to.clone());
                }
                message
            })
            .collect()
    }
}

/// Settings read from the application's configuration.
#[derive(Debug, Clone, Default)]
pub struct BackendSettings {
    pub api_key: Option<String>,
    pub from_name: Option<String>,
    /// Record failures in the report instead of returning the first one.
    pub fail_silently: bool,
}

/// A recipient that could not be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub recipient: String,
    pub error: String,
}

/// Outcome of [`EmailBackend::send_messages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Number of recipients the API accepted.
    pub sent: usize,
    pub message_ids: Vec<String>,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delivers [`OutgoingMessage`]s through an [`EmailApi`].
pub struct EmailBackend<C: EmailApi> {
    client: Arc<C>,
    from_name: String,
    fail_silently: bool,
}

impl EmailBackend<AdsMediaClient> {
    /// Build a backend with its own client.
    ///
    /// API key precedence: `settings.api_key`, then `ADSMEDIA_API_KEY`.
    /// Sender name precedence: `settings.from_name`, `ADSMEDIA_FROM_NAME`,
    /// then [`DEFAULT_FROM_NAME`].
    pub fn from_settings(settings: BackendSettings) -> AdsMediaResult<Self> {
        let api_key = resolve_api_key([settings.api_key.clone(), env_optional(API_KEY_ENV)])?;
        let client = AdsMediaClient::new(api_key)?;
        Ok(Self::with_client(Arc::new(client), settings))
    }
}

impl<C: EmailApi> EmailBackend<C> {
    /// Build a backend around an existing client.
    pub fn with_client(client: Arc<C>, settings: BackendSettings) -> Self {
        let from_name = settings
            .from_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| env_optional(FROM_NAME_ENV))
            .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());

        Self {
            client,
            from_name,
            fail_silently: settings.fail_silently,
        }
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    /// Send every message to every one of its recipients.
    ///
    /// Without `fail_silently` the first failure is returned. With it,
    /// failures are logged, recorded in the report, and sending continues.
    pub async fn send_messages(
        &self,
        messages: &[OutgoingMessage],
    ) -> AdsMediaResult<DeliveryReport> {
        let mut report = DeliveryReport::default();

        for outgoing in messages {
            for message in outgoing.to_api_messages(&self.from_name) {
                match self.client.send(&message).await {
                    Ok(receipt) => {
                        report.sent += 1;
                        report.message_ids.push(receipt.message_id);
                    }
                    Err(e) if self.fail_silently => {
                        warn!(recipient = %message.to, error = %e, "Dropping failed email");
                        report.failures.push(DeliveryFailure {
                            recipient: message.to.clone(),
                            error: e.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if report.is_complete() {
            debug!(sent = report.sent, "All messages delivered");
        } else {
            info!(
                sent = report.sent,
                failed = report.failures.len(),
                "Messages delivered with failures"
            );
        }

        Ok(report)
    }
}
