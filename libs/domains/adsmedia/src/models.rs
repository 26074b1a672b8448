//! Request and response types for the ADSMedia API.
//!
//! Request types serialize straight into the wire format. Optional fields that
//! are unset or blank are skipped, so the API never receives `null` or `""`
//! placeholders.

use crate::error::AdsMediaError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() { None } else { Some(value) }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_blank))
}

/// Body format of a single email (`type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    HtmlAndText = 1,
    HtmlOnly = 2,
    TextOnly = 3,
}

impl TryFrom<u8> for ContentType {
    type Error = AdsMediaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ContentType::HtmlAndText),
            2 => Ok(ContentType::HtmlOnly),
            3 => Ok(ContentType::TextOnly),
            other => Err(AdsMediaError::Validation(format!(
                "unknown content type {}, expected 1, 2 or 3",
                other
            ))),
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        ContentType::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// A single transactional email (`POST /send`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmailMessage {
    /// Recipient address
    #[validate(email(message = "must be a valid email address"))]
    pub to: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub html: String,
    /// Recipient display name
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub to_name: Option<String>,
    /// Sender display name
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub from_name: Option<String>,
    /// Plain-text alternative body
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    #[validate(email(message = "must be a valid email address"))]
    pub reply_to: Option<String>,
    /// 1 = HTML + text, 2 = HTML only, 3 = text only
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<u8>)]
    pub content_type: Option<ContentType>,
    /// Sending server to route through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<u64>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub unsubscribe_url: Option<String>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn with_to_name(mut self, name: impl Into<String>) -> Self {
        self.to_name = non_blank(name);
        self
    }

    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = non_blank(name);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = non_blank(text);
        self
    }

    pub fn with_reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = non_blank(address);
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_server_id(mut self, server_id: u64) -> Self {
        self.server_id = Some(server_id);
        self
    }

    pub fn with_unsubscribe_url(mut self, url: impl Into<String>) -> Self {
        self.unsubscribe_url = non_blank(url);
        self
    }
}

/// One recipient of a batch send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BatchRecipient {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub name: Option<String>,
}

impl BatchRecipient {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: non_blank(name),
        }
    }
}

/// One template delivered to many recipients (`POST /send/batch`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BatchEmailRequest {
    /// Delivery order follows this list
    #[validate(length(min = 1, message = "at least one recipient is required"), nested)]
    pub recipients: Vec<BatchRecipient>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub html: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub text: Option<String>,
    /// Inbox preview line
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub preheader: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "is_blank")]
    pub from_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<u64>,
}

impl BatchEmailRequest {
    pub fn new(
        recipients: Vec<BatchRecipient>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            recipients,
            subject: subject.into(),
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = non_blank(text);
        self
    }

    pub fn with_preheader(mut self, preheader: impl Into<String>) -> Self {
        self.preheader = non_blank(preheader);
        self
    }

    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = non_blank(name);
        self
    }

    pub fn with_server_id(mut self, server_id: u64) -> Self {
        self.server_id = Some(server_id);
        self
    }
}

/// Accepted single send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendReceipt {
    #[serde(alias = "messageId")]
    pub message_id: String,
    #[serde(default, alias = "sendId", skip_serializing_if = "Option::is_none")]
    pub send_id: Option<u64>,
}

/// Accepted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchSummary {
    #[serde(default, alias = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    /// Number of recipients queued for delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queued: Option<u64>,
}

/// Suppression state of one address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuppressionStatus {
    #[serde(default)]
    pub suppressed: bool,
    /// e.g. "bounced", "unsubscribed", "complaint"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Query for `GET /check`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct SuppressionQuery {
    /// Address to look up
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// How to find a previously sent email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLookup {
    MessageId(String),
    SendId(u64),
}

impl StatusLookup {
    pub(crate) fn query_pair(&self) -> (&'static str, String) {
        match self {
            StatusLookup::MessageId(id) => ("message_id", id.clone()),
            StatusLookup::SendId(id) => ("id", id.to_string()),
        }
    }
}

/// Query for `GET /status`; exactly one key must be given.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
pub struct StatusQuery {
    /// Provider message id returned by a send
    pub message_id: Option<String>,
    /// Numeric send id returned by a send
    pub id: Option<u64>,
}

impl TryFrom<StatusQuery> for StatusLookup {
    type Error = AdsMediaError;

    fn try_from(query: StatusQuery) -> Result<Self, Self::Error> {
        match (non_blank(query.message_id.unwrap_or_default()), query.id) {
            (Some(message_id), None) => Ok(StatusLookup::MessageId(message_id)),
            (None, Some(id)) => Ok(StatusLookup::SendId(id)),
            (Some(_), Some(_)) => Err(AdsMediaError::Validation(
                "pass either message_id or id, not both".to_string(),
            )),
            (None, None) => Err(AdsMediaError::Validation(
                "message_id or id is required".to_string(),
            )),
        }
    }
}
