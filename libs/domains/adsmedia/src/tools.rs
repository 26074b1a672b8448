//! Tool surface for plugin hosts.
//!
//! A host invokes a tool by name with its credential store and a map of
//! parameters; the tool answers with a human-readable text message. Tools
//! never return errors to the host: every failure becomes an `Error:` text.
//! A fresh client is built on every invocation from the host's credentials.

use crate::client::{AdsMediaClient, EmailApi};
use crate::config::{DEFAULT_BASE_URL, resolve_api_key};
use crate::error::AdsMediaResult;
use crate::models::EmailMessage;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Credential store key holding the bearer token.
pub const API_KEY_CREDENTIAL: &str = "api_key";

/// Parameters passed by the host.
pub type ToolParameters = Map<String, Value>;

/// What the host hands each invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolRuntime {
    pub credentials: HashMap<String, String>,
}

impl ToolRuntime {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert(API_KEY_CREDENTIAL.to_string(), api_key.into());
        Self { credentials }
    }

    fn api_key(&self) -> AdsMediaResult<String> {
        resolve_api_key([self.credentials.get(API_KEY_CREDENTIAL).cloned()])
    }
}

/// Text answer returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMessage {
    pub text: String,
}

impl ToolMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    fn error(message: impl std::fmt::Display) -> Self {
        Self::text(format!("❌ Error: {}", message))
    }
}

/// An invokable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Identifier the host invokes the tool by.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Names of the parameters the tool reads, required ones first.
    fn parameters(&self) -> &'static [&'static str];

    async fn invoke(&self, runtime: &ToolRuntime, params: &ToolParameters) -> ToolMessage;
}

/// Reads a string parameter, treating blank values as missing.
fn string_param<'a>(params: &'a ToolParameters, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn build_client(runtime: &ToolRuntime, base_url: &str) -> Result<AdsMediaClient, ToolMessage> {
    let api_key = runtime
        .api_key()
        .map_err(|_| ToolMessage::text("Error: API key not configured"))?;

    AdsMediaClient::new(api_key)
        .map(|client| client.with_base_url(base_url))
        .map_err(ToolMessage::error)
}

/// Sends one email.
#[derive(Debug, Clone)]
pub struct SendEmailTool {
    base_url: String,
}

impl SendEmailTool {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for SendEmailTool {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl Tool for SendEmailTool {
    fn name(&self) -> &'static str {
        "send_email"
    }

    fn description(&self) -> &'static str {
        "Send a transactional email through ADSMedia"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["to", "subject", "html", "to_name", "from_name"]
    }

    async fn invoke(&self, runtime: &ToolRuntime, params: &ToolParameters) -> ToolMessage {
        let client = match build_client(runtime, &self.base_url) {
            Ok(client) => client,
            Err(message) => return message,
        };

        let (Some(to), Some(subject), Some(html)) = (
            string_param(params, "to"),
            string_param(params, "subject"),
            string_param(params, "html"),
        ) else {
            return ToolMessage::text("Error: to, subject, and html are required");
        };

        let mut message = EmailMessage::new(to, subject, html);
        if let Some(to_name) = string_param(params, "to_name") {
            message = message.with_to_name(to_name);
        }
        if let Some(from_name) = string_param(params, "from_name") {
            message = message.with_from_name(from_name);
        }

        debug!(tool = self.name(), to, "Invoking tool");

        match client.send(&message).await {
            Ok(receipt) => ToolMessage::text(format!(
                "✅ Email sent successfully!\nTo: {}\nSubject: {}\nMessage ID: {}",
                to, subject, receipt.message_id
            )),
            Err(e) => {
                warn!(tool = self.name(), error = %e, "Tool invocation failed");
                ToolMessage::error(e.message())
            }
        }
    }
}

/// Reports whether an address is suppressed.
#[derive(Debug, Clone)]
pub struct CheckSuppressionTool {
    base_url: String,
}

impl CheckSuppressionTool {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for CheckSuppressionTool {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl Tool for CheckSuppressionTool {
    fn name(&self) -> &'static str {
        "check_suppression"
    }

    fn description(&self) -> &'static str {
        "Check whether an email address is on the suppression list"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["email"]
    }

    async fn invoke(&self, runtime: &ToolRuntime, params: &ToolParameters) -> ToolMessage {
        let client = match build_client(runtime, &self.base_url) {
            Ok(client) => client,
            Err(message) => return message,
        };

        let Some(email) = string_param(params, "email") else {
            return ToolMessage::text("Error: email is required");
        };

        debug!(tool = self.name(), email, "Invoking tool");

        match client.check_suppression(email).await {
            Ok(status) if status.suppressed => ToolMessage::text(format!(
                "⚠️ Email SUPPRESSED\nEmail: {}\nReason: {}",
                email,
                status.reason.as_deref().unwrap_or("Unknown")
            )),
            Ok(_) => ToolMessage::text(format!(
                "✅ Email OK\nEmail {} is NOT suppressed - safe to send!",
                email
            )),
            Err(e) => {
                warn!(tool = self.name(), error = %e, "Tool invocation failed");
                ToolMessage::error(e.message())
            }
        }
    }
}

/// All tools, pointed at `base_url`.
pub fn registry(base_url: &str) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(SendEmailTool::with_base_url(base_url)),
        Box::new(CheckSuppressionTool::with_base_url(base_url)),
    ]
}

/// Looks a tool up by name.
pub fn find_tool(base_url: &str, name: &str) -> Option<Box<dyn Tool>> {
    registry(base_url).into_iter().find(|tool| tool.name() == name)
}
