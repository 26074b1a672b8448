//! HTTP client for the ADSMedia email API.

use crate::config::AdsMediaConfig;
use crate::envelope;
use crate::error::{AdsMediaError, AdsMediaResult};
use crate::models::{
    BatchEmailRequest, BatchSummary, EmailMessage, SendReceipt, StatusLookup, SuppressionStatus,
};
use async_trait::async_trait;
use core_config::FromEnv;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use validator::{Validate, ValidateEmail};

/// Operations every host adapter relies on.
///
/// Adapters take this trait rather than [`AdsMediaClient`] so tests can
/// substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailApi: Send + Sync {
    /// Send one email, returning the provider message id.
    async fn send(&self, message: &EmailMessage) -> AdsMediaResult<SendReceipt>;

    /// Send one template to many recipients.
    async fn send_batch(&self, batch: &BatchEmailRequest) -> AdsMediaResult<BatchSummary>;

    /// Check whether an address is on the suppression list.
    async fn check_suppression(&self, email: &str) -> AdsMediaResult<SuppressionStatus>;

    /// Test connectivity and credentials.
    async fn ping(&self) -> AdsMediaResult<Value>;

    /// Account usage statistics.
    async fn get_usage(&self) -> AdsMediaResult<Value>;

    /// Delivery status of a previous send.
    async fn get_status(&self, lookup: &StatusLookup) -> AdsMediaResult<Value>;

    /// Account details.
    async fn get_account(&self) -> AdsMediaResult<Value>;
}

/// reqwest-backed [`EmailApi`].
///
/// Every call is a single attempt; retrying is left to the caller.
#[derive(Clone)]
pub struct AdsMediaClient {
    config: AdsMediaConfig,
    client: Client,
}

impl AdsMediaClient {
    /// Create a client for the production endpoint.
    pub fn new(api_key: impl Into<String>) -> AdsMediaResult<Self> {
        Self::from_config(AdsMediaConfig::new(api_key))
    }

    /// Create a client from explicit settings.
    pub fn from_config(mut config: AdsMediaConfig) -> AdsMediaResult<Self> {
        config.api_key = config.api_key.trim().to_string();
        if config.api_key.is_empty() {
            return Err(AdsMediaError::Configuration(
                "ADSMEDIA_API_KEY not configured".to_string(),
            ));
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let client = Self::build_http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Create a client from `ADSMEDIA_*` environment variables.
    pub fn from_env() -> AdsMediaResult<Self> {
        Self::from_config(AdsMediaConfig::from_env()?)
    }

    /// Point the client at another deployment (or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> AdsMediaResult<Self> {
        self.client = Self::build_http_client(timeout)?;
        self.config.timeout = timeout;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    fn build_http_client(timeout: Duration) -> AdsMediaResult<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("adsmedia-rust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AdsMediaError::Configuration(format!("failed to build HTTP client: {}", e))
            })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.config.base_url, path))
            .bearer_auth(&self.config.api_key)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> AdsMediaResult<Value> {
        debug!(path, "Calling ADSMedia API");
        let builder = self.request(Method::GET, path);
        let builder = if query.is_empty() { builder } else { builder.query(query) };
        self.execute(path, builder).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> AdsMediaResult<Value> {
        debug!(path, "Calling ADSMedia API");
        // .json() also sets Content-Type: application/json
        let builder = self.request(Method::POST, path).json(body);
        self.execute(path, builder).await
    }

    async fn execute(&self, path: &str, builder: RequestBuilder) -> AdsMediaResult<Value> {
        let response = builder.send().await.inspect_err(|e| {
            warn!(path, error = %e, timeout = e.is_timeout(), "ADSMedia request failed");
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        envelope::decode(status, &body).inspect_err(|e| {
            warn!(path, status, error = %e, "ADSMedia API returned an error");
        })
    }
}

#[async_trait]
impl EmailApi for AdsMediaClient {
    async fn send(&self, message: &EmailMessage) -> AdsMediaResult<SendReceipt> {
        message.validate()?;

        debug!(
            to = %message.to,
            subject = %message.subject,
            has_text = message.text.is_some(),
            has_reply_to = message.reply_to.is_some(),
            "Sending email via ADSMedia"
        );

        let data = self.post("/send", message).await?;
        let receipt: SendReceipt = envelope::payload(data)?;

        info!(to = %message.to, message_id = %receipt.message_id, "Email accepted by ADSMedia");
        Ok(receipt)
    }

    async fn send_batch(&self, batch: &BatchEmailRequest) -> AdsMediaResult<BatchSummary> {
        batch.validate()?;

        debug!(
            recipients = batch.recipients.len(),
            subject = %batch.subject,
            "Sending batch via ADSMedia"
        );

        let data = self.post("/send/batch", batch).await?;
        let summary: BatchSummary = envelope::payload(data)?;

        info!(
            recipients = batch.recipients.len(),
            task_id = ?summary.task_id,
            queued = ?summary.queued,
            "Batch accepted by ADSMedia"
        );
        Ok(summary)
    }

    async fn check_suppression(&self, email: &str) -> AdsMediaResult<SuppressionStatus> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AdsMediaError::Validation("email is required".to_string()));
        }
        if !email.validate_email() {
            return Err(AdsMediaError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        let data = self
            .get("/suppressions/check", &[("email", email.to_string())])
            .await?;
        let status: SuppressionStatus = envelope::payload(data)?;

        debug!(
            email,
            suppressed = status.suppressed,
            reason = ?status.reason,
            "Suppression checked"
        );
        Ok(status)
    }

    async fn ping(&self) -> AdsMediaResult<Value> {
        self.get("/ping", &[]).await
    }

    async fn get_usage(&self) -> AdsMediaResult<Value> {
        self.get("/account/usage", &[]).await
    }

    async fn get_status(&self, lookup: &StatusLookup) -> AdsMediaResult<Value> {
        let (key, value) = lookup.query_pair();
        self.get("/send/status", &[(key, value)]).await
    }

    async fn get_account(&self) -> AdsMediaResult<Value> {
        self.get("/account", &[]).await
    }
}
