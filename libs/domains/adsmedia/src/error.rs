//! Error types for the ADSMedia client and its adapters.

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for ADSMedia operations.
pub type AdsMediaResult<T> = Result<T, AdsMediaError>;

/// Errors that can occur while talking to the ADSMedia API.
#[derive(Debug, Error)]
pub enum AdsMediaError {
    /// API key (or other client setting) missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Network failure, timeout, or a response body that could not be decoded.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with `success: false`.
    #[error("ADSMedia API error: {message}")]
    Api {
        message: String,
        /// HTTP status of the failed response, when one was received.
        status: Option<u16>,
    },
}

impl AdsMediaError {
    pub fn api(message: impl Into<String>, status: Option<u16>) -> Self {
        AdsMediaError::Api {
            message: message.into(),
            status,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            AdsMediaError::Configuration(msg)
            | AdsMediaError::Validation(msg)
            | AdsMediaError::Transport(msg) => msg,
            AdsMediaError::Api { message, .. } => message,
        }
    }
}

impl From<reqwest::Error> for AdsMediaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdsMediaError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            AdsMediaError::Transport(format!("connection failed: {}", err))
        } else {
            AdsMediaError::Transport(err.to_string())
        }
    }
}

impl From<ValidationErrors> for AdsMediaError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
                format!("{} ({})", field, codes.join(", "))
            })
            .collect();

        // Nested (batch recipient) errors are not part of field_errors()
        if fields.is_empty() {
            return AdsMediaError::Validation(errors.to_string());
        }

        fields.sort();
        AdsMediaError::Validation(format!("invalid fields: {}", fields.join("; ")))
    }
}

impl From<ConfigError> for AdsMediaError {
    fn from(err: ConfigError) -> Self {
        AdsMediaError::Configuration(err.to_string())
    }
}

/// Convert AdsMediaError to AppError for standardized error responses
impl From<AdsMediaError> for AppError {
    fn from(err: AdsMediaError) -> Self {
        match err {
            AdsMediaError::Validation(msg) => AppError::BadRequest(msg),
            AdsMediaError::Configuration(msg) => AppError::InternalServerError(msg),
            AdsMediaError::Transport(msg) => AppError::ServiceUnavailable(msg),
            AdsMediaError::Api { message, .. } => AppError::BadGateway(message),
        }
    }
}

impl IntoResponse for AdsMediaError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
