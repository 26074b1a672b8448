//! Decoding of the `{success, data | error}` wrapper around every response.

use crate::error::{AdsMediaError, AdsMediaResult};
use serde_json::{Map, Value};

/// Message used when a failed envelope carries no readable error.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Turns a raw response body into the `data` payload or an error.
///
/// `status` is the HTTP status of the response and is only used for error
/// reporting. The `success` flag alone decides the outcome, and anything
/// other than a literal `true` counts as failure.
pub fn decode(status: u16, body: &[u8]) -> AdsMediaResult<Value> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        AdsMediaError::Transport(format!("unreadable response (HTTP {}): {}", status, e))
    })?;

    let Value::Object(mut envelope) = value else {
        return Err(AdsMediaError::Transport(format!(
            "unreadable response (HTTP {}): expected a JSON object",
            status
        )));
    };

    let success = envelope.get("success").and_then(Value::as_bool).unwrap_or(false);

    if success {
        return Ok(match envelope.remove("data") {
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(data) => data,
        });
    }

    Err(AdsMediaError::api(
        error_message(envelope.get("error")),
        Some(status),
    ))
}

/// Extracts a readable message from the `error` member.
fn error_message(error: Option<&Value>) -> String {
    let message = match error {
        Some(Value::String(message)) => Some(message.as_str()),
        Some(Value::Object(details)) => details.get("message").and_then(Value::as_str),
        _ => None,
    };

    message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}

/// Decodes a successful payload into a typed result.
pub fn payload<T: serde::de::DeserializeOwned>(data: Value) -> AdsMediaResult<T> {
    serde_json::from_value(data)
        .map_err(|e| AdsMediaError::Transport(format!("unexpected response payload: {}", e)))
}
