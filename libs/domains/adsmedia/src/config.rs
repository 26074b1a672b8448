//! Client configuration and API key resolution.

use crate::error::{AdsMediaError, AdsMediaResult};
use core_config::{ConfigError, FromEnv, env_optional, env_parse};
use std::fmt;
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.adsmedia.live/v1";

/// Timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_ENV: &str = "ADSMEDIA_API_KEY";
pub const BASE_URL_ENV: &str = "ADSMEDIA_BASE_URL";
pub const TIMEOUT_ENV: &str = "ADSMEDIA_TIMEOUT_SECS";
pub const FROM_NAME_ENV: &str = "ADSMEDIA_FROM_NAME";

/// Settings for [`AdsMediaClient`](crate::AdsMediaClient).
#[derive(Clone)]
pub struct AdsMediaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl AdsMediaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The API key never shows up in logs or panics
impl fmt::Debug for AdsMediaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdsMediaConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FromEnv for AdsMediaConfig {
    /// Reads from environment variables:
    /// - ADSMEDIA_API_KEY: required
    /// - ADSMEDIA_BASE_URL: defaults to [`DEFAULT_BASE_URL`]
    /// - ADSMEDIA_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_optional(API_KEY_ENV)
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_ENV.to_string()))?;
        let base_url = env_optional(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = env_parse::<u64>(TIMEOUT_ENV)?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }
}

/// Picks the first non-blank API key from `candidates`, in order.
///
/// Each host surface passes its own precedence (explicit setting, framework
/// settings, environment, credential store). All of them fail the same way
/// when nothing is found.
pub fn resolve_api_key<I>(candidates: I) -> AdsMediaResult<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| AdsMediaError::Configuration(format!("{} not configured", API_KEY_ENV)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                (API_KEY_ENV, Some("key-123")),
                (BASE_URL_ENV, None),
                (TIMEOUT_ENV, None),
            ],
            || {
                let config = AdsMediaConfig::from_env().unwrap();
                assert_eq!(config.api_key, "key-123");
                assert_eq!(config.base_url, DEFAULT_BASE_URL);
                assert_eq!(config.timeout, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                (API_KEY_ENV, Some("key-123")),
                (BASE_URL_ENV, Some("http://localhost:9999/v1")),
                (TIMEOUT_ENV, Some("5")),
            ],
            || {
                let config = AdsMediaConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://localhost:9999/v1");
                assert_eq!(config.timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_from_env_missing_or_blank_key() {
        temp_env::with_var_unset(API_KEY_ENV, || {
            assert!(matches!(
                AdsMediaConfig::from_env(),
                Err(ConfigError::MissingEnvVar(ref key)) if key == API_KEY_ENV
            ));
        });

        temp_env::with_var(API_KEY_ENV, Some("  "), || {
            assert!(AdsMediaConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", AdsMediaConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        let key = resolve_api_key([None, Some("   ".to_string()), Some("second".to_string())]);
        assert_eq!(key.unwrap(), "second");

        let key = resolve_api_key([Some("first".to_string()), Some("second".to_string())]);
        assert_eq!(key.unwrap(), "first");
    }

    #[test]
    fn test_resolve_api_key_none_found() {
        let err = resolve_api_key([None, Some(String::new())]).unwrap_err();
        assert!(matches!(
            err,
            AdsMediaError::Configuration(ref m) if m == "ADSMEDIA_API_KEY not configured"
        ));
    }
}
