//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestApiServer`: Local fake of the ADSMedia HTTP API (wiremock)
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use test_utils::{TestApiServer, TestDataBuilder, TEST_API_KEY};
//!
//! #[tokio::test]
//! async fn my_api_test() {
//!     let server = TestApiServer::start().await;
//!     let builder = TestDataBuilder::from_test_name("my_api_test");
//!
//!     server.mount_success("GET", "/ping", json!({"status": "ok"})).await;
//!     let recipient = builder.email("main");
//! }
//! ```

mod api_server;

pub use api_server::{TEST_API_KEY, TestApiServer, bearer, failure, success};

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving all values from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_send_email");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a recipient address unique to this test
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.email("main"), "test-7-main@example.com");
    /// ```
    pub fn email(&self, label: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, label)
    }

    /// Generate a provider-style message id
    pub fn message_id(&self, label: &str) -> String {
        format!("msg-{:x}-{}", self.seed, label)
    }

    /// Generate a unique name for testing
    ///
    /// * `prefix` - The kind of value (e.g., "subject", "sender")
    /// * `suffix` - A unique identifier within the test (e.g., "main", "backup")
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `text` contains `needle` with a readable failure message
    pub fn assert_contains(text: &str, needle: &str) {
        assert!(
            text.contains(needle),
            "expected {:?} to contain {:?}",
            text,
            needle
        );
    }
}
