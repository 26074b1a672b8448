//! Fake ADSMedia API backed by wiremock.

use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bearer token every helper expects unless told otherwise.
pub const TEST_API_KEY: &str = "test-api-key";

/// A local HTTP server speaking the `{success, data | error}` envelope.
///
/// The server shuts down when dropped. Expectations set with
/// [`Mock::expect`] are verified at drop time.
///
/// # Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use test_utils::TestApiServer;
///
/// # async fn example() {
/// let server = TestApiServer::start().await;
/// server.mount_success("POST", "/send", json!({"message_id": "m1"})).await;
/// let base_url = server.base_url();
/// # }
/// ```
pub struct TestApiServer {
    server: MockServer,
}

impl TestApiServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        tracing::debug!(uri = %server.uri(), "Started fake ADSMedia API");
        Self { server }
    }

    /// Base URL to hand to the client under test.
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Underlying server, for mounting custom [`Mock`]s.
    pub fn mock_server(&self) -> &MockServer {
        &self.server
    }

    /// Answer `method path` (authenticated with [`TEST_API_KEY`]) with a success envelope.
    pub async fn mount_success(&self, http_method: &str, route: &str, data: Value) {
        Mock::given(method(http_method))
            .and(path(route))
            .and(header("authorization", bearer(TEST_API_KEY).as_str()))
            .respond_with(success(data))
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` with a failure envelope and the given HTTP status.
    pub async fn mount_failure(&self, http_method: &str, route: &str, status: u16, message: &str) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(failure(status, message))
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` with a success envelope after `delay`.
    pub async fn mount_delayed(&self, http_method: &str, route: &str, delay: Duration) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(success(json!({})).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Fail the test at drop time if any request reaches the server.
    pub async fn expect_no_requests(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Requests received so far.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// `Authorization` header value for `api_key`.
pub fn bearer(api_key: &str) -> String {
    format!("Bearer {}", api_key)
}

/// 200 response carrying `{"success": true, "data": data}`.
pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

/// Response carrying `{"success": false, "error": {"message": message}}`.
pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_json(json!({"success": false, "error": {"message": message}}))
}
