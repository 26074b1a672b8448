//! Client tests against a local fake of the ADSMedia API
//!
//! These tests exercise the real reqwest client end to end:
//! - Wire format of every request (method, path, headers, body)
//! - Envelope decoding for success and failure
//! - Transport failures and timeouts
//! - Local validation that never reaches the network

use domain_adsmedia::*;
use serde_json::json;
use std::time::Duration;
use test_utils::assertions::assert_some;
use test_utils::{TEST_API_KEY, TestApiServer, TestDataBuilder, bearer, failure, success};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::Mock;

fn client_for(server: &TestApiServer) -> AdsMediaClient {
    AdsMediaClient::new(TEST_API_KEY)
        .unwrap()
        .with_base_url(server.base_url())
}

// ============================================================================
// Send
// ============================================================================

#[tokio::test]
async fn test_send_posts_exact_body_with_bearer_token() {
    let server = TestApiServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .and(header("authorization", bearer(TEST_API_KEY).as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "to": "a@x.com",
            "subject": "Hi",
            "html": "<p>hi</p>",
            "to_name": "Ann"
        })))
        .respond_with(success(json!({"message_id": "m1", "send_id": 42})))
        .expect(1)
        .mount(server.mock_server())
        .await;

    let message = EmailMessage::new("a@x.com", "Hi", "<p>hi</p>").with_to_name("Ann");
    let receipt = client_for(&server).send(&message).await.unwrap();

    assert_eq!(receipt.message_id, "m1");
    assert_eq!(assert_some(receipt.send_id, "send_id"), 42);
}

#[tokio::test]
async fn test_send_includes_optional_fields_on_the_wire() {
    let server = TestApiServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .and(body_json(json!({
            "to": "a@x.com",
            "subject": "Hi",
            "html": "<p>hi</p>",
            "from_name": "Shop",
            "text": "hi",
            "reply_to": "help@x.com",
            "type": 1,
            "server_id": 7,
            "unsubscribe_url": "https://x.com/u"
        })))
        .respond_with(success(json!({"message_id": "m2"})))
        .expect(1)
        .mount(server.mock_server())
        .await;

    let message = EmailMessage::new("a@x.com", "Hi", "<p>hi</p>")
        .with_to_name("  ")
        .with_from_name("Shop")
        .with_text("hi")
        .with_reply_to("help@x.com")
        .with_content_type(ContentType::HtmlAndText)
        .with_server_id(7)
        .with_unsubscribe_url("https://x.com/u");

    let receipt = client_for(&server).send(&message).await.unwrap();
    assert_eq!(receipt.message_id, "m2");
}

#[tokio::test]
async fn test_send_invalid_message_never_reaches_network() {
    let server = TestApiServer::start().await;
    server.expect_no_requests().await;
    let client = client_for(&server);

    let err = client
        .send(&EmailMessage::new("not-an-email", "Hi", "<p>hi</p>"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdsMediaError::Validation(ref m) if m.contains("to")));

    let err = client
        .send(&EmailMessage::new("a@x.com", "", "<p>hi</p>"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdsMediaError::Validation(ref m) if m.contains("subject")));
}

#[tokio::test]
async fn test_rate_limited_send_is_api_error() {
    let server = TestApiServer::start().await;
    server.mount_failure("POST", "/send", 429, "rate limited").await;

    let err = client_for(&server)
        .send(&EmailMessage::new("a@x.com", "Hi", "<p>hi</p>"))
        .await
        .unwrap_err();

    match err {
        AdsMediaError::Api { message, status } => {
            assert_eq!(message, "rate limited");
            assert_eq!(status, Some(429));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_without_message_uses_unknown_error() {
    let server = TestApiServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(
            wiremock::ResponseTemplate::new(401).set_body_json(json!({"success": false})),
        )
        .mount(server.mock_server())
        .await;

    let err = client_for(&server).ping().await.unwrap_err();
    assert_eq!(err.message(), envelope::UNKNOWN_ERROR);
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let server = TestApiServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/usage"))
        .respond_with(wiremock::ResponseTemplate::new(502).set_body_string("<html>oops</html>"))
        .mount(server.mock_server())
        .await;

    let err = client_for(&server).get_usage().await.unwrap_err();
    assert!(matches!(err, AdsMediaError::Transport(_)));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = TestApiServer::start().await;
    server
        .mount_delayed("GET", "/ping", Duration::from_secs(2))
        .await;

    let client = client_for(&server)
        .with_timeout(Duration::from_millis(100))
        .unwrap();

    let err = client.ping().await.unwrap_err();
    assert!(matches!(err, AdsMediaError::Transport(ref m) if m.contains("timed out")));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = AdsMediaClient::new(TEST_API_KEY)
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

    let err = client.ping().await.unwrap_err();
    assert!(matches!(err, AdsMediaError::Transport(_)));
}

// ============================================================================
// Batch
// ============================================================================

#[tokio::test]
async fn test_send_batch_preserves_recipient_order() {
    let server = TestApiServer::start().await;
    let builder = TestDataBuilder::from_test_name("batch_order");
    let first = builder.email("first");
    let second = builder.email("second");
    let first_name = builder.name("recipient", "first");

    Mock::given(method("POST"))
        .and(path("/send/batch"))
        .and(body_json(json!({
            "recipients": [
                {"email": first, "name": first_name},
                {"email": second}
            ],
            "subject": "Sale",
            "html": "<p>50% off</p>",
            "preheader": "Today only"
        })))
        .respond_with(success(json!({"task_id": 99, "queued": 2})))
        .expect(1)
        .mount(server.mock_server())
        .await;

    let batch = BatchEmailRequest::new(
        vec![
            BatchRecipient::named(first.clone(), first_name.clone()),
            BatchRecipient::new(second.clone()),
        ],
        "Sale",
        "<p>50% off</p>",
    )
    .with_preheader("Today only");

    let summary = client_for(&server).send_batch(&batch).await.unwrap();
    assert_eq!(summary.task_id, Some(99));
    assert_eq!(summary.queued, Some(2));

    // One request for the whole batch, not one per recipient
    let requests = server.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/send/batch");
}

#[tokio::test]
async fn test_empty_batch_rejected_locally() {
    let server = TestApiServer::start().await;
    server.expect_no_requests().await;

    let batch = BatchEmailRequest::new(vec![], "Sale", "<p>x</p>");
    let err = client_for(&server).send_batch(&batch).await.unwrap_err();
    assert!(matches!(err, AdsMediaError::Validation(_)));
}

// ============================================================================
// Suppression, ping, usage, status, account
// ============================================================================

#[tokio::test]
async fn test_check_suppression_bounced() {
    let server = TestApiServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suppressions/check"))
        .and(query_param("email", "b@x.com"))
        .and(header("authorization", bearer(TEST_API_KEY).as_str()))
        .respond_with(success(json!({"suppressed": true, "reason": "bounced"})))
        .expect(1)
        .mount(server.mock_server())
        .await;

    let status = client_for(&server).check_suppression("b@x.com").await.unwrap();
    assert!(status.suppressed);
    assert_eq!(status.reason.as_deref(), Some("bounced"));
}

#[tokio::test]
async fn test_ping_and_usage_return_data_verbatim() {
    let server = TestApiServer::start().await;
    let usage = json!({"sent": 120, "limit": 1000, "period": {"from": "2026-10-01"}});

    server
        .mount_success("GET", "/ping", json!({"status": "ok", "user_id": 5}))
        .await;
    server
        .mount_success("GET", "/account/usage", usage.clone())
        .await;

    let client = client_for(&server);
    assert_eq!(client.ping().await.unwrap(), json!({"status": "ok", "user_id": 5}));
    assert_eq!(client.get_usage().await.unwrap(), usage);
}

#[tokio::test]
async fn test_get_status_by_message_id_and_send_id() {
    let server = TestApiServer::start().await;

    Mock::given(method("GET"))
        .and(path("/send/status"))
        .and(query_param("message_id", "m1"))
        .respond_with(success(json!({"status": "delivered"})))
        .expect(1)
        .mount(server.mock_server())
        .await;
    Mock::given(method("GET"))
        .and(path("/send/status"))
        .and(query_param("id", "42"))
        .respond_with(success(json!({"status": "opened"})))
        .expect(1)
        .mount(server.mock_server())
        .await;

    let client = client_for(&server);
    let by_message = client
        .get_status(&StatusLookup::MessageId("m1".into()))
        .await
        .unwrap();
    assert_eq!(by_message["status"], "delivered");

    let by_send = client.get_status(&StatusLookup::SendId(42)).await.unwrap();
    assert_eq!(by_send["status"], "opened");
}

#[tokio::test]
async fn test_get_account() {
    let server = TestApiServer::start().await;
    server
        .mount_success("GET", "/account", json!({"email": "owner@x.com", "plan": "pro"}))
        .await;

    let account = client_for(&server).get_account().await.unwrap();
    assert_eq!(account["plan"], "pro");
}

#[tokio::test]
async fn test_wrong_api_key_is_api_error() {
    let server = TestApiServer::start().await;
    server.mount_success("GET", "/ping", json!({"status": "ok"})).await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(failure(401, "invalid api key"))
        .mount(server.mock_server())
        .await;

    assert!(client_for(&server).ping().await.is_ok());

    let client = AdsMediaClient::new("other-key")
        .unwrap()
        .with_base_url(server.base_url());
    match client.ping().await.unwrap_err() {
        AdsMediaError::Api { message, status } => {
            assert_eq!(message, "invalid api key");
            assert_eq!(status, Some(401));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}
