//! Tool invocation tests against a fake ADSMedia API

use domain_adsmedia::tools::{CheckSuppressionTool, SendEmailTool};
use domain_adsmedia::*;
use serde_json::{Value, json};
use test_utils::assertions::assert_contains;
use test_utils::{TEST_API_KEY, TestApiServer};

fn params(value: Value) -> ToolParameters {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_send_email_tool_success_text() {
    let server = TestApiServer::start().await;
    server
        .mount_success("POST", "/send", json!({"message_id": "m1"}))
        .await;

    let message = SendEmailTool::with_base_url(server.base_url())
        .invoke(
            &ToolRuntime::with_api_key(TEST_API_KEY),
            &params(json!({
                "to": "a@x.com",
                "subject": "Hi",
                "html": "<p>hi</p>",
                "to_name": "Ann"
            })),
        )
        .await;

    assert_eq!(
        message.text,
        "✅ Email sent successfully!\nTo: a@x.com\nSubject: Hi\nMessage ID: m1"
    );
}

#[tokio::test]
async fn test_send_email_tool_api_error_text() {
    let server = TestApiServer::start().await;
    server.mount_failure("POST", "/send", 400, "domain not verified").await;

    let message = SendEmailTool::with_base_url(server.base_url())
        .invoke(
            &ToolRuntime::with_api_key(TEST_API_KEY),
            &params(json!({"to": "a@x.com", "subject": "Hi", "html": "<p>hi</p>"})),
        )
        .await;

    assert_eq!(message.text, "❌ Error: domain not verified");
}

#[tokio::test]
async fn test_check_suppression_tool_texts() {
    let server = TestApiServer::start().await;
    server
        .mount_success(
            "GET",
            "/suppressions/check",
            json!({"suppressed": true, "reason": "bounced"}),
        )
        .await;

    let tool = find_tool(&server.base_url(), "check_suppression").unwrap();
    let message = tool
        .invoke(
            &ToolRuntime::with_api_key(TEST_API_KEY),
            &params(json!({"email": "b@x.com"})),
        )
        .await;

    assert_eq!(message.text, "⚠️ Email SUPPRESSED\nEmail: b@x.com\nReason: bounced");
}

#[tokio::test]
async fn test_check_suppression_tool_not_suppressed() {
    let server = TestApiServer::start().await;
    server
        .mount_success("GET", "/suppressions/check", json!({"suppressed": false}))
        .await;

    let message = CheckSuppressionTool::with_base_url(server.base_url())
        .invoke(
            &ToolRuntime::with_api_key(TEST_API_KEY),
            &params(json!({"email": "ok@x.com"})),
        )
        .await;

    assert_contains(&message.text, "ok@x.com is NOT suppressed");
}
