use axum::{Router, routing::get};
use domain_adsmedia::EmailApi;
use std::sync::Arc;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (the email router has its client applied).
pub fn routes<C: EmailApi + 'static>(client: Arc<C>) -> Router {
    Router::new().nest("/email", domain_adsmedia::router(client))
}

/// Creates a router with the /ready endpoint.
///
/// Mergeable with the stateless app router from `create_router`.
pub fn ready_router<C: EmailApi + 'static>(client: Arc<C>) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler::<C>))
        .with_state(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_adsmedia::{
        AdsMediaError, AdsMediaResult, BatchEmailRequest, BatchSummary, EmailMessage, SendReceipt,
        StatusLookup, SuppressionStatus,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Answers ping according to `reachable`; everything else is unused here.
    struct PingOnly {
        reachable: bool,
    }

    fn unused<T>() -> AdsMediaResult<T> {
        Err(AdsMediaError::Transport("not used in this test".into()))
    }

    #[async_trait]
    impl EmailApi for PingOnly {
        async fn send(&self, _: &EmailMessage) -> AdsMediaResult<SendReceipt> {
            unused()
        }
        async fn send_batch(&self, _: &BatchEmailRequest) -> AdsMediaResult<BatchSummary> {
            unused()
        }
        async fn check_suppression(&self, _: &str) -> AdsMediaResult<SuppressionStatus> {
            unused()
        }
        async fn ping(&self) -> AdsMediaResult<Value> {
            if self.reachable {
                Ok(json!({"status": "ok"}))
            } else {
                Err(AdsMediaError::api("invalid api key", Some(401)))
            }
        }
        async fn get_usage(&self) -> AdsMediaResult<Value> {
            unused()
        }
        async fn get_status(&self, _: &StatusLookup) -> AdsMediaResult<Value> {
            unused()
        }
        async fn get_account(&self) -> AdsMediaResult<Value> {
            unused()
        }
    }

    async fn ready(reachable: bool) -> (StatusCode, Value) {
        let response = ready_router(Arc::new(PingOnly { reachable }))
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_when_ping_succeeds() {
        let (status, body) = ready(true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready", "adsmedia": "connected"}));
    }

    #[tokio::test]
    async fn test_not_ready_when_ping_fails() {
        let (status, body) = ready(false).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["adsmedia"], "disconnected");
    }

    #[tokio::test]
    async fn test_email_routes_nested() {
        let response = routes(Arc::new(PingOnly { reachable: true }))
            .oneshot(Request::builder().uri("/email/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
