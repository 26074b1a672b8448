//! Readiness handler that pings the ADSMedia API.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_adsmedia::EmailApi;
use std::sync::Arc;

/// Reports ready only when ADSMedia accepts our credentials.
pub async fn ready_handler<C: EmailApi + 'static>(State(client): State<Arc<C>>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "adsmedia",
        Box::pin(async {
            client
                .ping()
                .await
                .map(|_| ())
                .map_err(|e| format!("ADSMedia ping failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
