//! HTTP endpoints forwarding to an [`EmailApi`].
//!
//! Every endpoint validates its input, makes one client call, and answers
//! `{"success": true, "data": ...}`. Client failures become the standard
//! axum-helpers error body.

use crate::client::EmailApi;
use crate::error::AdsMediaResult;
use crate::models::{
    BatchEmailRequest, BatchRecipient, BatchSummary, EmailMessage, SendReceipt, StatusLookup,
    StatusQuery, SuppressionQuery, SuppressionStatus,
};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadGatewayResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    ServiceUnavailableResponse,
};
use axum_helpers::{ValidatedJson, ValidatedQuery};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

/// Success body shared by all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

type Reply<T> = AdsMediaResult<Json<ApiResponse<T>>>;

/// OpenAPI documentation for the email endpoints
#[derive(OpenApi)]
#[openapi(
    paths(send_email, send_batch, check_suppression, ping, usage, status, account),
    components(schemas(
        EmailMessage,
        BatchEmailRequest,
        BatchRecipient,
        SendReceipt,
        BatchSummary,
        SuppressionStatus
    ), responses(
        BadRequestValidationResponse,
        BadGatewayResponse,
        ServiceUnavailableResponse,
        InternalServerErrorResponse
    )),
    tags((name = "email", description = "Transactional email via ADSMedia"))
)]
pub struct EmailApiDoc;

/// Send a single email
#[utoipa::path(
    post,
    path = "/send",
    tag = "email",
    request_body = EmailMessage,
    responses(
        (status = 200, description = "Email accepted (wrapped in {success, data})", body = SendReceipt),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn send_email<C: EmailApi + 'static>(
    State(client): State<Arc<C>>,
    ValidatedJson(message): ValidatedJson<EmailMessage>,
) -> Reply<SendReceipt> {
    let receipt = client.send(&message).await?;
    Ok(ApiResponse::ok(receipt))
}

/// Send one email to many recipients
#[utoipa::path(
    post,
    path = "/send/batch",
    tag = "email",
    request_body = BatchEmailRequest,
    responses(
        (status = 200, description = "Batch accepted (wrapped in {success, data})", body = BatchSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn send_batch<C: EmailApi + 'static>(
    State(client): State<Arc<C>>,
    ValidatedJson(batch): ValidatedJson<BatchEmailRequest>,
) -> Reply<BatchSummary> {
    let summary = client.send_batch(&batch).await?;
    Ok(ApiResponse::ok(summary))
}

/// Check whether an address is suppressed
#[utoipa::path(
    get,
    path = "/check",
    tag = "email",
    params(SuppressionQuery),
    responses(
        (status = 200, description = "Suppression state (wrapped in {success, data})", body = SuppressionStatus),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn check_suppression<C: EmailApi + 'static>(
    State(client): State<Arc<C>>,
    ValidatedQuery(query): ValidatedQuery<SuppressionQuery>,
) -> Reply<SuppressionStatus> {
    let status = client.check_suppression(&query.email).await?;
    Ok(ApiResponse::ok(status))
}

/// Test the connection to ADSMedia
#[utoipa::path(
    get,
    path = "/ping",
    tag = "email",
    responses(
        (status = 200, description = "ADSMedia reachable"),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn ping<C: EmailApi + 'static>(State(client): State<Arc<C>>) -> Reply<Value> {
    Ok(ApiResponse::ok(client.ping().await?))
}

/// Account usage statistics
#[utoipa::path(
    get,
    path = "/usage",
    tag = "email",
    responses(
        (status = 200, description = "Usage statistics"),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn usage<C: EmailApi + 'static>(State(client): State<Arc<C>>) -> Reply<Value> {
    Ok(ApiResponse::ok(client.get_usage().await?))
}

/// Delivery status of a sent email
#[utoipa::path(
    get,
    path = "/status",
    tag = "email",
    params(StatusQuery),
    responses(
        (status = 200, description = "Delivery status"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn status<C: EmailApi + 'static>(
    State(client): State<Arc<C>>,
    ValidatedQuery(query): ValidatedQuery<StatusQuery>,
) -> Reply<Value> {
    let lookup = StatusLookup::try_from(query)?;
    Ok(ApiResponse::ok(client.get_status(&lookup).await?))
}

/// Account details
#[utoipa::path(
    get,
    path = "/account",
    tag = "email",
    responses(
        (status = 200, description = "Account details"),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn account<C: EmailApi + 'static>(State(client): State<Arc<C>>) -> Reply<Value> {
    Ok(ApiResponse::ok(client.get_account().await?))
}

/// Create router for the email endpoints
pub fn router<C: EmailApi + 'static>(client: Arc<C>) -> Router {
    Router::new()
        .route("/send", post(send_email::<C>))
        .route("/send/batch", post(send_batch::<C>))
        .route("/check", get(check_suppression::<C>))
        .route("/ping", get(ping::<C>))
        .route("/usage", get(usage::<C>))
        .route("/status", get(status::<C>))
        .route("/account", get(account::<C>))
        .with_state(client)
}
