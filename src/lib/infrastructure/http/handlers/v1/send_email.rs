//! Send email handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    domain::licenses::{LicenseEmailService, PipelineResult},
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Send email response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    /// Whether the email was sent
    pub success: bool,

    /// The provider-assigned message id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(example = "<0191e5b2-7c4e-7d1a-9d0e-3b6f1f1c2a3b@shop.example.com>")]
    pub message_id: Option<String>,

    /// Success message
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(example = "Email sent successfully")]
    pub message: Option<String>,

    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl From<PipelineResult> for SendEmailResponse {
    fn from(result: PipelineResult) -> Self {
        Self {
            success: result.success,
            message_id: result.message_id,
            message: result.message,
            error: result.error,
        }
    }
}

/// Render a license template and send it
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Email",
    path = "/api/v1/send-email",
    request_body = SendEmailBody,
    responses(
        (status = StatusCode::OK, description = "Email sent", body = SendEmailResponse),
        (status = StatusCode::BAD_REQUEST, description = "Malformed request", body = ErrorResponse, example = json!({ "success": false, "error": "Required fields: templateName, to, data, from" })),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Configuration, connection or delivery failure", body = ErrorResponse, example = json!({ "success": false, "error": "Could not connect to SMTP server" })),
    )
)]
pub async fn handler<S: LicenseEmailService>(
    State(state): State<AppState<S>>,
    request: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SendEmailResponse>), ApiError> {
    let Json(request) = request?;

    let template = request.get("templateName").and_then(Value::as_str);

    info!(template, "email request received");

    let result = state.emails.process(&request).await;

    let status =
        StatusCode::from_u16(result.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((status, Json(result.into())))
}
