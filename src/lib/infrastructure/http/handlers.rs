//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::errors::ErrorResponse;

pub mod v1;

/// Endpoints listed in the not-found response
pub const AVAILABLE_ENDPOINTS: [&str; 4] = [
    "POST /api/v1/send-email - Send email",
    "GET /api/v1/health - Health check",
    "GET /api/v1/sample-request - Example request body",
    "GET /api/v1/templates - Available templates",
];

/// Body returned for unknown routes
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    /// Always `false`
    pub success: bool,

    /// The error message
    pub error: String,

    /// The routes this server does answer
    pub available_endpoints: Vec<String>,
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            error: "Endpoint not found".to_string(),
            available_endpoints: AVAILABLE_ENDPOINTS.iter().map(ToString::to_string).collect(),
        }),
    )
}

/// Catch panics and return a 500 error without exposing the panic payload
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!("request handler panicked: {details}");

    let response = Json(ErrorResponse::new("Internal server error")).into_response();

    (StatusCode::INTERNAL_SERVER_ERROR, response).into_response()
}
