//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::communication::templates::TemplateError;

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,

    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response body
    pub fn new(error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Message for bodies that are not a JSON document
pub const INVALID_JSON: &str = "Invalid JSON in request body";

/// Message for bodies sent without a JSON content type
pub const JSON_CONTENT_TYPE_REQUIRED: &str = "Content-Type must be application/json";

/// An error raised in the API
#[derive(Debug)]
pub struct ApiError {
    /// The status code
    pub status: StatusCode,

    /// The error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(&self.message))).into_response()
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        error!("template error: {err}");

        ApiError::new_500(&err.to_string())
    }
}

/// Every rejection is answered with an [`ErrorResponse`]; malformed input is a 400,
/// an oversized body keeps its 413.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                ApiError::new_400(INVALID_JSON)
            }
            JsonRejection::MissingJsonContentType(_) => ApiError::new_400(JSON_CONTENT_TYPE_REQUIRED),
            rejection => ApiError::new(rejection.status(), &rejection.body_text()),
        }
    }
}
