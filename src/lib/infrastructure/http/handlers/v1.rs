//! Version 1 of the API

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::licenses::LicenseEmailService,
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod health;
pub mod sample_request;
pub mod send_email;
pub mod stoplight;
pub mod templates;

/// Routes served under `/api/v1`
pub fn router<S: LicenseEmailService>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/health", get(health::handler::<S>))
        .route("/sample-request", get(sample_request::handler))
        .route("/templates", get(templates::handler::<S>))
        .route("/send-email", post(send_email::handler::<S>))
}
