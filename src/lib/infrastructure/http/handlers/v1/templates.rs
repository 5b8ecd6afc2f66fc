//! Template listing handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::licenses::LicenseEmailService,
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// The template listing response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TemplatesResponse {
    /// Names usable as `templateName`
    #[schema(example = json!(["windows-license"]))]
    pub templates: Vec<String>,
}

/// List the available email templates
#[utoipa::path(
    get,
    operation_id = "list_templates",
    tag = "Email",
    path = "/api/v1/templates",
    responses(
        (status = StatusCode::OK, description = "Available templates", body = TemplatesResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Templates could not be listed", body = ErrorResponse),
    )
)]
pub async fn handler<S: LicenseEmailService>(
    State(state): State<AppState<S>>,
) -> Result<Json<TemplatesResponse>, ApiError> {
    let templates = state.emails.templates().await?;

    Ok(Json(TemplatesResponse { templates }))
}
