//! Health handler

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::licenses::LicenseEmailService, infrastructure::http::state::AppState,
};

/// The health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving requests
    #[schema(example = "ok")]
    pub status: String,

    /// The uptime of the application in seconds
    #[schema(example = 123)]
    pub uptime: i64,
}

/// Report that the service is up and for how long
#[utoipa::path(
    get,
    operation_id = "health",
    tag = "System",
    path = "/api/v1/health",
    responses(
        (status = StatusCode::OK, description = "Health response", body = HealthResponse),
    )
)]
pub async fn handler<S: LicenseEmailService>(
    State(state): State<AppState<S>>,
) -> Json<HealthResponse> {
    let uptime = Utc::now().timestamp() - state.start_time.timestamp();

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime,
    })
}
