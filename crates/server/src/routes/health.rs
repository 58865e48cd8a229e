//! Health check endpoint: GET /api/health

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::{error::Result, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// GET /api/health - liveness plus crate version.
pub async fn health_check(State(_state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
