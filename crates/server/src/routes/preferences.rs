//! Preference endpoints: GET /api/preferences, PATCH /api/preferences
//!
//! PATCH carries merge semantics: the body is a partial settings object and
//! keys it does not mention survive unchanged.

use axum::{extract::State, response::Json};
use axum::http::StatusCode;
use folio_store::book::Preferences;

use crate::{error::Result, state::AppState};

/// GET /api/preferences - the stored settings map, `{}` if never saved.
pub async fn get_preferences(State(state): State<AppState>) -> Result<Json<Preferences>> {
    let settings = state.with_library(|library| library.preferences()).await?;
    Ok(Json(settings))
}

/// PATCH /api/preferences - shallow-merge a partial settings object.
pub async fn save_preferences(
    State(state): State<AppState>,
    Json(partial): Json<Preferences>,
) -> Result<StatusCode> {
    state
        .with_library(move |library| library.save_preferences(&partial))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
