//! Card settings routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use tracing::info;

use crate::{AppState, middleware::AuthUser, routes::movement_error};
use meridian_core::card::CardSettingsUpdate;
use meridian_shared::types::AccountNumber;

/// Creates the card settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cards/{number}/settings", get(get_settings))
        .route("/cards/{number}/settings", put(update_settings))
}

/// GET `/cards/{number}/settings` - Current settings, defaults if unset.
async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(number): Path<AccountNumber>,
) -> impl IntoResponse {
    match state.movements.card_settings(auth.user_id(), &number) {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => movement_error(&e),
    }
}

/// PUT `/cards/{number}/settings` - Shallow-merge a partial update.
async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(number): Path<AccountNumber>,
    Json(payload): Json<CardSettingsUpdate>,
) -> impl IntoResponse {
    match state
        .movements
        .update_card_settings(auth.user_id(), &number, &payload)
    {
        Ok(settings) => {
            info!(
                account = %number,
                frozen = settings.is_frozen,
                "Card settings updated"
            );
            (StatusCode::OK, Json(settings)).into_response()
        }
        Err(e) => movement_error(&e),
    }
}
