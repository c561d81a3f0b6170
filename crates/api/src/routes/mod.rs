//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, middleware};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::auth::auth_middleware};
use meridian_core::ledger::MovementError;
use meridian_shared::AppError;

pub mod accounts;
pub mod auth;
pub mod beneficiaries;
pub mod bills;
pub mod cards;
pub mod health;
pub mod savings;
pub mod transfers;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(accounts::routes())
        .merge(cards::routes())
        .merge(transfers::routes())
        .merge(bills::routes())
        .merge(savings::routes())
        .merge(beneficiaries::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Renders a rejected movement as a JSON error response.
///
/// The status comes from the error itself; the message is the error's
/// display form, which for `LimitExceeded` names both the limit and the
/// attempted amount. Rejections the user can clear by changing account
/// state are normal traffic; the rest point at a misbehaving caller.
pub(crate) fn movement_error(err: &MovementError) -> Response {
    if err.is_user_actionable() {
        info!(code = err.error_code(), "Movement rejected");
    } else {
        error!(code = err.error_code(), error = %err, "Movement rejected");
    }

    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Renders a cross-cutting application failure as a JSON error response.
pub(crate) fn app_error(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}
