//! Beneficiary directory routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::info;

use crate::{AppState, middleware::AuthUser, routes::app_error};
use meridian_core::beneficiary::{BeneficiaryUpdate, NewBeneficiary};
use meridian_shared::AppError;
use meridian_shared::types::BeneficiaryId;

/// Creates the beneficiary routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/beneficiaries", get(list_beneficiaries))
        .route("/beneficiaries", post(create_beneficiary))
        .route("/beneficiaries/{id}", put(update_beneficiary))
        .route("/beneficiaries/{id}", delete(delete_beneficiary))
}

/// GET `/beneficiaries` - List the caller's saved recipients.
async fn list_beneficiaries(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let beneficiaries = state.beneficiaries.beneficiaries_of(auth.user_id());
    (
        StatusCode::OK,
        Json(json!({ "beneficiaries": beneficiaries })),
    )
        .into_response()
}

/// POST `/beneficiaries` - Save a new recipient.
async fn create_beneficiary(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NewBeneficiary>,
) -> impl IntoResponse {
    let beneficiary = state.beneficiaries.create(auth.user_id(), payload);
    info!(beneficiary = %beneficiary.id, "Beneficiary saved");
    (StatusCode::CREATED, Json(beneficiary)).into_response()
}

/// PUT `/beneficiaries/{id}` - Merge a partial update.
async fn update_beneficiary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BeneficiaryId>,
    Json(payload): Json<BeneficiaryUpdate>,
) -> impl IntoResponse {
    match state.beneficiaries.update(auth.user_id(), id, &payload) {
        Some(beneficiary) => (StatusCode::OK, Json(beneficiary)).into_response(),
        None => app_error(&AppError::NotFound(format!("Beneficiary {id}"))),
    }
}

/// DELETE `/beneficiaries/{id}` - Remove a recipient.
async fn delete_beneficiary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BeneficiaryId>,
) -> impl IntoResponse {
    if state.beneficiaries.delete(auth.user_id(), id) {
        (StatusCode::NO_CONTENT, ()).into_response()
    } else {
        app_error(&AppError::NotFound(format!("Beneficiary {id}")))
    }
}
