//! Savings goal routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, middleware::AuthUser, routes::movement_error};
use meridian_core::ledger::SavingsContributionRequest;
use meridian_core::savings::NewSavingsGoal;
use meridian_shared::types::{AccountNumber, GoalId};

/// Creates the savings goal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/savings/goals", get(list_goals))
        .route("/savings/goals", post(create_goal))
        .route("/savings/goals/{id}/deposit", post(contribute))
}

/// Request body for a goal contribution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBody {
    /// Source account; defaults to the caller's first account.
    pub from_account_number: Option<AccountNumber>,
    /// Amount to move into the goal.
    pub amount: Decimal,
}

/// GET `/savings/goals` - List the caller's goals.
async fn list_goals(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let goals = state.goals.goals_of(auth.user_id());
    (StatusCode::OK, Json(json!({ "goals": goals }))).into_response()
}

/// POST `/savings/goals` - Create a goal starting at zero.
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NewSavingsGoal>,
) -> impl IntoResponse {
    let goal = state.goals.create(auth.user_id(), payload);
    info!(goal = %goal.id, name = %goal.name, "Savings goal created");
    (StatusCode::CREATED, Json(goal)).into_response()
}

/// POST `/savings/goals/{id}/deposit` - Fund a goal from an account.
async fn contribute(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal): Path<GoalId>,
    Json(payload): Json<ContributionBody>,
) -> impl IntoResponse {
    let request = SavingsContributionRequest {
        goal,
        account: payload.from_account_number,
        amount: payload.amount,
    };

    match state.movements.contribute_to_goal(auth.user_id(), &request) {
        Ok(receipt) => {
            info!(
                account = %receipt.movement.account,
                goal = %receipt.goal.id,
                amount = %payload.amount,
                "Savings contribution completed"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "transactionId": receipt.movement.transaction_id,
                    "newBalance": receipt.movement.new_balance,
                    "goal": receipt.goal
                })),
            )
                .into_response()
        }
        Err(e) => movement_error(&e),
    }
}
