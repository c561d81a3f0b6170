//! Account listing, transaction history, and deposits.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, middleware::AuthUser, routes::movement_error};
use meridian_core::ledger::DepositRequest;
use meridian_shared::types::AccountNumber;

/// Creates the account routes (requires auth middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{number}/transactions", get(list_transactions))
        .route("/accounts/deposit", post(deposit))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// Cap the number of returned records (newest-first).
    pub limit: Option<usize>,
}

/// Request body for a deposit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositBody {
    /// Target account; defaults to the caller's first account.
    pub account_number: Option<AccountNumber>,
    /// Amount to deposit.
    pub amount: Decimal,
}

/// GET `/accounts` - List the caller's accounts with card settings attached.
async fn list_accounts(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let accounts = state.movements.list_accounts(auth.user_id());
    (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response()
}

/// GET `/accounts/{number}/transactions` - Transaction history, newest-first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(number): Path<AccountNumber>,
    Query(query): Query<TransactionsQuery>,
) -> impl IntoResponse {
    match state
        .movements
        .history(auth.user_id(), &number, query.limit)
    {
        Ok(transactions) => (
            StatusCode::OK,
            Json(json!({
                "transactions": transactions,
                "totalCount": transactions.len()
            })),
        )
            .into_response(),
        Err(e) => movement_error(&e),
    }
}

/// POST `/accounts/deposit` - Deposit into one of the caller's accounts.
async fn deposit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<DepositBody>,
) -> impl IntoResponse {
    let request = DepositRequest {
        account: payload.account_number,
        amount: payload.amount,
    };

    match state.movements.deposit(auth.user_id(), &request) {
        Ok(receipt) => {
            info!(
                account = %receipt.account,
                amount = %payload.amount,
                "Deposit completed"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "transactionId": receipt.transaction_id,
                    "newBalance": receipt.new_balance
                })),
            )
                .into_response()
        }
        Err(e) => movement_error(&e),
    }
}
