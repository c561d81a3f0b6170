//! Transfer routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, middleware::AuthUser, routes::movement_error};
use meridian_core::ledger::TransferRequest;
use meridian_shared::types::AccountNumber;

/// Creates the transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transfers", post(create_transfer))
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    /// Source account; defaults to the caller's first account.
    pub from_account_number: Option<AccountNumber>,
    /// Opaque recipient account reference.
    pub recipient_account_number: String,
    /// Amount to transfer.
    pub amount: Decimal,
}

/// POST `/transfers` - Debit the source account towards an external
/// recipient.
async fn create_transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransferBody>,
) -> impl IntoResponse {
    let request = TransferRequest {
        from_account: payload.from_account_number,
        recipient: payload.recipient_account_number,
        amount: payload.amount,
    };

    match state.movements.transfer(auth.user_id(), &request) {
        Ok(receipt) => {
            info!(
                account = %receipt.account,
                amount = %payload.amount,
                "Transfer completed"
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
