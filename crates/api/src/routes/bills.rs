//! Bill payment routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, middleware::AuthUser, routes::movement_error};
use meridian_core::ledger::BillPaymentRequest;
use meridian_shared::types::AccountNumber;

/// Creates the bill payment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bills/pay", post(pay_bill))
}

/// Request body for a bill payment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPaymentBody {
    /// Source account; defaults to the caller's first account.
    pub from_account_number: Option<AccountNumber>,
    /// Billing provider name.
    pub provider: String,
    /// Provider-side bill reference.
    pub bill_number: String,
    /// Amount to pay.
    pub amount: Decimal,
    /// Optional description override.
    pub description: Option<String>,
}

/// POST `/bills/pay` - Pay a bill from one of the caller's accounts.
async fn pay_bill(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BillPaymentBody>,
) -> impl IntoResponse {
    let request = BillPaymentRequest {
        account: payload.from_account_number,
        provider: payload.provider,
        bill_reference: payload.bill_number,
        amount: payload.amount,
        description: payload.description,
    };

    match state.movements.pay_bill(auth.user_id(), &request) {
        Ok(receipt) => {
            info!(
                account = %receipt.account,
                amount = %payload.amount,
                "Bill payment completed"
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
