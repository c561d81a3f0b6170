//! Request and result types for the money movement operations.
//!
//! Every operation takes an explicit typed request and returns either a
//! receipt carrying the new balance and the created record's id, or a
//! `MovementError`.

use meridian_shared::types::{AccountNumber, GoalId, TransactionId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::card::CardSettings;
use crate::ledger::account::Account;
use crate::savings::SavingsGoal;

/// Input for a deposit into one of the caller's accounts.
#[derive(Debug, Clone)]
pub struct DepositRequest {
    /// Target account. `None` means the caller's first account.
    pub account: Option<AccountNumber>,
    /// Amount to credit. Must be positive.
    pub amount: Decimal,
}

/// Input for an outgoing transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Source account. `None` means the caller's first account.
    pub from_account: Option<AccountNumber>,
    /// Opaque external reference to the recipient. Not validated against
    /// any ledger; this system does not model the receiving side.
    pub recipient: String,
    /// Amount to debit. Must be positive.
    pub amount: Decimal,
}

/// Input for a bill payment.
#[derive(Debug, Clone)]
pub struct BillPaymentRequest {
    /// Source account. `None` means the caller's first account.
    pub account: Option<AccountNumber>,
    /// Billing provider name.
    pub provider: String,
    /// Provider-side bill reference.
    pub bill_reference: String,
    /// Amount to debit. Must be positive.
    pub amount: Decimal,
    /// Optional description override for the record.
    pub description: Option<String>,
}

/// Input for a savings goal contribution.
#[derive(Debug, Clone)]
pub struct SavingsContributionRequest {
    /// The goal to fund.
    pub goal: GoalId,
    /// Source account. `None` means the caller's first account.
    pub account: Option<AccountNumber>,
    /// Amount to move. Must be positive.
    pub amount: Decimal,
}

/// Result of a successful money movement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementReceipt {
    /// The account the movement was applied to.
    pub account: AccountNumber,
    /// The id of the transaction record created for the movement.
    pub transaction_id: TransactionId,
    /// The account balance after the movement.
    pub new_balance: Decimal,
}

/// Result of a successful savings contribution.
#[derive(Debug, Clone, Serialize)]
pub struct SavingsContributionReceipt {
    /// The funding movement's receipt.
    #[serde(flatten)]
    pub movement: MovementReceipt,
    /// The goal after the contribution was applied.
    pub goal: SavingsGoal,
}

/// An account composed with its current card settings.
///
/// This is the most frequently polled read; it is assembled without
/// copying history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    /// The account snapshot, including the current balance.
    #[serde(flatten)]
    pub account: Account,
    /// The account's card settings (defaults if never configured).
    pub card_settings: CardSettings,
}
