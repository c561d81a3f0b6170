//! Error types for rejected money movements.

use meridian_shared::types::{AccountNumber, GoalId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by the money movement operations.
///
/// Every failure is terminal for the invocation: the core never retries,
/// and no partial mutation survives a failure. The caller may resubmit
/// after changing the request or the account state.
#[derive(Debug, Clone, Error)]
pub enum MovementError {
    /// Amount is zero or negative. Rejected before any policy evaluation.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// The account does not resolve for the caller's user.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    /// The card is frozen; no movement may touch the account.
    #[error("Card is frozen")]
    CardFrozen,

    /// The amount exceeds the card's per-transaction spending limit.
    #[error("Amount {amount} exceeds the spending limit of {limit}")]
    LimitExceeded {
        /// The configured spending limit.
        limit: Decimal,
        /// The attempted amount.
        amount: Decimal,
    },

    /// The account balance cannot cover the debit.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The savings goal does not resolve for the caller's user.
    #[error("Savings goal not found: {0}")]
    GoalNotFound(GoalId),
}

impl MovementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CardFrozen => "CARD_FROZEN",
            Self::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::GoalNotFound(_) => "GOAL_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - caller-input errors
            Self::InvalidAmount(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::GoalNotFound(_) => 404,

            // 422 Unprocessable - policy gate rejections
            Self::CardFrozen | Self::LimitExceeded { .. } | Self::InsufficientFunds => 422,
        }
    }

    /// Returns true if the user can clear this failure by changing account
    /// state (unfreezing, raising a limit, adding funds) rather than just
    /// the request parameters.
    #[must_use]
    pub const fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            Self::CardFrozen | Self::LimitExceeded { .. } | Self::InsufficientFunds
        )
    }
}
