//! The policy gate for money movement.
//!
//! Pure evaluation, no mutation. Checks run in a fixed order and the first
//! failing check is the reported reason: frozen state and limit violations
//! must surface even when the account also lacks funds, because each is
//! user-actionable in a different way (unfreeze vs. raise limit vs. add
//! funds) and the UI shows only the first applicable reason.

use rust_decimal::Decimal;

use super::error::MovementError;
use crate::card::CardSettings;

/// Validates a movement amount before any policy evaluation.
///
/// # Errors
///
/// Returns `InvalidAmount` if the amount is zero or negative.
pub fn validate_amount(amount: Decimal) -> Result<(), MovementError> {
    if amount <= Decimal::ZERO {
        return Err(MovementError::InvalidAmount(amount));
    }
    Ok(())
}

/// Evaluates whether a debit of `amount` is permitted.
///
/// Order matters: frozen, then spending limit, then balance.
///
/// # Errors
///
/// Returns the first failing check as `CardFrozen`, `LimitExceeded`, or
/// `InsufficientFunds`.
pub fn evaluate_debit(
    settings: &CardSettings,
    balance: Decimal,
    amount: Decimal,
) -> Result<(), MovementError> {
    if settings.is_frozen {
        return Err(MovementError::CardFrozen);
    }

    if let Some(limit) = settings.spending_limit {
        if amount > limit {
            return Err(MovementError::LimitExceeded { limit, amount });
        }
    }

    if amount > balance {
        return Err(MovementError::InsufficientFunds);
    }

    Ok(())
}

/// Evaluates whether a credit into the account is permitted.
///
/// A frozen card is fully inert: it can neither spend nor receive. No other
/// check applies to credits (the spending limit governs debits only).
///
/// # Errors
///
/// Returns `CardFrozen` if the card is frozen.
pub fn evaluate_credit(settings: &CardSettings) -> Result<(), MovementError> {
    if settings.is_frozen {
        return Err(MovementError::CardFrozen);
    }
    Ok(())
}
