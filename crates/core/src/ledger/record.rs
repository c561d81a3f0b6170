//! Immutable transaction records.
//!
//! A record describes one balance-affecting event. Records are constructed
//! only inside this crate, as the second half of an atomic mutate-and-record
//! step; once appended to an account's history they are never modified.

use chrono::{DateTime, Utc};
use meridian_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money into the account.
    Credit,
    /// Money out of the account.
    Debit,
}

/// Category tag on a record.
///
/// Used only by downstream analytics and presentation; nothing in the
/// ledger enforces category semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Incoming deposit.
    Deposit,
    /// Outgoing transfer.
    Transfer,
    /// Bill payment.
    Bill,
    /// Savings goal contribution.
    Savings,
    /// Retail purchase.
    Shopping,
    /// Food and dining.
    Food,
    /// Entertainment and subscriptions.
    Entertainment,
    /// Transport.
    Transport,
    /// Health and pharmacy.
    Health,
}

/// Record lifecycle status.
///
/// Failed movements never produce a record, so every persisted record is
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The movement completed.
    Completed,
}

/// An immutable, timestamped entry describing one balance-affecting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique record ID, generated at append time.
    pub id: TransactionId,
    /// Capture time of the operation (never client-supplied).
    pub timestamp: DateTime<Utc>,
    /// Credit or debit.
    pub direction: Direction,
    /// Category tag for downstream aggregation.
    pub category: Category,
    /// The moved amount. Always positive.
    pub amount: Decimal,
    /// Human-readable description.
    pub description: String,
    /// Record status.
    pub status: RecordStatus,
}

impl TransactionRecord {
    /// Captures a record for a movement happening now.
    pub(crate) fn capture(
        direction: Direction,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self::at(Utc::now(), direction, category, amount, description)
    }

    /// Constructs a record with an explicit timestamp (seed data).
    pub(crate) fn at(
        timestamp: DateTime<Utc>,
        direction: Direction,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            timestamp,
            direction,
            category,
            amount,
            description: description.into(),
            status: RecordStatus::Completed,
        }
    }

    /// The signed effect of this record on a balance.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}
