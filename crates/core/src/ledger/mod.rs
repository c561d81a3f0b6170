//! Account ledger and transaction-authorization engine.
//!
//! This module implements the balance-affecting core of the system:
//! - Accounts and their in-memory ledger store
//! - Immutable transaction records (newest-first history)
//! - The policy gate every debit must pass (frozen, limit, funds)
//! - The four money movement operations
//! - Error types for rejected movements

pub mod account;
pub mod error;
pub mod policy;
pub mod record;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod service_props;

pub use account::{Account, AccountType, generate_account_number};
pub use error::MovementError;
pub use record::{Category, Direction, RecordStatus, TransactionRecord};
pub use service::MovementService;
pub use store::LedgerStore;
pub use types::{
    AccountView, BillPaymentRequest, DepositRequest, MovementReceipt,
    SavingsContributionReceipt, SavingsContributionRequest, TransferRequest,
};
