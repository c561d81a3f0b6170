//! In-memory ledger store.
//!
//! Single source of truth for account balances and transaction history.
//! Policy is not this store's concern: debits take the gate outcome as an
//! injected closure, evaluated under the account's lock so the check, the
//! balance mutation, and the record append form one atomic step. No reader
//! can observe an adjusted balance without the paired record, or vice
//! versa.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use meridian_shared::types::{AccountNumber, UserId};
use rust_decimal::Decimal;

use super::account::Account;
use super::error::MovementError;
use super::record::{Category, Direction, TransactionRecord};
use super::types::MovementReceipt;

/// An account's balance and history: the unit of mutual exclusion.
#[derive(Debug)]
struct AccountState {
    account: Account,
    /// Newest-first.
    history: VecDeque<TransactionRecord>,
}

/// In-memory mapping from account number to account state, plus the
/// user-to-accounts ownership index.
///
/// Constructed once per process (or per test) and shared via `Arc`.
/// Operations against the same account are serialized by the per-account
/// mutex; operations against different accounts proceed concurrently.
#[derive(Debug, Default)]
pub struct LedgerStore {
    accounts: DashMap<AccountNumber, Mutex<AccountState>>,
    /// Per user, account numbers in opening order; the first is the
    /// default account for movements that do not name one.
    ownership: DashMap<UserId, Vec<AccountNumber>>,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account for a user.
    ///
    /// The account's `balance` is its opening position; history starts
    /// empty.
    pub fn open_account(&self, owner: UserId, account: Account) {
        self.open_account_with_history(owner, account, Vec::new());
    }

    /// Registers an account together with pre-existing history (seeding).
    ///
    /// `history` must be newest-first; the seeded balance is the account's
    /// opening position and is not recomputed from the records.
    pub fn open_account_with_history(
        &self,
        owner: UserId,
        account: Account,
        history: Vec<TransactionRecord>,
    ) {
        let number = account.number.clone();
        self.accounts.insert(
            number.clone(),
            Mutex::new(AccountState {
                account,
                history: history.into(),
            }),
        );
        self.ownership.entry(owner).or_default().push(number);
    }

    /// Returns snapshots of all accounts owned by a user, in opening order.
    #[must_use]
    pub fn accounts_of(&self, owner: UserId) -> Vec<Account> {
        let Some(numbers) = self.ownership.get(&owner) else {
            return Vec::new();
        };
        numbers
            .iter()
            .filter_map(|number| {
                self.accounts
                    .get(number)
                    .map(|state| lock(&state).account.clone())
            })
            .collect()
    }

    /// Resolves the account a movement should act on.
    ///
    /// An explicit number must be owned by the user; `None` falls back to
    /// the user's first account (backward-compatible default selection).
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the number is not owned by the user or
    /// the user has no accounts.
    pub fn resolve_for_user(
        &self,
        owner: UserId,
        requested: Option<&AccountNumber>,
    ) -> Result<AccountNumber, MovementError> {
        let numbers = self
            .ownership
            .get(&owner)
            .ok_or_else(|| not_found(requested))?;

        match requested {
            Some(number) if numbers.contains(number) => Ok(number.clone()),
            Some(number) => Err(MovementError::AccountNotFound(number.clone())),
            None => numbers
                .first()
                .cloned()
                .ok_or_else(|| not_found(requested)),
        }
    }

    /// Returns a snapshot of one account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown number.
    pub fn account(&self, number: &AccountNumber) -> Result<Account, MovementError> {
        self.accounts
            .get(number)
            .map(|state| lock(&state).account.clone())
            .ok_or_else(|| MovementError::AccountNotFound(number.clone()))
    }

    /// Returns an account's transaction records, newest-first, optionally
    /// capped to `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown number.
    pub fn history(
        &self,
        number: &AccountNumber,
        limit: Option<usize>,
    ) -> Result<Vec<TransactionRecord>, MovementError> {
        let state = self
            .accounts
            .get(number)
            .ok_or_else(|| MovementError::AccountNotFound(number.clone()))?;
        let state = lock(&state);
        let cap = limit.unwrap_or(usize::MAX);
        Ok(state.history.iter().take(cap).cloned().collect())
    }

    /// Credits `amount` into the account and appends the paired record, as
    /// one atomic step.
    ///
    /// Crediting has no failure condition of its own (no maximum balance is
    /// modeled); callers gate credits before invoking this primitive.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown number.
    pub fn credit(
        &self,
        number: &AccountNumber,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Result<MovementReceipt, MovementError> {
        let state = self
            .accounts
            .get(number)
            .ok_or_else(|| MovementError::AccountNotFound(number.clone()))?;
        let mut state = lock(&state);

        state.account.balance += amount;
        let record =
            TransactionRecord::capture(Direction::Credit, category, amount, description);
        let receipt = MovementReceipt {
            account: number.clone(),
            transaction_id: record.id,
            new_balance: state.account.balance,
        };
        state.history.push_front(record);
        Ok(receipt)
    }

    /// Debits `amount` from the account and appends the paired record, as
    /// one atomic step.
    ///
    /// `gate` receives the balance under the account's lock and is the
    /// policy check for this debit; if it rejects, nothing is mutated. The
    /// store additionally refuses to let a balance go negative regardless
    /// of what the gate decided.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown number, the gate's error if
    /// it rejects, or `InsufficientFunds` if `amount` exceeds the balance.
    pub fn debit(
        &self,
        number: &AccountNumber,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        gate: impl FnOnce(Decimal) -> Result<(), MovementError>,
    ) -> Result<MovementReceipt, MovementError> {
        let state = self
            .accounts
            .get(number)
            .ok_or_else(|| MovementError::AccountNotFound(number.clone()))?;
        let mut state = lock(&state);

        gate(state.account.balance)?;
        if amount > state.account.balance {
            return Err(MovementError::InsufficientFunds);
        }

        state.account.balance -= amount;
        let record = TransactionRecord::capture(Direction::Debit, category, amount, description);
        let receipt = MovementReceipt {
            account: number.clone(),
            transaction_id: record.id,
            new_balance: state.account.balance,
        };
        state.history.push_front(record);
        Ok(receipt)
    }
}

fn not_found(requested: Option<&AccountNumber>) -> MovementError {
    MovementError::AccountNotFound(
        requested
            .cloned()
            .unwrap_or_else(|| AccountNumber::new("default")),
    )
}

/// Locks an account's state, recovering from a poisoned mutex: the state
/// itself is kept consistent by construction (mutation and append happen
/// before any code that could panic).
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
