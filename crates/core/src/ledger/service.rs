//! The money movement operations.
//!
//! Every balance-affecting entry point in the system goes through this
//! service, and every debit goes through the same policy gate; no call
//! site re-implements the checks. Each operation validates its amount,
//! resolves the acting account, takes one settings snapshot, and then
//! performs the gate-mutate-record step atomically via the ledger store.

use std::sync::Arc;

use meridian_shared::types::{AccountNumber, UserId};
use rust_decimal::Decimal;

use super::error::MovementError;
use super::policy;
use super::record::{Category, TransactionRecord};
use super::store::LedgerStore;
use super::types::{
    AccountView, BillPaymentRequest, DepositRequest, MovementReceipt,
    SavingsContributionReceipt, SavingsContributionRequest, TransferRequest,
};
use crate::card::{CardSettings, CardSettingsStore, CardSettingsUpdate};
use crate::savings::SavingsGoalStore;

/// Orchestrates the four money movement operations over the injected
/// stores.
#[derive(Debug, Clone)]
pub struct MovementService {
    ledger: Arc<LedgerStore>,
    cards: Arc<CardSettingsStore>,
    goals: Arc<SavingsGoalStore>,
}

impl MovementService {
    /// Creates a service over the given stores.
    #[must_use]
    pub fn new(
        ledger: Arc<LedgerStore>,
        cards: Arc<CardSettingsStore>,
        goals: Arc<SavingsGoalStore>,
    ) -> Self {
        Self {
            ledger,
            cards,
            goals,
        }
    }

    /// Deposits `amount` into one of the caller's accounts.
    ///
    /// A frozen card is fully inert, so deposits into it are rejected just
    /// like debits from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `AccountNotFound`, or `CardFrozen`.
    pub fn deposit(
        &self,
        user: UserId,
        request: &DepositRequest,
    ) -> Result<MovementReceipt, MovementError> {
        policy::validate_amount(request.amount)?;
        let number = self
            .ledger
            .resolve_for_user(user, request.account.as_ref())?;

        let settings = self.cards.get(&number);
        policy::evaluate_credit(&settings)?;

        self.ledger
            .credit(&number, request.amount, Category::Deposit, "Card Deposit")
    }

    /// Transfers `amount` out of one of the caller's accounts to an
    /// external recipient.
    ///
    /// The recipient side is not modeled; the identifier is embedded in
    /// the record description only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `AccountNotFound`, or a policy gate
    /// rejection (`CardFrozen`, `LimitExceeded`, `InsufficientFunds`).
    pub fn transfer(
        &self,
        user: UserId,
        request: &TransferRequest,
    ) -> Result<MovementReceipt, MovementError> {
        policy::validate_amount(request.amount)?;
        let number = self
            .ledger
            .resolve_for_user(user, request.from_account.as_ref())?;

        let settings = self.cards.get(&number);
        self.ledger.debit(
            &number,
            request.amount,
            Category::Transfer,
            format!("Transfer to {}", request.recipient),
            |balance| policy::evaluate_debit(&settings, balance, request.amount),
        )
    }

    /// Pays a bill from one of the caller's accounts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `AccountNotFound`, or a policy gate
    /// rejection.
    pub fn pay_bill(
        &self,
        user: UserId,
        request: &BillPaymentRequest,
    ) -> Result<MovementReceipt, MovementError> {
        policy::validate_amount(request.amount)?;
        let number = self
            .ledger
            .resolve_for_user(user, request.account.as_ref())?;

        let description = request.description.clone().unwrap_or_else(|| {
            format!(
                "{} Bill Payment #{}",
                request.provider, request.bill_reference
            )
        });

        let settings = self.cards.get(&number);
        self.ledger.debit(
            &number,
            request.amount,
            Category::Bill,
            description,
            |balance| policy::evaluate_debit(&settings, balance, request.amount),
        )
    }

    /// Moves `amount` from one of the caller's accounts into a savings
    /// goal.
    ///
    /// The goal is resolved before the debit, and the debit goes through
    /// the full policy gate; if the debit fails the goal is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `AccountNotFound`, `GoalNotFound`, or a
    /// policy gate rejection.
    pub fn contribute_to_goal(
        &self,
        user: UserId,
        request: &SavingsContributionRequest,
    ) -> Result<SavingsContributionReceipt, MovementError> {
        policy::validate_amount(request.amount)?;
        let number = self
            .ledger
            .resolve_for_user(user, request.account.as_ref())?;

        let settings = self.cards.get(&number);
        let (goal, movement) =
            self.goals
                .contribute(user, request.goal, request.amount, || {
                    self.ledger.debit(
                        &number,
                        request.amount,
                        Category::Savings,
                        "Savings Goal Deposit",
                        |balance| policy::evaluate_debit(&settings, balance, request.amount),
                    )
                })?;

        Ok(SavingsContributionReceipt { movement, goal })
    }

    /// Returns all of the caller's accounts with their card settings
    /// attached, in opening order.
    #[must_use]
    pub fn list_accounts(&self, user: UserId) -> Vec<AccountView> {
        self.ledger
            .accounts_of(user)
            .into_iter()
            .map(|account| {
                let card_settings = self.cards.get(&account.number);
                AccountView {
                    account,
                    card_settings,
                }
            })
            .collect()
    }

    /// Returns an account's records, newest-first, optionally capped.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not resolve for the
    /// caller's user.
    pub fn history(
        &self,
        user: UserId,
        account: &AccountNumber,
        limit: Option<usize>,
    ) -> Result<Vec<TransactionRecord>, MovementError> {
        let number = self.ledger.resolve_for_user(user, Some(account))?;
        self.ledger.history(&number, limit)
    }

    /// Returns the current balance of one of the caller's accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not resolve for the
    /// caller's user.
    pub fn balance(
        &self,
        user: UserId,
        account: &AccountNumber,
    ) -> Result<Decimal, MovementError> {
        let number = self.ledger.resolve_for_user(user, Some(account))?;
        Ok(self.ledger.account(&number)?.balance)
    }

    /// Returns the card settings for one of the caller's accounts.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not resolve for the
    /// caller's user.
    pub fn card_settings(
        &self,
        user: UserId,
        account: &AccountNumber,
    ) -> Result<CardSettings, MovementError> {
        let number = self.ledger.resolve_for_user(user, Some(account))?;
        Ok(self.cards.get(&number))
    }

    /// Merges a partial settings update into one of the caller's accounts
    /// and returns the resulting full settings.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not resolve for the
    /// caller's user.
    pub fn update_card_settings(
        &self,
        user: UserId,
        account: &AccountNumber,
        update: &CardSettingsUpdate,
    ) -> Result<CardSettings, MovementError> {
        let number = self.ledger.resolve_for_user(user, Some(account))?;
        Ok(self.cards.update(&number, update))
    }
}
