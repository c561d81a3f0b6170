//! Per-account card settings.
//!
//! Settings are consulted by the policy gate and mutated only through the
//! explicit settings-update operation; money movement never touches them.

use dashmap::DashMap;
use meridian_shared::types::AccountNumber;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Card policy configuration for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettings {
    /// When true, every movement against the account is blocked.
    pub is_frozen: bool,
    /// Channel toggle. Recorded but not enforced by any operation.
    pub online_purchases: bool,
    /// Channel toggle. Recorded but not enforced by any operation.
    pub international_transactions: bool,
    /// Channel toggle. Recorded but not enforced by any operation.
    pub contactless_payments: bool,
    /// Per-transaction ceiling for debits. `None` means unlimited.
    pub spending_limit: Option<Decimal>,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            is_frozen: false,
            online_purchases: true,
            international_transactions: true,
            contactless_payments: true,
            spending_limit: None,
        }
    }
}

/// Partial settings update.
///
/// Only the provided fields are changed; the rest are retained. The
/// spending limit is doubly optional so a caller can set it (`Some(v)`),
/// clear it (`Some(None)` from JSON `null`), or leave it alone (`None`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettingsUpdate {
    /// New frozen flag, if provided.
    pub is_frozen: Option<bool>,
    /// New online-purchases toggle, if provided.
    pub online_purchases: Option<bool>,
    /// New international-transactions toggle, if provided.
    pub international_transactions: Option<bool>,
    /// New contactless toggle, if provided.
    pub contactless_payments: Option<bool>,
    /// New spending limit, if provided. `Some(None)` clears the limit.
    #[serde(default, with = "double_option")]
    pub spending_limit: Option<Option<Decimal>>,
}

impl CardSettings {
    /// Applies a partial update, returning the merged settings.
    #[must_use]
    pub fn merged_with(mut self, update: &CardSettingsUpdate) -> Self {
        if let Some(is_frozen) = update.is_frozen {
            self.is_frozen = is_frozen;
        }
        if let Some(online_purchases) = update.online_purchases {
            self.online_purchases = online_purchases;
        }
        if let Some(international) = update.international_transactions {
            self.international_transactions = international;
        }
        if let Some(contactless) = update.contactless_payments {
            self.contactless_payments = contactless;
        }
        if let Some(spending_limit) = update.spending_limit {
            self.spending_limit = spending_limit;
        }
        self
    }
}

/// Distinguishes a missing JSON field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// In-memory store of card settings keyed by account number.
///
/// Accounts without an entry get `CardSettings::default()`. Ownership is
/// not this store's concern; callers resolve the account first.
#[derive(Debug, Default)]
pub struct CardSettingsStore {
    settings: DashMap<AccountNumber, CardSettings>,
}

impl CardSettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the settings for an account, defaults if unset.
    #[must_use]
    pub fn get(&self, account: &AccountNumber) -> CardSettings {
        self.settings
            .get(account)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Replaces the settings for an account (seeding and registration).
    pub fn set(&self, account: AccountNumber, settings: CardSettings) {
        self.settings.insert(account, settings);
    }

    /// Merges a partial update into the account's settings and returns the
    /// resulting full settings.
    pub fn update(&self, account: &AccountNumber, update: &CardSettingsUpdate) -> CardSettings {
        let mut entry = self.settings.entry(account.clone()).or_default();
        let merged = entry.clone().merged_with(update);
        *entry = merged.clone();
        merged
    }
}
