//! Transfer beneficiary directory.
//!
//! Purely a directory: transfers accept any opaque recipient identifier
//! and never validate it against this store.

use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use meridian_shared::types::{AccountNumber, BeneficiaryId, UserId};
use serde::{Deserialize, Serialize};

/// A saved transfer recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    /// Unique beneficiary ID.
    pub id: BeneficiaryId,
    /// Recipient's full name.
    pub name: String,
    /// Recipient's account number at their bank.
    pub account_number: AccountNumber,
    /// Recipient's bank name.
    pub bank: String,
    /// Caller-chosen nickname.
    pub nickname: String,
    /// Pinned to the top of the picker.
    pub is_favorite: bool,
}

/// Input for saving a beneficiary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBeneficiary {
    /// Recipient's full name.
    pub name: String,
    /// Recipient's account number at their bank.
    pub account_number: AccountNumber,
    /// Recipient's bank name.
    pub bank: String,
    /// Caller-chosen nickname.
    #[serde(default)]
    pub nickname: String,
    /// Pinned to the top of the picker.
    #[serde(default)]
    pub is_favorite: bool,
}

/// Partial beneficiary update; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryUpdate {
    /// New name, if provided.
    pub name: Option<String>,
    /// New account number, if provided.
    pub account_number: Option<AccountNumber>,
    /// New bank, if provided.
    pub bank: Option<String>,
    /// New nickname, if provided.
    pub nickname: Option<String>,
    /// New favorite flag, if provided.
    pub is_favorite: Option<bool>,
}

/// In-memory beneficiary directory keyed by user.
#[derive(Debug, Default)]
pub struct BeneficiaryStore {
    beneficiaries: DashMap<UserId, Mutex<Vec<Beneficiary>>>,
}

impl BeneficiaryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's beneficiaries in creation order.
    #[must_use]
    pub fn beneficiaries_of(&self, owner: UserId) -> Vec<Beneficiary> {
        self.beneficiaries
            .get(&owner)
            .map(|list| lock(&list).clone())
            .unwrap_or_default()
    }

    /// Saves a new beneficiary.
    pub fn create(&self, owner: UserId, input: NewBeneficiary) -> Beneficiary {
        let beneficiary = Beneficiary {
            id: BeneficiaryId::new(),
            name: input.name,
            account_number: input.account_number,
            bank: input.bank,
            nickname: input.nickname,
            is_favorite: input.is_favorite,
        };
        self.insert(owner, beneficiary.clone());
        beneficiary
    }

    /// Inserts an existing beneficiary (seeding).
    pub fn insert(&self, owner: UserId, beneficiary: Beneficiary) {
        lock(&self.beneficiaries.entry(owner).or_default()).push(beneficiary);
    }

    /// Merges a partial update into a beneficiary.
    ///
    /// Returns the updated beneficiary, or `None` if the id does not
    /// resolve for this user.
    pub fn update(
        &self,
        owner: UserId,
        id: BeneficiaryId,
        update: &BeneficiaryUpdate,
    ) -> Option<Beneficiary> {
        let list = self.beneficiaries.get(&owner)?;
        let mut list = lock(&list);
        let beneficiary = list.iter_mut().find(|b| b.id == id)?;

        if let Some(name) = &update.name {
            beneficiary.name = name.clone();
        }
        if let Some(account_number) = &update.account_number {
            beneficiary.account_number = account_number.clone();
        }
        if let Some(bank) = &update.bank {
            beneficiary.bank = bank.clone();
        }
        if let Some(nickname) = &update.nickname {
            beneficiary.nickname = nickname.clone();
        }
        if let Some(is_favorite) = update.is_favorite {
            beneficiary.is_favorite = is_favorite;
        }
        Some(beneficiary.clone())
    }

    /// Removes a beneficiary. Returns true if one was removed.
    pub fn delete(&self, owner: UserId, id: BeneficiaryId) -> bool {
        let Some(list) = self.beneficiaries.get(&owner) else {
            return false;
        };
        let mut list = lock(&list);
        let before = list.len();
        list.retain(|b| b.id != id);
        list.len() != before
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
