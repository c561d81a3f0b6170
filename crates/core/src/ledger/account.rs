//! Account domain types.

use meridian_shared::types::{AccountNumber, Currency};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Savings account.
    Savings,
    /// Checking account.
    Checking,
}

/// A balance-bearing account owned by a single user.
///
/// The identity is the account number; everything but `balance` is fixed at
/// creation. `balance` is mutated exclusively by the ledger store's movement
/// primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The account number (unique, immutable).
    pub number: AccountNumber,
    /// The account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// The account currency.
    pub currency: Currency,
    /// Display name shown on the card ("Primary Card").
    pub display_name: String,
    /// Current balance. Never negative.
    pub balance: Decimal,
}

impl Account {
    /// Creates a new account with an opening balance.
    #[must_use]
    pub fn new(
        number: AccountNumber,
        account_type: AccountType,
        currency: Currency,
        display_name: impl Into<String>,
        opening_balance: Decimal,
    ) -> Self {
        Self {
            number,
            account_type,
            currency,
            display_name: display_name.into(),
            balance: opening_balance,
        }
    }
}

/// Issues a fresh random 14-digit account number.
///
/// The first digit is non-zero so the number keeps its printed width.
#[must_use]
pub fn generate_account_number() -> AccountNumber {
    let mut rng = rand::rng();
    let number: u64 = rng.random_range(10_000_000_000_000..100_000_000_000_000);
    AccountNumber::new(number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_account_carries_opening_balance() {
        let account = Account::new(
            AccountNumber::from("12345678901234"),
            AccountType::Savings,
            Currency::Egp,
            "Primary Card",
            dec!(50000),
        );
        assert_eq!(account.balance, dec!(50000));
        assert_eq!(account.display_name, "Primary Card");
    }

    #[test]
    fn test_generated_account_number_is_14_digits() {
        for _ in 0..32 {
            let number = generate_account_number();
            assert_eq!(number.as_str().len(), 14);
            assert!(number.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generated_account_numbers_differ() {
        let a = generate_account_number();
        let b = generate_account_number();
        assert_ne!(a, b);
    }
}
