//! Demo dataset.
//!
//! Loads one demo user with two accounts, their history, card settings,
//! savings goals, and beneficiaries so the demo client has data to show.
//! Everything goes through the stores' normal constructors; record
//! timestamps are offsets from now so the history always looks recent.

use chrono::{DateTime, Duration, Utc};
use meridian_shared::types::{AccountNumber, Currency, GoalId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::auth::{PasswordError, hash_password};
use crate::beneficiary::{BeneficiaryStore, NewBeneficiary};
use crate::card::{CardSettings, CardSettingsStore};
use crate::ledger::account::{Account, AccountType};
use crate::ledger::record::{Category, Direction, TransactionRecord};
use crate::ledger::store::LedgerStore;
use crate::savings::{SavingsGoal, SavingsGoalStore};
use crate::user::{NewUser, UserError, UserStore};

/// Demo login email.
pub const DEMO_EMAIL: &str = "seif@example.com";
/// Demo login password.
pub const DEMO_PASSWORD: &str = "SecurePass123!";

/// Errors from loading the demo dataset.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Hashing the demo password failed.
    #[error(transparent)]
    Password(#[from] PasswordError),
    /// The demo user already exists (dataset loaded twice).
    #[error(transparent)]
    User(#[from] UserError),
}

/// Loads the demo dataset into the given stores.
///
/// Returns the demo user's id.
///
/// # Errors
///
/// Returns `SeedError` if the demo user already exists or the password
/// hash cannot be produced.
pub fn seed_demo_data(
    users: &UserStore,
    ledger: &LedgerStore,
    cards: &CardSettingsStore,
    goals: &SavingsGoalStore,
    beneficiaries: &BeneficiaryStore,
) -> Result<UserId, SeedError> {
    let user = users.register(NewUser {
        email: DEMO_EMAIL.into(),
        display_name: "Seif Alaa".into(),
        phone: "+201001234567".into(),
        password_hash: hash_password(DEMO_PASSWORD)?,
    })?;

    let primary = AccountNumber::from("12345678901234");
    let business = AccountNumber::from("99887766554433");

    ledger.open_account_with_history(
        user.id,
        Account::new(
            primary.clone(),
            AccountType::Savings,
            Currency::Egp,
            "Primary Card",
            Decimal::new(50_000_00, 2),
        ),
        primary_history(),
    );
    ledger.open_account_with_history(
        user.id,
        Account::new(
            business.clone(),
            AccountType::Checking,
            Currency::Egp,
            "Business Card",
            Decimal::new(12_500_50, 2),
        ),
        business_history(),
    );

    cards.set(
        primary,
        CardSettings {
            is_frozen: false,
            online_purchases: true,
            international_transactions: true,
            contactless_payments: true,
            spending_limit: Some(Decimal::from(50_000)),
        },
    );
    cards.set(
        business,
        CardSettings {
            is_frozen: false,
            online_purchases: true,
            international_transactions: false,
            contactless_payments: true,
            spending_limit: Some(Decimal::from(25_000)),
        },
    );

    for (name, icon, target, current) in [
        ("Dream Vacation", "vacation", 30_000, 12_500),
        ("Emergency Fund", "emergency", 50_000, 35_000),
        ("New Car", "car", 200_000, 45_000),
    ] {
        goals.insert(
            user.id,
            SavingsGoal {
                id: GoalId::new(),
                name: name.into(),
                icon: icon.into(),
                target_amount: Decimal::from(target),
                current_amount: Decimal::from(current),
            },
        );
    }

    for (name, account_number, bank, nickname, is_favorite) in [
        ("Mohamed Ali", "9876543210123456", "CIB", "Brother", true),
        ("Sara Ahmed", "5555666677778888", "QNB", "Mom", true),
        ("Landlord Office", "1111222233334444", "NBE", "Rent", false),
        ("Fatma Hassan", "4444333322221111", "HSBC", "Sister", true),
        ("Omar Khaled", "7777888899990000", "Banque Misr", "Best Friend", false),
        ("Youssef Mahmoud", "1234123412341234", "Alex Bank", "Colleague", false),
        ("Nour El-Din", "9999000011112222", "Arab African Bank", "Trainer", false),
        ("Laila Mostafa", "6666777788889999", "Faisal Islamic Bank", "Wife", true),
    ] {
        beneficiaries.create(
            user.id,
            NewBeneficiary {
                name: name.into(),
                account_number: AccountNumber::from(account_number),
                bank: bank.into(),
                nickname: nickname.into(),
                is_favorite,
            },
        );
    }

    Ok(user.id)
}

fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// Newest-first history for the primary account.
fn primary_history() -> Vec<TransactionRecord> {
    let rows: [(i64, Direction, Category, i64, &str); 12] = [
        (1, Direction::Credit, Category::Deposit, 15_000, "Salary"),
        (3, Direction::Debit, Category::Bill, 450, "Electricity Bill"),
        (6, Direction::Debit, Category::Transfer, 2_500, "Transfer to Mohamed Ali"),
        (9, Direction::Debit, Category::Shopping, 1_800, "Amazon Purchase"),
        (11, Direction::Credit, Category::Deposit, 5_000, "Card Deposit"),
        (13, Direction::Debit, Category::Food, 320, "Restaurant - Lucille"),
        (16, Direction::Debit, Category::Entertainment, 150, "Netflix Subscription"),
        (20, Direction::Debit, Category::Transport, 500, "Uber Rides"),
        (23, Direction::Credit, Category::Deposit, 15_000, "Salary"),
        (26, Direction::Debit, Category::Bill, 350, "Internet Bill"),
        (31, Direction::Debit, Category::Health, 800, "Pharmacy"),
        (36, Direction::Debit, Category::Shopping, 3_500, "Zara Clothes"),
    ];
    rows.into_iter()
        .map(|(days, direction, category, amount, description)| {
            TransactionRecord::at(
                days_ago(days),
                direction,
                category,
                Decimal::from(amount),
                description,
            )
        })
        .collect()
}

/// Newest-first history for the business account.
fn business_history() -> Vec<TransactionRecord> {
    let rows: [(i64, Direction, Category, i64, &str); 4] = [
        (2, Direction::Credit, Category::Deposit, 8_000, "Business Payment"),
        (4, Direction::Debit, Category::Transfer, 3_000, "Supplier Payment"),
        (7, Direction::Debit, Category::Bill, 1_200, "Office Rent"),
        (11, Direction::Credit, Category::Deposit, 5_500, "Client Payment"),
    ];
    rows.into_iter()
        .map(|(days, direction, category, amount, description)| {
            TransactionRecord::at(
                days_ago(days),
                direction,
                category,
                Decimal::from(amount),
                description,
            )
        })
        .collect()
}
