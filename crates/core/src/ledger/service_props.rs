//! Property-based tests for the movement service.
//!
//! These check the ledger's cross-cutting guarantees under arbitrary
//! operation sequences: balances are conserved, history replays to the
//! balance, and a frozen card blocks every operation without a trace.

use std::sync::Arc;

use meridian_shared::types::{AccountNumber, Currency, GoalId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::account::{Account, AccountType};
use super::service::MovementService;
use super::store::LedgerStore;
use super::types::{
    BillPaymentRequest, DepositRequest, SavingsContributionRequest, TransferRequest,
};
use crate::card::{CardSettingsStore, CardSettingsUpdate};
use crate::savings::{NewSavingsGoal, SavingsGoalStore};

const OPENING_BALANCE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// One generated movement.
#[derive(Debug, Clone)]
enum Op {
    Deposit(Decimal),
    Transfer(Decimal),
    Bill(Decimal),
    Savings(Decimal),
}

/// Amounts from 0.01 to 5,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount().prop_map(Op::Deposit),
        amount().prop_map(Op::Transfer),
        amount().prop_map(Op::Bill),
        amount().prop_map(Op::Savings),
    ]
}

struct Fixture {
    service: MovementService,
    goals: Arc<SavingsGoalStore>,
    user: UserId,
    number: AccountNumber,
    goal: GoalId,
}

fn fixture() -> Fixture {
    let ledger = Arc::new(LedgerStore::new());
    let cards = Arc::new(CardSettingsStore::new());
    let goals = Arc::new(SavingsGoalStore::new());

    let user = UserId::new();
    let number = AccountNumber::from("12345678901234");
    ledger.open_account(
        user,
        Account::new(
            number.clone(),
            AccountType::Savings,
            Currency::Egp,
            "Primary Card",
            OPENING_BALANCE,
        ),
    );
    let goal = goals
        .create(
            user,
            NewSavingsGoal {
                name: "Emergency Fund".into(),
                icon: "emergency".into(),
                target_amount: Decimal::from(50_000),
            },
        )
        .id;

    Fixture {
        service: MovementService::new(ledger, cards, Arc::clone(&goals)),
        goals,
        user,
        number,
        goal,
    }
}

impl Fixture {
    fn apply(&self, op: &Op) -> Result<Decimal, super::error::MovementError> {
        match op {
            Op::Deposit(amount) => self
                .service
                .deposit(
                    self.user,
                    &DepositRequest {
                        account: None,
                        amount: *amount,
                    },
                )
                .map(|r| r.new_balance),
            Op::Transfer(amount) => self
                .service
                .transfer(
                    self.user,
                    &TransferRequest {
                        from_account: None,
                        recipient: "9876543210123456".into(),
                        amount: *amount,
                    },
                )
                .map(|r| r.new_balance),
            Op::Bill(amount) => self
                .service
                .pay_bill(
                    self.user,
                    &BillPaymentRequest {
                        account: None,
                        provider: "WE Internet".into(),
                        bill_reference: "42".into(),
                        amount: *amount,
                        description: None,
                    },
                )
                .map(|r| r.new_balance),
            Op::Savings(amount) => self
                .service
                .contribute_to_goal(
                    self.user,
                    &SavingsContributionRequest {
                        goal: self.goal,
                        account: None,
                        amount: *amount,
                    },
                )
                .map(|r| r.movement.new_balance),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any operation sequence, the balance equals the opening balance
    /// plus successful credits minus successful debits, and never goes
    /// negative.
    #[test]
    fn prop_balance_conservation(ops in prop::collection::vec(op(), 1..40)) {
        let fx = fixture();
        let mut expected = OPENING_BALANCE;

        for op in &ops {
            let outcome = fx.apply(op);
            if outcome.is_ok() {
                match op {
                    Op::Deposit(amount) => expected += *amount,
                    Op::Transfer(amount) | Op::Bill(amount) | Op::Savings(amount) => {
                        expected -= *amount;
                    }
                }
            }
            prop_assert!(expected >= Decimal::ZERO);
        }

        let balance = fx.service.balance(fx.user, &fx.number).unwrap();
        prop_assert_eq!(balance, expected);
    }

    /// Replaying the history from the opening balance reproduces the
    /// current balance exactly.
    #[test]
    fn prop_history_replays_to_balance(ops in prop::collection::vec(op(), 1..40)) {
        let fx = fixture();
        for op in &ops {
            let _ = fx.apply(op);
        }

        let history = fx.service.history(fx.user, &fx.number, None).unwrap();
        let replayed: Decimal = OPENING_BALANCE
            + history.iter().map(super::record::TransactionRecord::signed_amount).sum::<Decimal>();

        prop_assert_eq!(replayed, fx.service.balance(fx.user, &fx.number).unwrap());
    }

    /// Successful savings contributions are mirrored one-to-one in the
    /// goal's current amount.
    #[test]
    fn prop_goal_mirrors_successful_contributions(
        amounts in prop::collection::vec(amount(), 1..20)
    ) {
        let fx = fixture();
        let mut funded = Decimal::ZERO;

        for amount in &amounts {
            let outcome = fx.apply(&Op::Savings(*amount));
            if outcome.is_ok() {
                funded += *amount;
            }
        }

        let goals = fx.goals.goals_of(fx.user);
        prop_assert_eq!(goals[0].current_amount, funded);
        prop_assert_eq!(
            fx.service.balance(fx.user, &fx.number).unwrap(),
            OPENING_BALANCE - funded
        );
    }

    /// With a frozen card, every operation fails and neither the balance
    /// nor the history changes.
    #[test]
    fn prop_frozen_blocks_everything(ops in prop::collection::vec(op(), 1..20)) {
        let fx = fixture();
        fx.service
            .update_card_settings(
                fx.user,
                &fx.number,
                &CardSettingsUpdate {
                    is_frozen: Some(true),
                    ..CardSettingsUpdate::default()
                },
            )
            .unwrap();

        for op in &ops {
            let outcome = fx.apply(op);
            prop_assert!(matches!(
                outcome,
                Err(super::error::MovementError::CardFrozen)
            ));
        }

        prop_assert_eq!(
            fx.service.balance(fx.user, &fx.number).unwrap(),
            OPENING_BALANCE
        );
        prop_assert!(fx.service.history(fx.user, &fx.number, None).unwrap().is_empty());
    }

    /// A spending limit bounds every successful debit, and limit denials
    /// carry the configured limit.
    #[test]
    fn prop_limit_bounds_debits(
        limit in (1i64..100_000i64).prop_map(|c| Decimal::new(c, 2)),
        ops in prop::collection::vec(op(), 1..20),
    ) {
        let fx = fixture();
        fx.service
            .update_card_settings(
                fx.user,
                &fx.number,
                &CardSettingsUpdate {
                    spending_limit: Some(Some(limit)),
                    ..CardSettingsUpdate::default()
                },
            )
            .unwrap();

        for op in &ops {
            let outcome = fx.apply(op);
            if let (Op::Transfer(amount) | Op::Bill(amount) | Op::Savings(amount), Err(err)) =
                (op, &outcome)
            {
                if *amount > limit {
                    let limit_exceeded = matches!(
                        err,
                        super::error::MovementError::LimitExceeded { limit: l, .. } if *l == limit
                    );
                    prop_assert!(limit_exceeded);
                }
            }
        }

        let history = fx.service.history(fx.user, &fx.number, None).unwrap();
        for record in history
            .iter()
            .filter(|r| r.direction == super::record::Direction::Debit)
        {
            prop_assert!(record.amount <= limit);
        }
    }
}
