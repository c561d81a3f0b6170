//! End-to-end movement scenarios through the public service API.

use std::sync::Arc;

use meridian_shared::types::{AccountNumber, Currency, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use meridian_core::card::{CardSettings, CardSettingsStore, CardSettingsUpdate};
use meridian_core::ledger::{
    Account, AccountType, BillPaymentRequest, DepositRequest, LedgerStore, MovementError,
    MovementService, SavingsContributionRequest, TransferRequest,
};
use meridian_core::savings::{NewSavingsGoal, SavingsGoalStore};

struct Bank {
    service: MovementService,
    cards: Arc<CardSettingsStore>,
    goals: Arc<SavingsGoalStore>,
    user: UserId,
    number: AccountNumber,
}

fn bank_with_balance(balance: Decimal) -> Bank {
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
            balance,
        ),
    );

    Bank {
        service: MovementService::new(ledger, Arc::clone(&cards), Arc::clone(&goals)),
        cards,
        goals,
        user,
        number,
    }
}

#[test]
fn deposit_grows_balance_and_appends_one_credit_record() {
    let bank = bank_with_balance(dec!(50000));

    let receipt = bank
        .service
        .deposit(
            bank.user,
            &DepositRequest {
                account: None,
                amount: dec!(15000),
            },
        )
        .unwrap();

    assert_eq!(receipt.new_balance, dec!(65000));
    let history = bank.service.history(bank.user, &bank.number, None).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, dec!(15000));
}

#[test]
fn transfer_over_spending_limit_is_blocked_with_both_amounts() {
    let bank = bank_with_balance(dec!(50000));
    bank.cards.set(
        bank.number.clone(),
        CardSettings {
            spending_limit: Some(dec!(25000)),
            ..CardSettings::default()
        },
    );

    let result = bank.service.transfer(
        bank.user,
        &TransferRequest {
            from_account: None,
            recipient: "9876543210123456".into(),
            amount: dec!(30000),
        },
    );

    match result {
        Err(MovementError::LimitExceeded { limit, amount }) => {
            assert_eq!(limit, dec!(25000));
            assert_eq!(amount, dec!(30000));
        }
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
    assert_eq!(bank.service.balance(bank.user, &bank.number).unwrap(), dec!(50000));
    assert!(bank.service.history(bank.user, &bank.number, None).unwrap().is_empty());
}

#[test]
fn debit_of_exactly_the_limit_succeeds() {
    let bank = bank_with_balance(dec!(50000));
    bank.cards.set(
        bank.number.clone(),
        CardSettings {
            spending_limit: Some(dec!(1000)),
            ..CardSettings::default()
        },
    );

    let receipt = bank
        .service
        .transfer(
            bank.user,
            &TransferRequest {
                from_account: None,
                recipient: "x".into(),
                amount: dec!(1000),
            },
        )
        .unwrap();
    assert_eq!(receipt.new_balance, dec!(49000));

    let result = bank.service.transfer(
        bank.user,
        &TransferRequest {
            from_account: None,
            recipient: "x".into(),
            amount: dec!(1000.01),
        },
    );
    assert!(matches!(result, Err(MovementError::LimitExceeded { .. })));
}

#[test]
fn debit_of_the_full_balance_leaves_zero() {
    let bank = bank_with_balance(dec!(500));

    let receipt = bank
        .service
        .transfer(
            bank.user,
            &TransferRequest {
                from_account: None,
                recipient: "x".into(),
                amount: dec!(500),
            },
        )
        .unwrap();
    assert_eq!(receipt.new_balance, dec!(0));
}

#[test]
fn debit_one_cent_over_balance_is_insufficient_funds() {
    let bank = bank_with_balance(dec!(500));

    let result = bank.service.transfer(
        bank.user,
        &TransferRequest {
            from_account: None,
            recipient: "x".into(),
            amount: dec!(500.01),
        },
    );

    assert!(matches!(result, Err(MovementError::InsufficientFunds)));
    assert_eq!(bank.service.balance(bank.user, &bank.number).unwrap(), dec!(500));
}

#[test]
fn frozen_card_blocks_bill_payment_without_a_trace() {
    let bank = bank_with_balance(dec!(10000));
    bank.cards.set(
        bank.number.clone(),
        CardSettings {
            is_frozen: true,
            ..CardSettings::default()
        },
    );

    let result = bank.service.pay_bill(
        bank.user,
        &BillPaymentRequest {
            account: None,
            provider: "Egyptian Electricity".into(),
            bill_reference: "4471".into(),
            amount: dec!(500),
            description: None,
        },
    );

    assert!(matches!(result, Err(MovementError::CardFrozen)));
    assert_eq!(bank.service.balance(bank.user, &bank.number).unwrap(), dec!(10000));
    assert!(bank.service.history(bank.user, &bank.number, None).unwrap().is_empty());
}

#[test]
fn frozen_card_blocks_every_operation() {
    let bank = bank_with_balance(dec!(10000));
    let goal = bank.goals.create(
        bank.user,
        NewSavingsGoal {
            name: "Dream Vacation".into(),
            icon: "vacation".into(),
            target_amount: dec!(30000),
        },
    );
    bank.cards.set(
        bank.number.clone(),
        CardSettings {
            is_frozen: true,
            ..CardSettings::default()
        },
    );

    let deposit = bank.service.deposit(
        bank.user,
        &DepositRequest {
            account: None,
            amount: dec!(100),
        },
    );
    let transfer = bank.service.transfer(
        bank.user,
        &TransferRequest {
            from_account: None,
            recipient: "x".into(),
            amount: dec!(100),
        },
    );
    let bill = bank.service.pay_bill(
        bank.user,
        &BillPaymentRequest {
            account: None,
            provider: "WE Internet".into(),
            bill_reference: "1".into(),
            amount: dec!(100),
            description: None,
        },
    );
    let savings = bank.service.contribute_to_goal(
        bank.user,
        &SavingsContributionRequest {
            goal: goal.id,
            account: None,
            amount: dec!(100),
        },
    );

    assert!(matches!(deposit, Err(MovementError::CardFrozen)));
    assert!(matches!(transfer, Err(MovementError::CardFrozen)));
    assert!(matches!(bill, Err(MovementError::CardFrozen)));
    assert!(matches!(savings, Err(MovementError::CardFrozen)));
    assert_eq!(bank.service.balance(bank.user, &bank.number).unwrap(), dec!(10000));
    assert!(bank.service.history(bank.user, &bank.number, None).unwrap().is_empty());
}

#[test]
fn failed_savings_debit_leaves_goal_untouched() {
    let bank = bank_with_balance(dec!(100));
    let goal = bank.goals.create(
        bank.user,
        NewSavingsGoal {
            name: "Emergency Fund".into(),
            icon: "emergency".into(),
            target_amount: dec!(50000),
        },
    );

    let result = bank.service.contribute_to_goal(
        bank.user,
        &SavingsContributionRequest {
            goal: goal.id,
            account: None,
            amount: dec!(150),
        },
    );

    assert!(matches!(result, Err(MovementError::InsufficientFunds)));
    assert_eq!(bank.goals.goals_of(bank.user)[0].current_amount, dec!(0));
}

#[test]
fn settings_update_merges_shallowly() {
    let bank = bank_with_balance(dec!(1000));
    bank.cards.set(
        bank.number.clone(),
        CardSettings {
            is_frozen: false,
            online_purchases: true,
            international_transactions: true,
            contactless_payments: true,
            spending_limit: Some(dec!(50000)),
        },
    );

    let updated = bank
        .service
        .update_card_settings(
            bank.user,
            &bank.number,
            &CardSettingsUpdate {
                is_frozen: Some(true),
                ..CardSettingsUpdate::default()
            },
        )
        .unwrap();

    assert!(updated.is_frozen);
    assert_eq!(updated.spending_limit, Some(dec!(50000)));
    assert!(updated.online_purchases);
    assert!(updated.international_transactions);
    assert!(updated.contactless_payments);
}

#[test]
fn unfreezing_restores_movement() {
    let bank = bank_with_balance(dec!(1000));
    bank.cards.set(
        bank.number.clone(),
        CardSettings {
            is_frozen: true,
            ..CardSettings::default()
        },
    );

    assert!(matches!(
        bank.service.deposit(
            bank.user,
            &DepositRequest {
                account: None,
                amount: dec!(100),
            },
        ),
        Err(MovementError::CardFrozen)
    ));

    bank.service
        .update_card_settings(
            bank.user,
            &bank.number,
            &CardSettingsUpdate {
                is_frozen: Some(false),
                ..CardSettingsUpdate::default()
            },
        )
        .unwrap();

    let receipt = bank
        .service
        .deposit(
            bank.user,
            &DepositRequest {
                account: None,
                amount: dec!(100),
            },
        )
        .unwrap();
    assert_eq!(receipt.new_balance, dec!(1100));
}

#[test]
fn balances_replay_from_history_after_mixed_operations() {
    let bank = bank_with_balance(dec!(10000));
    let goal = bank.goals.create(
        bank.user,
        NewSavingsGoal {
            name: "New Car".into(),
            icon: "car".into(),
            target_amount: dec!(200000),
        },
    );

    bank.service
        .deposit(
            bank.user,
            &DepositRequest {
                account: None,
                amount: dec!(2500),
            },
        )
        .unwrap();
    bank.service
        .transfer(
            bank.user,
            &TransferRequest {
                from_account: None,
                recipient: "9876543210123456".into(),
                amount: dec!(1200),
            },
        )
        .unwrap();
    bank.service
        .pay_bill(
            bank.user,
            &BillPaymentRequest {
                account: None,
                provider: "Cairo Water Company".into(),
                bill_reference: "7".into(),
                amount: dec!(450),
                description: None,
            },
        )
        .unwrap();
    bank.service
        .contribute_to_goal(
            bank.user,
            &SavingsContributionRequest {
                goal: goal.id,
                account: None,
                amount: dec!(800),
            },
        )
        .unwrap();

    let balance = bank.service.balance(bank.user, &bank.number).unwrap();
    assert_eq!(balance, dec!(10050));

    let history = bank.service.history(bank.user, &bank.number, None).unwrap();
    let replayed: Decimal = dec!(10000)
        + history
            .iter()
            .map(meridian_core::ledger::TransactionRecord::signed_amount)
            .sum::<Decimal>();
    assert_eq!(replayed, balance);
}

#[test]
fn concurrent_transfers_on_one_account_never_overdraw() {
    let bank = bank_with_balance(dec!(1000));
    let service = bank.service.clone();
    let user = bank.user;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            std::thread::spawn(move || {
                let mut succeeded = 0u32;
                for _ in 0..50 {
                    let result = service.transfer(
                        user,
                        &TransferRequest {
                            from_account: None,
                            recipient: "x".into(),
                            amount: dec!(10),
                        },
                    );
                    if result.is_ok() {
                        succeeded += 1;
                    }
                }
                succeeded
            })
        })
        .collect();

    let succeeded: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    // 1000 / 10 = at most 100 transfers can ever succeed.
    assert_eq!(succeeded, 100);
    let balance = bank.service.balance(bank.user, &bank.number).unwrap();
    assert_eq!(balance, dec!(0));
    assert_eq!(
        bank.service
            .history(bank.user, &bank.number, None)
            .unwrap()
            .len(),
        100
    );
}
