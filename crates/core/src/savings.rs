//! Savings goals funded from accounts.

use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use meridian_shared::types::{GoalId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::error::MovementError;
use crate::ledger::types::MovementReceipt;

/// A named savings target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    /// Unique goal ID.
    pub id: GoalId,
    /// Goal name ("Dream Vacation").
    pub name: String,
    /// Icon hint for the client.
    pub icon: String,
    /// The amount the user wants to reach.
    pub target_amount: Decimal,
    /// The amount contributed so far.
    pub current_amount: Decimal,
}

/// Input for creating a goal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    /// Goal name.
    pub name: String,
    /// Icon hint for the client.
    pub icon: String,
    /// The amount the user wants to reach.
    pub target_amount: Decimal,
}

/// In-memory store of savings goals keyed by user.
#[derive(Debug, Default)]
pub struct SavingsGoalStore {
    goals: DashMap<UserId, Mutex<Vec<SavingsGoal>>>,
}

impl SavingsGoalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's goals in creation order.
    #[must_use]
    pub fn goals_of(&self, owner: UserId) -> Vec<SavingsGoal> {
        self.goals
            .get(&owner)
            .map(|goals| lock(&goals).clone())
            .unwrap_or_default()
    }

    /// Creates a goal starting at zero.
    pub fn create(&self, owner: UserId, input: NewSavingsGoal) -> SavingsGoal {
        let goal = SavingsGoal {
            id: GoalId::new(),
            name: input.name,
            icon: input.icon,
            target_amount: input.target_amount,
            current_amount: Decimal::ZERO,
        };
        self.insert(owner, goal.clone());
        goal
    }

    /// Inserts an existing goal (seeding).
    pub fn insert(&self, owner: UserId, goal: SavingsGoal) {
        lock(&self.goals.entry(owner).or_default()).push(goal);
    }

    /// Funds a goal with the outcome of `debit`.
    ///
    /// The goal is resolved before the debit runs, and its entry stays
    /// locked across the debit, so a failed debit leaves the goal untouched
    /// and a successful debit is always paired with the goal increase.
    ///
    /// # Errors
    ///
    /// Returns `GoalNotFound` if the goal does not resolve for this user,
    /// or the debit's error if the funding step fails.
    pub fn contribute(
        &self,
        owner: UserId,
        goal_id: GoalId,
        amount: Decimal,
        debit: impl FnOnce() -> Result<MovementReceipt, MovementError>,
    ) -> Result<(SavingsGoal, MovementReceipt), MovementError> {
        let goals = self
            .goals
            .get(&owner)
            .ok_or(MovementError::GoalNotFound(goal_id))?;
        let mut goals = lock(&goals);
        let goal = goals
            .iter_mut()
            .find(|goal| goal.id == goal_id)
            .ok_or(MovementError::GoalNotFound(goal_id))?;

        let receipt = debit()?;
        goal.current_amount += amount;
        Ok((goal.clone(), receipt))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
