//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, SavingsGoalId};
use super::money::Money;

/// A savings target held in one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    /// Unique identifier
    pub id: SavingsGoalId,

    /// Goal name (e.g., "Emergency fund")
    pub name: String,

    /// Amount to reach; always positive
    pub target: Money,

    /// Amount contributed so far; only grows through contributions
    pub current: Money,

    /// Target date
    pub deadline: NaiveDate,

    /// The account holding the savings
    pub account_id: AccountId,

    /// When the goal was created
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Create a new goal with nothing saved yet
    pub fn new(
        name: impl Into<String>,
        target: Money,
        deadline: NaiveDate,
        account_id: AccountId,
    ) -> Self {
        Self {
            id: SavingsGoalId::new(),
            name: name.into(),
            target,
            current: Money::zero(),
            deadline,
            account_id,
            created_at: Utc::now(),
        }
    }

    /// Progress towards the target as a percentage (may exceed 100)
    pub fn progress_percentage(&self) -> f64 {
        super::money::percentage_of(self.current, self.target).unwrap_or(0.0)
    }

    /// Amount still needed to reach the target (never negative)
    pub fn remaining(&self) -> Money {
        if self.current >= self.target {
            Money::zero()
        } else {
            self.target - self.current
        }
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / {}", self.name, self.current, self.target)
    }
}
