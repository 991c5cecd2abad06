//! Change notifications
//!
//! Every committed mutation queues one [`LedgerChange`] on its session.
//! Presenters drain the queue and re-query whatever the event touches.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::{AccountId, BudgetId, SavingsGoalId, TransactionId, TransferId};

/// Types of entities a change can affect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Account,
    Transaction,
    Budget,
    SavingsGoal,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Account => write!(f, "Account"),
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Budget => write!(f, "Budget"),
            EntityType::SavingsGoal => write!(f, "SavingsGoal"),
        }
    }
}

/// What a committed operation changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LedgerEvent {
    AccountAdded {
        account_id: AccountId,
    },
    AccountUpdated {
        account_id: AccountId,
    },
    AccountDeleted {
        account_id: AccountId,
        transactions_removed: usize,
        goals_removed: usize,
    },
    TransactionAdded {
        transaction_id: TransactionId,
        account_id: AccountId,
    },
    TransactionUpdated {
        transaction_id: TransactionId,
        /// The previous and current owning accounts (one entry if unchanged)
        accounts: Vec<AccountId>,
    },
    TransactionDeleted {
        transaction_id: TransactionId,
        account_id: AccountId,
    },
    TransferCompleted {
        transfer_id: TransferId,
        from_account_id: AccountId,
        to_account_id: AccountId,
    },
    TransferDeleted {
        transfer_id: TransferId,
        accounts: Vec<AccountId>,
    },
    BudgetSaved {
        budget_id: BudgetId,
        created: bool,
    },
    GoalAdded {
        goal_id: SavingsGoalId,
    },
    GoalUpdated {
        goal_id: SavingsGoalId,
    },
    GoalDeleted {
        goal_id: SavingsGoalId,
    },
    ContributionMade {
        goal_id: SavingsGoalId,
        transfer_id: TransferId,
        from_account_id: AccountId,
        to_account_id: AccountId,
    },
}

impl LedgerEvent {
    /// The primary entity type touched
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::AccountAdded { .. } | Self::AccountUpdated { .. } | Self::AccountDeleted { .. } => {
                EntityType::Account
            }
            Self::TransactionAdded { .. }
            | Self::TransactionUpdated { .. }
            | Self::TransactionDeleted { .. }
            | Self::TransferCompleted { .. }
            | Self::TransferDeleted { .. } => EntityType::Transaction,
            Self::BudgetSaved { .. } => EntityType::Budget,
            Self::GoalAdded { .. }
            | Self::GoalUpdated { .. }
            | Self::GoalDeleted { .. }
            | Self::ContributionMade { .. } => EntityType::SavingsGoal,
        }
    }

    /// Accounts whose balance or record may have changed
    pub fn affected_accounts(&self) -> Vec<AccountId> {
        match self {
            Self::AccountAdded { account_id }
            | Self::AccountUpdated { account_id }
            | Self::AccountDeleted { account_id, .. }
            | Self::TransactionAdded { account_id, .. }
            | Self::TransactionDeleted { account_id, .. } => vec![*account_id],
            Self::TransactionUpdated { accounts, .. } | Self::TransferDeleted { accounts, .. } => {
                accounts.clone()
            }
            Self::TransferCompleted {
                from_account_id,
                to_account_id,
                ..
            }
            | Self::ContributionMade {
                from_account_id,
                to_account_id,
                ..
            } => {
                if from_account_id == to_account_id {
                    vec![*from_account_id]
                } else {
                    vec![*from_account_id, *to_account_id]
                }
            }
            Self::BudgetSaved { .. }
            | Self::GoalAdded { .. }
            | Self::GoalUpdated { .. }
            | Self::GoalDeleted { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountAdded { account_id } => write!(f, "account {} added", account_id),
            Self::AccountUpdated { account_id } => write!(f, "account {} updated", account_id),
            Self::AccountDeleted {
                account_id,
                transactions_removed,
                goals_removed,
            } => write!(
                f,
                "account {} deleted ({} transactions, {} goals removed)",
                account_id, transactions_removed, goals_removed
            ),
            Self::TransactionAdded { transaction_id, .. } => {
                write!(f, "transaction {} added", transaction_id)
            }
            Self::TransactionUpdated { transaction_id, .. } => {
                write!(f, "transaction {} updated", transaction_id)
            }
            Self::TransactionDeleted { transaction_id, .. } => {
                write!(f, "transaction {} deleted", transaction_id)
            }
            Self::TransferCompleted { transfer_id, .. } => write!(f, "transfer {} completed", transfer_id),
            Self::TransferDeleted { transfer_id, .. } => write!(f, "transfer {} deleted", transfer_id),
            Self::BudgetSaved { budget_id, created } => {
                let verb = if *created { "created" } else { "updated" };
                write!(f, "budget {} {}", budget_id, verb)
            }
            Self::GoalAdded { goal_id } => write!(f, "goal {} added", goal_id),
            Self::GoalUpdated { goal_id } => write!(f, "goal {} updated", goal_id),
            Self::GoalDeleted { goal_id } => write!(f, "goal {} deleted", goal_id),
            Self::ContributionMade {
                goal_id,
                transfer_id,
                ..
            } => write!(f, "contribution {} to goal {}", transfer_id, goal_id),
        }
    }
}

/// A queued event with the revision it produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerChange {
    pub revision: u64,
    pub committed_at: DateTime<Utc>,
    pub event: LedgerEvent,
}
