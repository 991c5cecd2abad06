//! The four per-user collections
//!
//! `LedgerState` is loaded and saved wholesale. Collections keep insertion
//! order, which is the tie-breaker for every date-ordered view.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::budget::Budget;
use super::goal::SavingsGoal;
use super::ids::{AccountId, SavingsGoalId, TransactionId, TransferId};
use super::period::Month;
use super::transaction::Transaction;

/// One user's accounts, transactions, budgets and savings goals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub savings_goals: Vec<SavingsGoal>,
}

impl LedgerState {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.transactions.is_empty()
            && self.budgets.is_empty()
            && self.savings_goals.is_empty()
    }

    pub fn account_index(&self, id: AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| a.id == id)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Find an account by full ID, then by unique name (case-insensitive),
    /// then by short ID. `None` when several accounts share the name.
    pub fn find_account(&self, identifier: &str) -> Option<&Account> {
        let identifier = identifier.trim();
        if let Ok(id) = AccountId::parse(identifier) {
            return self.account(id);
        }
        match self.accounts_named(identifier).as_slice() {
            [account] => Some(*account),
            [] => self.accounts.iter().find(|a| a.id.matches(identifier)),
            _ => None,
        }
    }

    /// Accounts whose name matches case-insensitively
    pub fn accounts_named(&self, name: &str) -> Vec<&Account> {
        let name = name.trim();
        self.accounts
            .iter()
            .filter(|a| a.name.eq_ignore_ascii_case(name))
            .collect()
    }

    pub fn transaction_index(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Find a transaction by full or short ID
    pub fn find_transaction(&self, identifier: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id.matches(identifier))
    }

    /// Both legs of a transfer, in insertion order
    pub fn transfer_legs(&self, transfer_id: TransferId) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.transfer_id == Some(transfer_id))
            .collect()
    }

    pub fn goal_index(&self, id: SavingsGoalId) -> Option<usize> {
        self.savings_goals.iter().position(|g| g.id == id)
    }

    pub fn goal(&self, id: SavingsGoalId) -> Option<&SavingsGoal> {
        self.savings_goals.iter().find(|g| g.id == id)
    }

    /// Find a goal the same way as [`find_account`](Self::find_account)
    pub fn find_goal(&self, identifier: &str) -> Option<&SavingsGoal> {
        let identifier = identifier.trim();
        if let Ok(id) = SavingsGoalId::parse(identifier) {
            return self.goal(id);
        }
        match self.goals_named(identifier).as_slice() {
            [goal] => Some(*goal),
            [] => self.savings_goals.iter().find(|g| g.id.matches(identifier)),
            _ => None,
        }
    }

    pub fn goals_named(&self, name: &str) -> Vec<&SavingsGoal> {
        let name = name.trim();
        self.savings_goals
            .iter()
            .filter(|g| g.name.eq_ignore_ascii_case(name))
            .collect()
    }

    pub fn budget_index(&self, category: &str, month: Month) -> Option<usize> {
        self.budgets.iter().position(|b| b.is_for(category, month))
    }

    /// Budgets for a month, in insertion order
    pub fn budgets_for(&self, month: Month) -> Vec<&Budget> {
        self.budgets.iter().filter(|b| b.month == month).collect()
    }
}
