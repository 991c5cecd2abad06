//! Transaction model
//!
//! Represents income and expense records. Transfers and savings
//! contributions are stored as two correlated legs: an expense on the source
//! account and an income on the destination account.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, SavingsGoalId, TransactionId, TransferId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming into an account
    Income,
    /// Money leaving an account
    Expense,
}

impl TransactionKind {
    /// Apply this kind's sign to an unsigned amount
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }

    /// Parse a kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Amount, always strictly positive; the sign comes from `kind`
    pub amount: Money,

    /// Calendar day the transaction happened
    pub date: NaiveDate,

    /// Category name ("Transfer" / "Savings" for system-generated legs)
    pub category: String,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Income source or expense description
    pub label: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Whether this is one leg of a transfer or savings contribution
    #[serde(default)]
    pub transfer: bool,

    /// Shared by both legs of the same transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<TransferId>,

    /// Set on both legs of a savings contribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal_id: Option<SavingsGoalId>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new user-entered transaction
    pub fn new(
        kind: TransactionKind,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            date,
            category: category.into(),
            account_id,
            label: label.into(),
            notes: String::new(),
            transfer: false,
            transfer_id: None,
            savings_goal_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create one leg of a transfer
    pub fn transfer_leg(
        kind: TransactionKind,
        transfer_id: TransferId,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(kind, account_id, date, amount, category, label);
        txn.transfer = true;
        txn.transfer_id = Some(transfer_id);
        txn
    }

    /// Signed effect on the owning account's balance
    pub fn balance_effect(&self) -> Money {
        self.kind.signed(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check if this is a savings-contribution leg
    pub fn is_savings_leg(&self) -> bool {
        self.savings_goal_id.is_some()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(f, "{} {} {}{}", self.date, self.label, sign, self.amount)
    }
}
