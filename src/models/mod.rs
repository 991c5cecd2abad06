//! Core data models for HomeLedger
//!
//! This module contains all the data structures that represent the ledger
//! domain: accounts, transactions, budgets, savings goals and users.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod period;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use category::{CategorySet, SAVINGS_CATEGORY, TRANSFER_CATEGORY};
pub use goal::SavingsGoal;
pub use ids::{AccountId, BudgetId, SavingsGoalId, TransactionId, TransferId, UserId};
pub use ledger::LedgerState;
pub use money::{Money, DEFAULT_CURRENCY_CODE};
pub use period::Month;
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
