//! HomeLedger - personal finance ledger
//!
//! This library provides the core of the HomeLedger application: accounts,
//! income and expense transactions, monthly budgets and savings goals for a
//! single signed-in user, kept mutually consistent across every edit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, budgets, goals, ...)
//! - `storage`: Key-value persistence backends and the per-user entity store
//! - `session`: The signed-in user's loaded ledger and its commit protocol
//! - `services`: Mutating ledger operations (business logic layer)
//! - `reports`: Read-only queries and aggregations
//! - `export`: CSV export
//! - `display`, `cli`: Terminal presentation used by the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use homeledger::models::{AccountType, Money};
//! use homeledger::services::AccountService;
//! use homeledger::session::Session;
//! use homeledger::storage::{EntityStore, MemoryBackend};
//!
//! let mut session = Session::open(user_id, EntityStore::new(MemoryBackend::new()), categories);
//! AccountService::new(&mut session).add_account("Cash", AccountType::Checking, Money::from_units(500))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
