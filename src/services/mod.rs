//! Service layer for HomeLedger
//!
//! Each service borrows a [`Session`](crate::session::Session) for one
//! operation. Operations validate everything first, then mutate a working
//! copy through `Session::commit`, so they either fully apply and persist
//! or leave the ledger untouched.

pub mod account;
pub mod budget;
pub mod savings;
pub mod transaction;
pub mod transfer;
pub mod user;

pub use account::{AccountDeletion, AccountService, AccountUpdate};
pub use budget::{BudgetService, BudgetUpsert};
pub use savings::{ContributionInput, ContributionResult, GoalUpdate, SavingsService};
pub use transaction::{TransactionInput, TransactionService, TransactionUpdate};
pub use transfer::{TransferInput, TransferResult, TransferService};
pub use user::UserService;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, Money};

/// Reject zero and negative amounts
pub(crate) fn ensure_positive(field: &'static str, amount: Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::validation(field, "must be greater than zero"))
    }
}

/// Reject a charge larger than the account balance
pub(crate) fn ensure_funds(account: &Account, amount: Money) -> LedgerResult<()> {
    if account.balance < amount {
        Err(LedgerError::InsufficientFunds {
            account: account.name.clone(),
            needed: amount,
            available: account.balance,
        })
    } else {
        Ok(())
    }
}

/// Reject blank required text
pub(crate) fn ensure_present(field: &'static str, value: &str) -> LedgerResult<()> {
    if value.trim().is_empty() {
        Err(LedgerError::validation(field, "is required"))
    } else {
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("amount", Money::from_cents(1)).is_ok());
        assert!(ensure_positive("amount", Money::zero()).unwrap_err().is_validation());
        assert!(ensure_positive("amount", Money::from_cents(-5)).is_err());
    }

    #[test]
    fn test_ensure_funds_allows_exact_balance() {
        let account = Account::new("Cash", AccountType::Checking, Money::from_units(100));
        assert!(ensure_funds(&account, Money::from_units(100)).is_ok());
        assert!(matches!(
            ensure_funds(&account, Money::from_cents(10_001)),
            Err(LedgerError::InsufficientFunds { .. })
        ));
    }
}
