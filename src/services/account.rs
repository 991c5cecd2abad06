//! Account service
//!
//! Provides account management: creation with an opening balance, manual
//! corrections, and deletion with cascade.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, AccountType, Money};
use crate::session::{LedgerEvent, Session};
use crate::storage::Backend;

use super::ensure_present;

/// Service for account management
pub struct AccountService<'a, B: Backend> {
    session: &'a mut Session<B>,
}

/// Fields to replace on an existing account; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    /// Authoritative override, not a delta
    pub balance: Option<Money>,
}

/// What an account deletion removed
#[derive(Debug, Clone)]
pub struct AccountDeletion {
    pub account: Account,
    pub transactions_removed: usize,
    pub goals_removed: usize,
}

impl<'a, B: Backend> AccountService<'a, B> {
    /// Create a new account service
    pub fn new(session: &'a mut Session<B>) -> Self {
        Self { session }
    }

    /// Create a new account; names need not be unique
    pub fn add_account(
        &mut self,
        name: &str,
        account_type: AccountType,
        balance: Money,
    ) -> LedgerResult<Account> {
        let name = name.trim();
        ensure_present("name", name)?;

        let account = Account::new(name, account_type, balance);
        self.session.commit(|state| {
            state.accounts.push(account.clone());
            Ok((
                account.clone(),
                LedgerEvent::AccountAdded {
                    account_id: account.id,
                },
            ))
        })
    }

    /// Replace name, type and/or balance directly
    pub fn edit_account(&mut self, id: AccountId, update: AccountUpdate) -> LedgerResult<Account> {
        if let Some(name) = &update.name {
            ensure_present("name", name)?;
        }

        self.session.commit(|state| {
            let index = state
                .account_index(id)
                .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;
            let account = &mut state.accounts[index];

            if let Some(name) = update.name {
                account.name = name.trim().to_string();
            }
            if let Some(account_type) = update.account_type {
                account.account_type = account_type;
            }
            if let Some(balance) = update.balance {
                account.balance = balance;
            }

            Ok((account.clone(), LedgerEvent::AccountUpdated { account_id: id }))
        })
    }

    /// Delete an account and everything that references it
    ///
    /// Transactions and savings goals on the account are removed without
    /// balance reversal. The last remaining account cannot be deleted.
    pub fn delete_account(&mut self, id: AccountId) -> LedgerResult<AccountDeletion> {
        self.session.commit(|state| {
            let index = state
                .account_index(id)
                .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;

            if state.accounts.len() == 1 {
                return Err(LedgerError::LastAccount(state.accounts[index].name.clone()));
            }

            let account = state.accounts.remove(index);

            let before = state.transactions.len();
            state.transactions.retain(|t| t.account_id != id);
            let transactions_removed = before - state.transactions.len();

            let before = state.savings_goals.len();
            state.savings_goals.retain(|g| g.account_id != id);
            let goals_removed = before - state.savings_goals.len();

            Ok((
                AccountDeletion {
                    account,
                    transactions_removed,
                    goals_removed,
                },
                LedgerEvent::AccountDeleted {
                    account_id: id,
                    transactions_removed,
                    goals_removed,
                },
            ))
        })
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.session.state().account(id)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> Option<&Account> {
        self.session.state().find_account(identifier)
    }

    /// Find an account, failing with NotFound, or Validation when the
    /// name is shared by several accounts
    pub fn resolve(&self, identifier: &str) -> LedgerResult<&Account> {
        let state = self.session.state();
        if let Some(account) = state.find_account(identifier) {
            return Ok(account);
        }
        match state.accounts_named(identifier).len() {
            0 => Err(LedgerError::account_not_found(identifier)),
            n => Err(LedgerError::validation(
                "account",
                format!("'{}' matches {} accounts; use the account ID", identifier.trim(), n),
            )),
        }
    }

    /// All accounts, in creation order
    pub fn list(&self) -> &[Account] {
        self.session.accounts()
    }

    /// Sum of all balances
    pub fn total_balance(&self) -> Money {
        self.session.accounts().iter().map(|a| a.balance).sum()
    }
}
