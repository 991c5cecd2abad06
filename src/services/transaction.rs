//! Transaction service
//!
//! Adds, edits and deletes income and expense records while keeping the
//! owning account's balance equal to its opening balance plus the signed
//! sum of its transactions.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, CategorySet, Money, Transaction, TransactionId, TransactionKind};
use crate::session::{LedgerEvent, Session};
use crate::storage::Backend;

use super::{ensure_funds, ensure_positive, ensure_present};

/// Service for income and expense transactions
pub struct TransactionService<'a, B: Backend> {
    session: &'a mut Session<B>,
}

/// Fields for a new income or expense
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Income source or expense description
    pub label: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: String,
    pub account_id: AccountId,
    pub notes: String,
}

/// Fields to replace on an existing transaction; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub label: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub account_id: Option<AccountId>,
    pub notes: Option<String>,
}

fn ensure_category(categories: &CategorySet, kind: TransactionKind, category: &str) -> LedgerResult<()> {
    if categories.contains(kind, category) {
        Ok(())
    } else {
        Err(LedgerError::validation(
            "category",
            format!("'{}' is not a valid {} category", category, kind),
        ))
    }
}

impl<'a, B: Backend> TransactionService<'a, B> {
    /// Create a new transaction service
    pub fn new(session: &'a mut Session<B>) -> Self {
        Self { session }
    }

    /// Record income; the account balance grows by the amount
    pub fn add_income(&mut self, input: TransactionInput) -> LedgerResult<Transaction> {
        self.add(TransactionKind::Income, input)
    }

    /// Record an expense; fails if the account balance is below the amount
    pub fn add_expense(&mut self, input: TransactionInput) -> LedgerResult<Transaction> {
        self.add(TransactionKind::Expense, input)
    }

    fn add(&mut self, kind: TransactionKind, input: TransactionInput) -> LedgerResult<Transaction> {
        let label_field = match kind {
            TransactionKind::Income => "source",
            TransactionKind::Expense => "description",
        };
        ensure_present(label_field, &input.label)?;
        ensure_positive("amount", input.amount)?;
        ensure_category(self.session.categories(), kind, &input.category)?;

        self.session.commit(|state| {
            let index = state
                .account_index(input.account_id)
                .ok_or_else(|| LedgerError::account_not_found(input.account_id.to_string()))?;

            if kind == TransactionKind::Expense {
                ensure_funds(&state.accounts[index], input.amount)?;
            }

            let mut txn = Transaction::new(
                kind,
                input.account_id,
                input.date,
                input.amount,
                input.category,
                input.label.trim(),
            );
            txn.notes = input.notes;

            state.accounts[index].balance += txn.balance_effect();
            state.transactions.push(txn.clone());

            let event = LedgerEvent::TransactionAdded {
                transaction_id: txn.id,
                account_id: txn.account_id,
            };
            Ok((txn, event))
        })
    }

    /// Edit a transaction in place
    ///
    /// On the same account only the signed difference is applied and the
    /// balance is not re-checked. Moving to another account fully reverses
    /// the old effect (when the old account still exists) and applies the
    /// new one; a moved expense must fit the new account's balance.
    pub fn edit(&mut self, id: TransactionId, update: TransactionUpdate) -> LedgerResult<Transaction> {
        if let Some(amount) = update.amount {
            ensure_positive("amount", amount)?;
        }
        if let Some(label) = &update.label {
            ensure_present("label", label)?;
        }
        let categories = self.session.categories().clone();

        self.session.commit(|state| {
            let txn_index = state
                .transaction_index(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            let old = state.transactions[txn_index].clone();

            let mut new = old.clone();
            if let Some(label) = update.label {
                new.label = label.trim().to_string();
            }
            if let Some(amount) = update.amount {
                new.amount = amount;
            }
            if let Some(date) = update.date {
                new.date = date;
            }
            if let Some(category) = update.category {
                ensure_category(&categories, new.kind, &category)?;
                new.category = category;
            }
            if let Some(account_id) = update.account_id {
                new.account_id = account_id;
            }
            if let Some(notes) = update.notes {
                new.notes = notes;
            }

            let new_index = state
                .account_index(new.account_id)
                .ok_or_else(|| LedgerError::account_not_found(new.account_id.to_string()))?;

            if new.account_id == old.account_id {
                state.accounts[new_index].balance += new.balance_effect() - old.balance_effect();
            } else {
                if new.is_expense() {
                    ensure_funds(&state.accounts[new_index], new.amount)?;
                }
                if let Some(old_index) = state.account_index(old.account_id) {
                    state.accounts[old_index].balance -= old.balance_effect();
                }
                state.accounts[new_index].balance += new.balance_effect();
            }

            state.transactions[txn_index] = new.clone();

            let mut accounts = vec![old.account_id];
            if new.account_id != old.account_id {
                accounts.push(new.account_id);
            }
            Ok((
                new,
                LedgerEvent::TransactionUpdated {
                    transaction_id: id,
                    accounts,
                },
            ))
        })
    }

    /// Delete a transaction, reversing its effect if its account still exists
    ///
    /// Only the named record is removed; a transfer's other leg stays.
    pub fn delete(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        self.session.commit(|state| {
            let index = state
                .transaction_index(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            let txn = state.transactions.remove(index);

            if let Some(account_index) = state.account_index(txn.account_id) {
                state.accounts[account_index].balance -= txn.balance_effect();
            }

            let event = LedgerEvent::TransactionDeleted {
                transaction_id: id,
                account_id: txn.account_id,
            };
            Ok((txn, event))
        })
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.session.state().transaction(id)
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> Option<&Transaction> {
        self.session.state().find_transaction(identifier)
    }

    /// Find a transaction, failing with NotFound
    pub fn resolve(&self, identifier: &str) -> LedgerResult<&Transaction> {
        self.find(identifier)
            .ok_or_else(|| LedgerError::transaction_not_found(identifier))
    }

    /// Transactions on one account, in insertion order
    pub fn list_for_account(&self, account_id: AccountId) -> Vec<&Transaction> {
        self.session
            .transactions()
            .iter()
            .filter(|t| t.account_id == account_id)
            .collect()
    }
}
