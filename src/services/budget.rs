//! Budget service
//!
//! Budgets are upserted per (category, month): setting a budget for a pair
//! that already has one replaces its amount.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money, Month, TransactionKind};
use crate::session::{LedgerEvent, Session};
use crate::storage::Backend;

/// Service for monthly budgets
pub struct BudgetService<'a, B: Backend> {
    session: &'a mut Session<B>,
}

/// Result of an upsert
#[derive(Debug, Clone)]
pub struct BudgetUpsert {
    pub budget: Budget,
    /// False when an existing budget's amount was replaced
    pub created: bool,
}

impl<'a, B: Backend> BudgetService<'a, B> {
    /// Create a new budget service
    pub fn new(session: &'a mut Session<B>) -> Self {
        Self { session }
    }

    /// Set the cap for an expense category in a month
    ///
    /// Any amount is accepted; zero means no spending is allowed.
    pub fn upsert(&mut self, category: &str, amount: Money, month: Month) -> LedgerResult<BudgetUpsert> {
        if !self
            .session
            .categories()
            .contains(TransactionKind::Expense, category)
        {
            return Err(LedgerError::validation(
                "category",
                format!("'{}' is not a valid expense category", category),
            ));
        }

        self.session.commit(|state| {
            let result = match state.budget_index(category, month) {
                Some(index) => {
                    state.budgets[index].amount = amount;
                    BudgetUpsert {
                        budget: state.budgets[index].clone(),
                        created: false,
                    }
                }
                None => {
                    let budget = Budget::new(category, amount, month);
                    state.budgets.push(budget.clone());
                    BudgetUpsert {
                        budget,
                        created: true,
                    }
                }
            };

            let event = LedgerEvent::BudgetSaved {
                budget_id: result.budget.id,
                created: result.created,
            };
            Ok((result, event))
        })
    }

    pub fn get(&self, category: &str, month: Month) -> Option<&Budget> {
        self.session
            .budgets()
            .iter()
            .find(|b| b.is_for(category, month))
    }

    /// Budgets for one month, in creation order
    pub fn list(&self, month: Month) -> Vec<&Budget> {
        self.session.state().budgets_for(month)
    }
}
