//! Savings goal service
//!
//! Goals track progress towards a target held in one account. A
//! contribution moves funds into the goal's account and raises the goal's
//! progress in the same commit.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AccountId, Money, SavingsGoal, SavingsGoalId, Transaction, TransactionKind, TransferId,
    SAVINGS_CATEGORY,
};
use crate::session::{LedgerEvent, Session};
use crate::storage::Backend;

use super::{ensure_funds, ensure_positive, ensure_present};

/// Service for savings goals
pub struct SavingsService<'a, B: Backend> {
    session: &'a mut Session<B>,
}

/// Fields to replace on an existing goal; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target: Option<Money>,
    pub deadline: Option<NaiveDate>,
    pub account_id: Option<AccountId>,
}

#[derive(Debug, Clone)]
pub struct ContributionInput {
    pub goal_id: SavingsGoalId,
    pub from_account_id: AccountId,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: String,
}

/// Result of a contribution
#[derive(Debug, Clone)]
pub struct ContributionResult {
    pub transfer_id: TransferId,
    pub goal: SavingsGoal,
    /// The expense leg (from the funding account)
    pub from_transaction: Transaction,
    /// The income leg (to the goal's account)
    pub to_transaction: Transaction,
}

impl<'a, B: Backend> SavingsService<'a, B> {
    /// Create a new savings service
    pub fn new(session: &'a mut Session<B>) -> Self {
        Self { session }
    }

    /// Create a goal with nothing saved yet
    ///
    /// The account is not checked here; contributions check it.
    pub fn add_goal(
        &mut self,
        name: &str,
        target: Money,
        deadline: NaiveDate,
        account_id: AccountId,
    ) -> LedgerResult<SavingsGoal> {
        let name = name.trim();
        ensure_present("name", name)?;
        ensure_positive("target", target)?;

        let goal = SavingsGoal::new(name, target, deadline, account_id);
        self.session.commit(|state| {
            state.savings_goals.push(goal.clone());
            Ok((goal.clone(), LedgerEvent::GoalAdded { goal_id: goal.id }))
        })
    }

    /// Replace name, target, deadline and/or account; `current` is kept
    pub fn edit_goal(&mut self, id: SavingsGoalId, update: GoalUpdate) -> LedgerResult<SavingsGoal> {
        if let Some(name) = &update.name {
            ensure_present("name", name)?;
        }
        if let Some(target) = update.target {
            ensure_positive("target", target)?;
        }

        self.session.commit(|state| {
            let index = state
                .goal_index(id)
                .ok_or_else(|| LedgerError::goal_not_found(id.to_string()))?;
            let goal = &mut state.savings_goals[index];

            if let Some(name) = update.name {
                goal.name = name.trim().to_string();
            }
            if let Some(target) = update.target {
                goal.target = target;
            }
            if let Some(deadline) = update.deadline {
                goal.deadline = deadline;
            }
            if let Some(account_id) = update.account_id {
                goal.account_id = account_id;
            }

            Ok((goal.clone(), LedgerEvent::GoalUpdated { goal_id: id }))
        })
    }

    /// Remove a goal; funds already moved stay where they are
    pub fn delete_goal(&mut self, id: SavingsGoalId) -> LedgerResult<SavingsGoal> {
        self.session.commit(|state| {
            let index = state
                .goal_index(id)
                .ok_or_else(|| LedgerError::goal_not_found(id.to_string()))?;
            let goal = state.savings_goals.remove(index);
            Ok((goal, LedgerEvent::GoalDeleted { goal_id: id }))
        })
    }

    /// Move funds into the goal's account and record the progress
    ///
    /// The funding account may be the goal's own account, in which case
    /// the two legs cancel out on the balance.
    pub fn contribute(&mut self, input: ContributionInput) -> LedgerResult<ContributionResult> {
        ensure_positive("amount", input.amount)?;

        self.session.commit(|state| {
            let goal_index = state
                .goal_index(input.goal_id)
                .ok_or_else(|| LedgerError::goal_not_found(input.goal_id.to_string()))?;
            let goal_account_id = state.savings_goals[goal_index].account_id;

            let from_index = state
                .account_index(input.from_account_id)
                .ok_or_else(|| LedgerError::account_not_found(input.from_account_id.to_string()))?;
            let to_index = state
                .account_index(goal_account_id)
                .ok_or_else(|| LedgerError::account_not_found(goal_account_id.to_string()))?;

            ensure_funds(&state.accounts[from_index], input.amount)?;

            let transfer_id = TransferId::new();
            let goal_name = state.savings_goals[goal_index].name.clone();

            let mut from_txn = Transaction::transfer_leg(
                TransactionKind::Expense,
                transfer_id,
                input.from_account_id,
                input.date,
                input.amount,
                SAVINGS_CATEGORY,
                format!("Savings transfer to {}", goal_name),
            );
            from_txn.savings_goal_id = Some(input.goal_id);
            from_txn.notes.clone_from(&input.notes);

            let mut to_txn = Transaction::transfer_leg(
                TransactionKind::Income,
                transfer_id,
                goal_account_id,
                input.date,
                input.amount,
                SAVINGS_CATEGORY,
                format!("Savings transfer from {}", state.accounts[from_index].name),
            );
            to_txn.savings_goal_id = Some(input.goal_id);
            to_txn.notes = input.notes;

            state.accounts[from_index].balance -= input.amount;
            state.accounts[to_index].balance += input.amount;
            state.transactions.push(from_txn.clone());
            state.transactions.push(to_txn.clone());

            let goal = &mut state.savings_goals[goal_index];
            goal.current += input.amount;

            Ok((
                ContributionResult {
                    transfer_id,
                    goal: goal.clone(),
                    from_transaction: from_txn,
                    to_transaction: to_txn,
                },
                LedgerEvent::ContributionMade {
                    goal_id: input.goal_id,
                    transfer_id,
                    from_account_id: input.from_account_id,
                    to_account_id: goal_account_id,
                },
            ))
        })
    }

    pub fn get(&self, id: SavingsGoalId) -> Option<&SavingsGoal> {
        self.session.state().goal(id)
    }

    /// Find a goal by name or ID string
    pub fn find(&self, identifier: &str) -> Option<&SavingsGoal> {
        self.session.state().find_goal(identifier)
    }

    /// Find a goal, failing with NotFound, or Validation when the name is
    /// shared by several goals
    pub fn resolve(&self, identifier: &str) -> LedgerResult<&SavingsGoal> {
        let state = self.session.state();
        if let Some(goal) = state.find_goal(identifier) {
            return Ok(goal);
        }
        match state.goals_named(identifier).len() {
            0 => Err(LedgerError::goal_not_found(identifier)),
            n => Err(LedgerError::validation(
                "goal",
                format!("'{}' matches {} goals; use the goal ID", identifier.trim(), n),
            )),
        }
    }

    pub fn list(&self) -> &[SavingsGoal] {
        self.session.savings_goals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySet, UserId};
    use crate::services::test_support::{balance, date, seed_account, session, units};
    use crate::storage::testing::FailingBackend;
    use crate::storage::EntityStore;

    fn contribution(goal_id: SavingsGoalId, from: AccountId, amount: i64) -> ContributionInput {
        ContributionInput {
            goal_id,
            from_account_id: from,
            amount: units(amount),
            date: date(2025, 2, 1),
            notes: String::new(),
        }
    }

    #[test]
    fn test_contribution_moves_funds_and_progress() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 700);
        let bank = seed_account(&mut session, "Bank", 300);
        let mut service = SavingsService::new(&mut session);
        let goal = service
            .add_goal("Laptop", units(5000), date(2025, 12, 31), bank)
            .unwrap();
        assert!(goal.current.is_zero());

        let result = service.contribute(contribution(goal.id, cash, 300)).unwrap();

        assert_eq!(result.goal.current, units(300));
        assert_eq!(result.from_transaction.label, "Savings transfer to Laptop");
        assert_eq!(result.to_transaction.label, "Savings transfer from Cash");
        assert_eq!(result.from_transaction.category, "Savings");
        assert_eq!(result.to_transaction.savings_goal_id, Some(goal.id));
        assert_eq!(result.from_transaction.transfer_id, Some(result.transfer_id));

        assert_eq!(balance(&session, cash), units(400));
        assert_eq!(balance(&session, bank), units(600));
        assert_eq!(session.savings_goals()[0].current, units(300));
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 100);
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = SavingsService::new(&mut session);
        let goal = service
            .add_goal("Laptop", units(5000), date(2025, 12, 31), bank)
            .unwrap();

        let err = service.contribute(contribution(goal.id, cash, 101)).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(balance(&session, cash), units(100));
        assert_eq!(balance(&session, bank), units(0));
        assert!(session.savings_goals()[0].current.is_zero());
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_contribution_lookups() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 100);
        let mut service = SavingsService::new(&mut session);
        // Goal account never existed
        let orphan = service
            .add_goal("Orphan", units(10), date(2025, 12, 31), AccountId::new())
            .unwrap();

        let err = service
            .contribute(contribution(SavingsGoalId::new(), cash, 1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { entity_type: "Savings goal", .. }));

        let err = service.contribute(contribution(orphan.id, cash, 1)).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { entity_type: "Account", .. }));

        let err = service
            .contribute(contribution(orphan.id, AccountId::new(), 1))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_contribution_from_goal_account() {
        let mut session = session();
        let bank = seed_account(&mut session, "Bank", 500);
        let mut service = SavingsService::new(&mut session);
        let goal = service
            .add_goal("Rainy day", units(1000), date(2026, 1, 1), bank)
            .unwrap();

        service.contribute(contribution(goal.id, bank, 200)).unwrap();

        assert_eq!(balance(&session, bank), units(500));
        assert_eq!(session.savings_goals()[0].current, units(200));
        assert_eq!(session.transactions().len(), 2);
    }

    #[test]
    fn test_failed_save_keeps_goal_progress() {
        let mut session = Session::open(
            UserId::new(),
            EntityStore::new(FailingBackend::new()),
            CategorySet::default(),
        );
        let cash = seed_account(&mut session, "Cash", 500);
        let bank = seed_account(&mut session, "Bank", 0);
        let goal = SavingsService::new(&mut session)
            .add_goal("Laptop", units(5000), date(2025, 12, 31), bank)
            .unwrap();
        session.store_mut().backend_mut().fail_writes_to = Some("savingsGoals");

        let err = SavingsService::new(&mut session)
            .contribute(contribution(goal.id, cash, 100))
            .unwrap_err();

        assert!(err.is_storage());
        assert_eq!(balance(&session, cash), units(500));
        assert!(session.savings_goals()[0].current.is_zero());
        let stored = session.store().load(session.user_id()).unwrap();
        assert!(stored.transactions.is_empty());
        assert_eq!(stored.accounts[0].balance, units(500));
    }

    #[test]
    fn test_add_goal_validation() {
        let mut session = session();
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = SavingsService::new(&mut session);

        assert!(service
            .add_goal("Car", units(0), date(2026, 1, 1), bank)
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_goal("", units(10), date(2026, 1, 1), bank)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_resolve_shared_goal_name_asks_for_id() {
        let mut session = session();
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = SavingsService::new(&mut session);
        let first = service
            .add_goal("Trip", units(100), date(2026, 1, 1), bank)
            .unwrap();
        service
            .add_goal("trip", units(200), date(2026, 6, 1), bank)
            .unwrap();

        let err = service.resolve("Trip").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("matches 2 goals"));
        assert_eq!(service.resolve(&first.id.to_string()).unwrap().id, first.id);
    }

    #[test]
    fn test_edit_goal_keeps_current() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 500);
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = SavingsService::new(&mut session);
        let goal = service
            .add_goal("Laptop", units(5000), date(2025, 12, 31), bank)
            .unwrap();
        service.contribute(contribution(goal.id, cash, 250)).unwrap();

        let edited = service
            .edit_goal(
                goal.id,
                GoalUpdate {
                    name: Some("Desktop".into()),
                    target: Some(units(100)),
                    deadline: Some(date(2026, 3, 1)),
                    account_id: Some(cash),
                },
            )
            .unwrap();

        assert_eq!(edited.name, "Desktop");
        assert_eq!(edited.target, units(100));
        assert_eq!(edited.account_id, cash);
        assert_eq!(edited.current, units(250));
        assert!(service
            .edit_goal(SavingsGoalId::new(), GoalUpdate::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_goal_keeps_funds() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 500);
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = SavingsService::new(&mut session);
        let goal = service
            .add_goal("Laptop", units(5000), date(2025, 12, 31), bank)
            .unwrap();
        service.contribute(contribution(goal.id, cash, 250)).unwrap();

        service.delete_goal(goal.id).unwrap();

        assert!(session.savings_goals().is_empty());
        assert_eq!(balance(&session, bank), units(250));
        assert_eq!(session.transactions().len(), 2);
        assert!(SavingsService::new(&mut session)
            .delete_goal(goal.id)
            .unwrap_err()
            .is_not_found());
    }
}
