//! Transfer service
//!
//! Provides business logic for transfers between accounts.
//! Transfers create linked transaction pairs - an expense leg on the source
//! account and an income leg on the destination account - sharing one
//! transfer ID.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, Money, Transaction, TransactionKind, TransferId, TRANSFER_CATEGORY};
use crate::session::{LedgerEvent, Session};
use crate::storage::Backend;

use super::{ensure_funds, ensure_positive};

/// Service for managing transfers between accounts
pub struct TransferService<'a, B: Backend> {
    session: &'a mut Session<B>,
}

#[derive(Debug, Clone)]
pub struct TransferInput {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: String,
}

/// Result of creating a transfer
#[derive(Debug, Clone)]
pub struct TransferResult {
    pub transfer_id: TransferId,
    /// The expense leg (from source account)
    pub from_transaction: Transaction,
    /// The income leg (to destination account)
    pub to_transaction: Transaction,
}

impl<'a, B: Backend> TransferService<'a, B> {
    /// Create a new transfer service
    pub fn new(session: &'a mut Session<B>) -> Self {
        Self { session }
    }

    /// Move funds between two different accounts
    pub fn transfer(&mut self, input: TransferInput) -> LedgerResult<TransferResult> {
        ensure_positive("amount", input.amount)?;

        self.session.commit(|state| {
            if input.from_account_id == input.to_account_id {
                let name = state
                    .account(input.from_account_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| input.from_account_id.to_string());
                return Err(LedgerError::SameAccount(name));
            }

            let from_index = state
                .account_index(input.from_account_id)
                .ok_or_else(|| LedgerError::account_not_found(input.from_account_id.to_string()))?;
            let to_index = state
                .account_index(input.to_account_id)
                .ok_or_else(|| LedgerError::account_not_found(input.to_account_id.to_string()))?;

            ensure_funds(&state.accounts[from_index], input.amount)?;

            let transfer_id = TransferId::new();
            let mut from_txn = Transaction::transfer_leg(
                TransactionKind::Expense,
                transfer_id,
                input.from_account_id,
                input.date,
                input.amount,
                TRANSFER_CATEGORY,
                format!("Transfer to {}", state.accounts[to_index].name),
            );
            from_txn.notes.clone_from(&input.notes);

            let mut to_txn = Transaction::transfer_leg(
                TransactionKind::Income,
                transfer_id,
                input.to_account_id,
                input.date,
                input.amount,
                TRANSFER_CATEGORY,
                format!("Transfer from {}", state.accounts[from_index].name),
            );
            to_txn.notes = input.notes;

            state.accounts[from_index].balance -= input.amount;
            state.accounts[to_index].balance += input.amount;
            state.transactions.push(from_txn.clone());
            state.transactions.push(to_txn.clone());

            Ok((
                TransferResult {
                    transfer_id,
                    from_transaction: from_txn,
                    to_transaction: to_txn,
                },
                LedgerEvent::TransferCompleted {
                    transfer_id,
                    from_account_id: input.from_account_id,
                    to_account_id: input.to_account_id,
                },
            ))
        })
    }

    /// Both legs of a transfer or savings contribution
    pub fn legs(&self, transfer_id: TransferId) -> Vec<&Transaction> {
        self.session.state().transfer_legs(transfer_id)
    }

    /// Remove both legs of a plain transfer, reversing their effects
    ///
    /// Savings contribution legs are refused: goal progress cannot be
    /// wound back.
    pub fn delete_transfer(&mut self, transfer_id: TransferId) -> LedgerResult<Vec<Transaction>> {
        self.session.commit(|state| {
            let legs: Vec<Transaction> = state
                .transfer_legs(transfer_id)
                .into_iter()
                .cloned()
                .collect();

            if legs.is_empty() {
                return Err(LedgerError::transfer_not_found(transfer_id.to_string()));
            }
            if legs.iter().any(|t| t.is_savings_leg()) {
                return Err(LedgerError::validation(
                    "transfer",
                    "savings contributions cannot be deleted as transfers",
                ));
            }

            for leg in &legs {
                if let Some(index) = state.account_index(leg.account_id) {
                    state.accounts[index].balance -= leg.balance_effect();
                }
            }
            state
                .transactions
                .retain(|t| t.transfer_id != Some(transfer_id));

            let mut accounts: Vec<AccountId> = legs.iter().map(|t| t.account_id).collect();
            accounts.dedup();
            Ok((
                legs,
                LedgerEvent::TransferDeleted {
                    transfer_id,
                    accounts,
                },
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::savings::{ContributionInput, SavingsService};
    use crate::services::test_support::{balance, date, seed_account, session, units};

    fn transfer_input(from: AccountId, to: AccountId, amount: i64) -> TransferInput {
        TransferInput {
            from_account_id: from,
            to_account_id: to,
            amount: units(amount),
            date: date(2025, 1, 15),
            notes: "Monthly savings".into(),
        }
    }

    #[test]
    fn test_create_transfer() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 1000);
        let bank = seed_account(&mut session, "Bank", 0);

        let result = TransferService::new(&mut session)
            .transfer(transfer_input(cash, bank, 300))
            .unwrap();

        assert_eq!(balance(&session, cash), units(700));
        assert_eq!(balance(&session, bank), units(300));
        assert_eq!(session.transactions().len(), 2);

        let from = &result.from_transaction;
        let to = &result.to_transaction;
        assert_eq!(from.kind, TransactionKind::Expense);
        assert_eq!(to.kind, TransactionKind::Income);
        assert!(from.transfer && to.transfer);
        assert_eq!(from.transfer_id, Some(result.transfer_id));
        assert_eq!(to.transfer_id, Some(result.transfer_id));
        assert_eq!(from.category, "Transfer");
        assert_eq!(from.label, "Transfer to Bank");
        assert_eq!(to.label, "Transfer from Cash");
        assert_eq!(to.notes, "Monthly savings");
        assert_ne!(from.id, to.id);
    }

    #[test]
    fn test_transfer_is_balance_neutral() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 1000);
        let bank = seed_account(&mut session, "Bank", -50);
        let before = balance(&session, cash) + balance(&session, bank);

        TransferService::new(&mut session)
            .transfer(transfer_input(cash, bank, 999))
            .unwrap();

        assert_eq!(balance(&session, cash) + balance(&session, bank), before);
    }

    #[test]
    fn test_transfer_to_same_account_fails() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 1000);

        let err = TransferService::new(&mut session)
            .transfer(transfer_input(cash, cash, 10))
            .unwrap_err();

        assert!(matches!(err, LedgerError::SameAccount(name) if name == "Cash"));
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_transfer_rejections_leave_state() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 100);
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = TransferService::new(&mut session);

        assert!(service.transfer(transfer_input(cash, bank, 0)).unwrap_err().is_validation());
        assert!(service
            .transfer(transfer_input(cash, AccountId::new(), 10))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .transfer(transfer_input(AccountId::new(), bank, 10))
            .unwrap_err()
            .is_not_found());
        assert!(matches!(
            service.transfer(transfer_input(cash, bank, 101)),
            Err(LedgerError::InsufficientFunds { .. })
        ));

        assert_eq!(balance(&session, cash), units(100));
        assert_eq!(balance(&session, bank), units(0));
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_legs_and_delete_transfer() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 1000);
        let bank = seed_account(&mut session, "Bank", 0);
        let mut service = TransferService::new(&mut session);
        let result = service.transfer(transfer_input(cash, bank, 300)).unwrap();

        assert_eq!(service.legs(result.transfer_id).len(), 2);

        let removed = service.delete_transfer(result.transfer_id).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(balance(&session, cash), units(1000));
        assert_eq!(balance(&session, bank), units(0));
        assert!(session.transactions().is_empty());

        assert!(TransferService::new(&mut session)
            .delete_transfer(result.transfer_id)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_transfer_refuses_savings_legs() {
        let mut session = session();
        let cash = seed_account(&mut session, "Cash", 1000);
        let bank = seed_account(&mut session, "Bank", 0);
        let mut savings = SavingsService::new(&mut session);
        let goal = savings
            .add_goal("Laptop", units(5000), date(2025, 12, 31), bank)
            .unwrap();
        let contribution = savings
            .contribute(ContributionInput {
                goal_id: goal.id,
                from_account_id: cash,
                amount: units(100),
                date: date(2025, 1, 1),
                notes: String::new(),
            })
            .unwrap();

        let err = TransferService::new(&mut session)
            .delete_transfer(contribution.transfer_id)
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(session.transactions().len(), 2);
    }
}
