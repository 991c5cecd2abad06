//! Transaction display formatting

use tabled::Tabled;

use crate::models::{LedgerState, Transaction, TransactionKind};

use super::{money, render_table};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    label: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn signed_amount(txn: &Transaction, currency_code: &str) -> String {
    let sign = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    format!("{}{}", sign, money(txn.amount, currency_code))
}

fn account_name<'a>(state: &'a LedgerState, txn: &Transaction) -> &'a str {
    state
        .account(txn.account_id)
        .map(|a| a.name.as_str())
        .unwrap_or("Unknown Account")
}

/// Format transactions as a table, in the order given
pub fn format_transaction_list(
    state: &LedgerState,
    transactions: &[&Transaction],
    currency_code: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: t.date.format(date_format).to_string(),
            label: t.label.clone(),
            category: t.category.clone(),
            account: account_name(state, t).to_string(),
            amount: signed_amount(t, currency_code),
        })
        .collect();

    render_table(rows, &[5])
}

/// Format a single transaction for detail view
pub fn format_transaction_details(state: &LedgerState, txn: &Transaction, currency_code: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Date:        {}\n", txn.date));
    output.push_str(&format!("  Description: {}\n", txn.label));
    output.push_str(&format!("  Amount:      {}\n", signed_amount(txn, currency_code)));
    output.push_str(&format!("  Category:    {}\n", txn.category));
    output.push_str(&format!("  Account:     {}\n", account_name(state, txn)));
    if !txn.notes.is_empty() {
        output.push_str(&format!("  Notes:       {}\n", txn.notes));
    }
    if let Some(transfer_id) = txn.transfer_id {
        output.push_str(&format!("  Transfer:    {}\n", transfer_id));
    }
    if let Some(goal_id) = txn.savings_goal_id {
        output.push_str(&format!("  Goal:        {}\n", goal_id));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountId, AccountType, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_list_shows_signed_amounts() {
        let mut state = LedgerState::default();
        let cash = Account::new("Cash", AccountType::Checking, Money::zero());
        let cash_id = cash.id;
        state.accounts.push(cash);
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        state.transactions.push(Transaction::new(
            TransactionKind::Expense,
            cash_id,
            day,
            Money::from_units(20),
            "Food",
            "Lunch",
        ));
        state.transactions.push(Transaction::new(
            TransactionKind::Income,
            AccountId::new(),
            day,
            Money::from_units(5),
            "Gifts",
            "Birthday",
        ));

        let refs: Vec<&Transaction> = state.transactions.iter().collect();
        let output = format_transaction_list(&state, &refs, "KES", "%Y-%m-%d");

        assert!(output.contains("-KES 20.00"));
        assert!(output.contains("+KES 5.00"));
        assert!(output.contains("Unknown Account"));
        assert!(output.contains("2025-01-05"));
    }

    #[test]
    fn test_empty_list() {
        let state = LedgerState::default();
        assert_eq!(
            format_transaction_list(&state, &[], "KES", "%Y-%m-%d"),
            "No transactions found."
        );
    }
}
