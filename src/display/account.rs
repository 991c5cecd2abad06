//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use tabled::Tabled;

use crate::models::{Account, Money};

use super::{money, render_table};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format a list of accounts with a total row
pub fn format_account_list(accounts: &[Account], currency_code: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let mut rows: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            id: a.id.to_string(),
            name: a.name.clone(),
            account_type: a.account_type.to_string(),
            balance: money(a.balance, currency_code),
        })
        .collect();

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    rows.push(AccountRow {
        id: String::new(),
        name: "TOTAL".to_string(),
        account_type: String::new(),
        balance: money(total, currency_code),
    });

    render_table(rows, &[3])
}

/// Format a single account for detail view
pub fn format_account_details(account: &Account, transaction_count: usize, currency_code: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:           {}\n", account.id));
    output.push_str(&format!("  Type:         {}\n", account.account_type));
    output.push_str(&format!("  Balance:      {}\n", money(account.balance, currency_code)));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));
    output.push_str(&format!(
        "  Created:      {}\n",
        account.created_at.format("%Y-%m-%d %H:%M")
    ));
    output
}
