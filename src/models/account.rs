//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards, etc.).
//! The balance is stored on the account and kept in step with its
//! transactions by the ledger services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccountType {
    /// Checking account
    #[default]
    Checking,
    /// Savings account
    Savings,
    /// Credit card
    #[serde(rename = "Credit Card")]
    CreditCard,
    /// Investment account
    Investment,
    /// Other account type
    Other,
}

impl AccountType {
    /// All account types, in display order
    pub const ALL: [AccountType; 5] = [
        Self::Checking,
        Self::Savings,
        Self::CreditCard,
        Self::Investment,
        Self::Other,
    ];

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit card" | "credit_card" | "creditcard" => Some(Self::CreditCard),
            "investment" => Some(Self::Investment),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Cash"); not required to be unique
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance; may be negative (e.g. a credit card)
    pub balance: Money,

    /// When the account was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with an opening balance
    pub fn new(name: impl Into<String>, account_type: AccountType, balance: Money) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Cash", AccountType::Checking, Money::from_units(1000));
        assert_eq!(account.name, "Cash");
        assert_eq!(account.account_type, AccountType::Checking);
        assert_eq!(account.balance.cents(), 100_000);
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("SAVINGS"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("Credit Card"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("invalid"), None);
    }

    #[test]
    fn test_account_type_serializes_with_display_names() {
        let json = serde_json::to_string(&AccountType::CreditCard).unwrap();
        assert_eq!(json, "\"Credit Card\"");
        let parsed: AccountType = serde_json::from_str("\"Investment\"").unwrap();
        assert_eq!(parsed, AccountType::Investment);
    }

    #[test]
    fn test_serialized_field_names() {
        let account = Account::new("Bank", AccountType::Savings, Money::zero());
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["type"], "Savings");
        assert_eq!(value["balance"], 0);
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_display() {
        let account = Account::new("My Bank", AccountType::Savings, Money::zero());
        assert_eq!(format!("{}", account), "My Bank (Savings)");
    }
}
