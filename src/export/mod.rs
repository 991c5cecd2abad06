//! Export module for HomeLedger
//!
//! CSV exports of transactions, budget usage and savings goals
//! (spreadsheet-compatible).

pub mod csv;

pub use self::csv::{export_budgets_csv, export_goals_csv, export_transactions_csv};

use crate::models::Month;

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Transactions,
    Budgets,
    Goals,
}

/// Default output file name, e.g. `transactions_2025-01.csv`
pub fn default_filename(kind: ExportKind, month: Month) -> String {
    match kind {
        ExportKind::Transactions => format!("transactions_{}.csv", month),
        ExportKind::Budgets => format!("budgets_{}.csv", month),
        ExportKind::Goals => "savings_goals.csv".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filenames() {
        let month = Month::new(2025, 3).unwrap();
        assert_eq!(default_filename(ExportKind::Transactions, month), "transactions_2025-03.csv");
        assert_eq!(default_filename(ExportKind::Budgets, month), "budgets_2025-03.csv");
        assert_eq!(default_filename(ExportKind::Goals, month), "savings_goals.csv");
    }
}
