//! User settings for HomeLedger
//!
//! Manages display preferences, the log level and the income/expense
//! category sets.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::category::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
use crate::models::{CategorySet, DEFAULT_CURRENCY_CODE};
use crate::storage::write_json_atomic;

/// User settings for HomeLedger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Three-letter code prefixed to every rendered amount
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default log filter when `LEDGER_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_income_categories")]
    pub income_categories: Vec<String>,

    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_code() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_income_categories() -> Vec<String> {
    DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_expense_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_code: default_currency_code(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            income_categories: default_income_categories(),
            expense_categories: default_expense_categories(),
        }
    }
}

impl Settings {
    /// The category sets transactions and budgets are validated against
    pub fn categories(&self) -> CategorySet {
        CategorySet::new(self.income_categories.clone(), self.expense_categories.clone())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
