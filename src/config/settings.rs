//! User settings for Bookkeeper
//!
//! Display preferences, the validators new journal entries start with, and
//! the tag patterns and schemas used by the financial statements.

use serde::{Deserialize, Serialize};

use super::paths::BookkeeperPaths;
use crate::error::BookkeeperError;
use crate::models::Validator;
use crate::reports::{BalanceSheetTags, IncomeStatementTags, ReportSchema};
use crate::storage::write_json_atomic;

/// User settings for Bookkeeper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Validators attached to journal entries that do not name their own
    #[serde(default = "default_validators")]
    pub default_validators: Vec<Validator>,

    #[serde(default)]
    pub balance_sheet_tags: BalanceSheetTags,

    #[serde(default)]
    pub income_statement_tags: IncomeStatementTags,

    #[serde(default = "ReportSchema::default_balance_sheet")]
    pub balance_sheet_schema: ReportSchema,

    #[serde(default = "ReportSchema::default_income_statement")]
    pub income_statement_schema: ReportSchema,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y/%m/%d".to_string()
}

fn default_validators() -> Vec<Validator> {
    vec![Validator::TransferMatch]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_validators: default_validators(),
            balance_sheet_tags: BalanceSheetTags::default(),
            income_statement_tags: IncomeStatementTags::default(),
            balance_sheet_schema: ReportSchema::default_balance_sheet(),
            income_statement_schema: ReportSchema::default_income_statement(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BookkeeperPaths) -> Result<Self, BookkeeperError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BookkeeperError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BookkeeperError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not saved here; `init` decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BookkeeperPaths) -> Result<(), BookkeeperError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Format a date with the configured format
    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_validators, vec![Validator::TransferMatch]);
        assert!(settings.balance_sheet_tags.assets.contains(&"taxable+liquid".to_string()));
        assert!(settings.income_statement_tags.taxes.contains(&"Taxes/".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.default_validators = vec![Validator::zero_balance("Payroll")];

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_validators, vec![Validator::zero_balance("Payroll")]);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"currency_symbol": "£", "default_validators": ["zero_balance:Cash"]}"#)
                .unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.date_format, "%Y/%m/%d");
        assert_eq!(settings.balance_sheet_tags, BalanceSheetTags::default());
        assert_eq!(settings.income_statement_schema, ReportSchema::default_income_statement());
    }

    #[test]
    fn test_unknown_validator_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookkeeperPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"default_validators": ["balanced"]}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BookkeeperError::Config(_))
        ));
    }

    #[test]
    fn test_format_date() {
        let settings = Settings::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(settings.format_date(date), "2024/03/01");
    }
}
