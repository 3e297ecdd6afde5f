use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::transaction::Transaction;

/// Portable JSON snapshot of accounts and transactions.
///
/// Same shape as the backups the web app wrote, so those restore as-is.
/// Settings are not part of a backup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerBackup {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

impl LedgerBackup {
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize backup: {e}")))
    }

    /// Both `accounts` and `transactions` must be present.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `assetflow_backup_2024-01-31.json`, or `assetflow_auto_backup_…` for
/// scheduled backups.
pub fn backup_file_name(date: NaiveDate, automatic: bool) -> String {
    let prefix = if automatic { "auto_" } else { "" };
    format!("assetflow_{prefix}backup_{}.json", date.format("%Y-%m-%d"))
}
