use serde::{Deserialize, Serialize};

use super::account::Account;
use super::settings::Settings;
use super::transaction::Transaction;

/// The persisted data container: accounts, the transaction log and settings.
///
/// Transactions are kept in insertion order; every reducer re-sorts by
/// date itself, and equal dates keep this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub settings: Settings,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == tx_id)
    }

    /// Transactions belonging to one account, in ledger order.
    pub fn transactions_for_account(&self, account_id: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect()
    }
}
