use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::account::{Account, TaxType};
use crate::models::tax::{TaxLimits, TaxStats};
use crate::models::transaction::{Transaction, TxType};

/// Buckets deposits into tax-advantaged accounts against annual limits.
pub struct TaxService;

impl TaxService {
    pub fn new() -> Self {
        Self
    }

    /// Sum DEPOSITs dated in `reference_date`'s year, by the tax type of
    /// the owning account.
    ///
    /// GENERAL accounts and deposits to unknown accounts are not counted.
    /// Amounts over a limit are reported as-is.
    pub fn get_tax_stats(
        &self,
        transactions: &[Transaction],
        accounts: &[Account],
        reference_date: NaiveDate,
        limits: &TaxLimits,
    ) -> TaxStats {
        let year = reference_date.year();
        let tax_types: HashMap<&str, TaxType> = accounts
            .iter()
            .map(|a| (a.id.as_str(), a.tax_type))
            .collect();

        let mut stats = TaxStats::empty(limits);

        for tx in transactions {
            if tx.tx_type != TxType::Deposit || tx.date.year() != year {
                continue;
            }
            match tax_types.get(tx.account_id.as_str()) {
                Some(TaxType::Pension) => stats.pension_used += tx.amount,
                Some(TaxType::Irp) => stats.irp_used += tx.amount,
                Some(TaxType::Isa) => stats.isa_used += tx.amount,
                Some(TaxType::General) | None => {}
            }
        }

        stats.combined_pension_irp_used = stats.pension_used + stats.irp_used;
        stats
    }
}

impl Default for TaxService {
    fn default() -> Self {
        Self::new()
    }
}
