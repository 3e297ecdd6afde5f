use serde::{Deserialize, Serialize};

use super::transaction::TxType;

/// How far back the journal looks from the reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRange {
    #[default]
    All,
    /// Last 7 days
    Week,
    /// Last calendar month
    Month,
    /// Last calendar year
    Year,
}

/// Journal view filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalFilter {
    /// Case-insensitive match on instrument name or memo
    pub query: Option<String>,
    pub tx_type: Option<TxType>,
    pub account_id: Option<String>,
    pub range: DateRange,
}

/// Trade totals over a (filtered) journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_buy: f64,
    pub total_sell: f64,
    pub buy_count: usize,
    pub sell_count: usize,
}
