use chrono::{Days, Months, NaiveDate};

use crate::models::journal::{DateRange, JournalFilter, JournalStats};
use crate::models::transaction::{Transaction, TxType};

/// Filtering, search and trade totals for the transaction journal.
pub struct JournalService;

impl JournalService {
    pub fn new() -> Self {
        Self
    }

    /// Transactions matching `filter`, newest first.
    /// `today` anchors the date range.
    pub fn filter<'a>(
        &self,
        transactions: &'a [Transaction],
        filter: &JournalFilter,
        today: NaiveDate,
    ) -> Vec<&'a Transaction> {
        let query = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let cutoff = Self::cutoff(filter.range, today);

        let mut matched: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| query.as_deref().map_or(true, |q| Self::matches_query(tx, q)))
            .filter(|tx| filter.tx_type.map_or(true, |t| tx.tx_type == t))
            .filter(|tx| {
                filter
                    .account_id
                    .as_deref()
                    .map_or(true, |id| tx.account_id == id)
            })
            .filter(|tx| cutoff.map_or(true, |c| tx.date >= c))
            .collect();

        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }

    /// Buy/sell totals and counts.
    pub fn stats(&self, transactions: &[&Transaction]) -> JournalStats {
        let mut stats = JournalStats::default();
        for tx in transactions {
            match tx.tx_type {
                TxType::Buy => {
                    stats.total_buy += tx.amount;
                    stats.buy_count += 1;
                }
                TxType::Sell => {
                    stats.total_sell += tx.amount;
                    stats.sell_count += 1;
                }
                _ => {}
            }
        }
        stats
    }

    /// Earliest date kept by `range`, or `None` for everything.
    ///
    /// The cutoff day itself is kept. Month steps clamp to the end of a
    /// shorter month (Mar 31 → Feb 28) instead of rolling into the next one.
    pub fn cutoff(range: DateRange, today: NaiveDate) -> Option<NaiveDate> {
        match range {
            DateRange::All => None,
            DateRange::Week => today.checked_sub_days(Days::new(7)),
            DateRange::Month => today.checked_sub_months(Months::new(1)),
            DateRange::Year => today.checked_sub_months(Months::new(12)),
        }
    }

    fn matches_query(tx: &Transaction, query: &str) -> bool {
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(query))
        };
        hit(&tx.stock_name) || hit(&tx.memo)
    }
}

impl Default for JournalService {
    fn default() -> Self {
        Self::new()
    }
}
