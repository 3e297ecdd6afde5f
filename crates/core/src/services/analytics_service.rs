use std::cmp::Ordering;

use crate::models::account::Account;
use crate::models::analytics::{AccountValue, AllocationSlice, CASH_SLICE_NAME};
use crate::models::holding::Holding;
use crate::models::summary::PortfolioSummary;
use crate::models::transaction::Transaction;
use crate::services::holdings_service::HoldingsService;
use crate::services::summary_service::SummaryService;

/// Breakdowns for the statistics view: allocation and per-account totals.
///
/// All values are at cost, consistent with the summary.
pub struct AnalyticsService {
    holdings_service: HoldingsService,
    summary_service: SummaryService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            holdings_service: HoldingsService::new(),
            summary_service: SummaryService::new(),
        }
    }

    /// One slice per holding (largest first), then cash if there is any.
    pub fn asset_allocation(
        &self,
        holdings: &[Holding],
        summary: &PortfolioSummary,
    ) -> Vec<AllocationSlice> {
        let mut slices: Vec<AllocationSlice> = holdings
            .iter()
            .map(|h| AllocationSlice {
                name: h.name.clone(),
                value: h.invested,
            })
            .collect();
        slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

        if summary.cash_balance > 0.0 {
            slices.push(AllocationSlice {
                name: CASH_SLICE_NAME.to_string(),
                value: summary.cash_balance,
            });
        }
        slices
    }

    /// Total assets of each account, computed from that account's
    /// transactions only. Largest first.
    pub fn account_distribution(
        &self,
        accounts: &[Account],
        transactions: &[Transaction],
    ) -> Vec<AccountValue> {
        let mut values: Vec<AccountValue> = accounts
            .iter()
            .map(|account| {
                let own: Vec<Transaction> = transactions
                    .iter()
                    .filter(|t| t.account_id == account.id)
                    .cloned()
                    .collect();
                let holdings = self.holdings_service.get_holdings(&own);
                let summary = self.summary_service.get_summary(&own, &holdings);
                AccountValue {
                    account_id: account.id.clone(),
                    name: account.name.clone(),
                    total_assets: summary.total_assets,
                }
            })
            .collect();

        values.sort_by(|a, b| {
            b.total_assets
                .partial_cmp(&a.total_assets)
                .unwrap_or(Ordering::Equal)
        });
        values
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
