use serde::{Deserialize, Serialize};

/// Ledger-wide figures derived from the transaction log and holdings.
///
/// Holdings are valued at cost, so `total_profit` is cash-flow profit
/// (realized gains and dividends sitting in cash), not mark-to-market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// cash_balance + stock_value
    pub total_assets: f64,

    /// Deposits, sells and dividends minus withdrawals and buys
    pub cash_balance: f64,

    /// Sum of holdings' cost basis
    pub stock_value: f64,

    /// Deposits minus withdrawals (contributed capital)
    pub net_invested: f64,

    /// total_assets - net_invested
    pub total_profit: f64,

    /// Percentage return on net_invested; 0 when nothing was contributed
    pub roi: f64,

    /// Profit from completed sells plus all dividends
    pub total_realized: f64,
}
