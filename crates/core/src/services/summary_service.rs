use std::collections::HashMap;

use log::debug;

use crate::models::holding::Holding;
use crate::models::position::{Position, SellPolicy};
use crate::models::summary::PortfolioSummary;
use crate::models::transaction::{Transaction, TxType};

/// Computes ledger-wide figures: cash, contributed capital, profit, ROI,
/// realized profit.
///
/// Holdings are valued at cost basis. There is no price feed here, so
/// unrealized gain is zero by construction and `total_profit` is the
/// cash-flow profit already sitting in the cash balance.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Build the summary from the full log and the holdings computed from it.
    pub fn get_summary(&self, transactions: &[Transaction], holdings: &[Holding]) -> PortfolioSummary {
        let cash_balance = Self::cash_balance(transactions);
        let stock_value: f64 = holdings.iter().map(|h| h.invested).sum();
        let total_assets = cash_balance + stock_value;

        let net_invested = Self::net_invested(transactions);
        let total_profit = total_assets - net_invested;
        let roi = if net_invested > 0.0 {
            (total_profit / net_invested) * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            total_assets,
            cash_balance,
            stock_value,
            net_invested,
            total_profit,
            roi,
            total_realized: self.realized_profit(transactions),
        }
    }

    /// Deposits, sells and dividends in; withdrawals and buys out.
    /// Order-independent.
    pub fn cash_balance(transactions: &[Transaction]) -> f64 {
        transactions.iter().fold(0.0, |acc, tx| match tx.tx_type {
            TxType::Deposit | TxType::Sell | TxType::Dividend => acc + tx.amount,
            TxType::Withdrawal | TxType::Buy => acc - tx.amount,
        })
    }

    /// Deposits minus withdrawals.
    pub fn net_invested(transactions: &[Transaction]) -> f64 {
        transactions.iter().fold(0.0, |acc, tx| match tx.tx_type {
            TxType::Deposit => acc + tx.amount,
            TxType::Withdrawal => acc - tx.amount,
            _ => acc,
        })
    }

    /// Profit from SELLs against the running average cost, plus every
    /// dividend.
    ///
    /// Runs its own positions independently of the holdings fold. SELL
    /// quantities are applied as recorded (no clamp), so selling more than
    /// was bought charges cost only for what the average covers: a SELL of
    /// an instrument never bought counts its full amount as profit.
    pub fn realized_profit(&self, transactions: &[Transaction]) -> f64 {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|tx| tx.date);

        let mut positions: HashMap<&str, Position> = HashMap::new();
        let mut realized = 0.0;

        for tx in sorted {
            let Some(name) = tx.instrument() else {
                if tx.tx_type == TxType::Dividend {
                    realized += tx.amount;
                }
                continue;
            };

            match tx.tx_type {
                TxType::Buy => {
                    positions
                        .entry(name)
                        .or_default()
                        .buy(tx.quantity.unwrap_or(0.0), tx.amount);
                }
                TxType::Sell => {
                    let position = positions.entry(name).or_default();
                    let (sold, cost_basis) =
                        position.sell(tx.quantity.unwrap_or(0.0), SellPolicy::AsRecorded);
                    if position.quantity < 0.0 {
                        debug!(
                            "SELL {} on {} exceeds position by {}",
                            name, tx.date, -position.quantity
                        );
                    }
                    debug!("SELL {} x{} realized {}", name, sold, tx.amount - cost_basis);
                    realized += tx.amount - cost_basis;
                }
                TxType::Dividend => realized += tx.amount,
                TxType::Deposit | TxType::Withdrawal => {}
            }
        }

        realized
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
