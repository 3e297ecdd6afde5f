use std::collections::BTreeMap;

use log::{debug, warn};

use crate::models::holding::Holding;
use crate::models::position::{Position, SellPolicy};
use crate::models::transaction::{Transaction, TxType};

/// Folds the transaction log into current per-instrument holdings.
///
/// Pure business logic: no I/O, no shared state. Same input (in any
/// order) gives the same output.
pub struct HoldingsService;

impl HoldingsService {
    pub fn new() -> Self {
        Self
    }

    /// Current holdings with a positive quantity, ordered by instrument name.
    ///
    /// Only BUY/SELL records with a non-empty instrument name take part.
    /// They are applied in date order; records on the same date keep their
    /// ledger order, which matters for the average price.
    ///
    /// A SELL larger than the position is clamped to it. A position that
    /// reaches zero is dropped, so a later BUY opens a fresh lot.
    pub fn get_holdings(&self, transactions: &[Transaction]) -> Vec<Holding> {
        let mut positions: BTreeMap<&str, Position> = BTreeMap::new();

        for tx in Self::trades_by_date(transactions) {
            let Some(name) = tx.instrument() else {
                continue;
            };
            let mut position = positions.remove(name).unwrap_or_default();

            match tx.tx_type {
                TxType::Buy => {
                    if tx.quantity.is_none() {
                        warn!("BUY {} on {} has no quantity; counting cost only", name, tx.date);
                    }
                    position.buy(tx.quantity.unwrap_or(0.0), tx.amount);
                }
                TxType::Sell => {
                    let requested = tx.quantity.unwrap_or(0.0);
                    let (sold, _) = position.sell(requested, SellPolicy::ClampToHeld);
                    if sold < requested {
                        debug!(
                            "SELL {} on {} clamped from {} to {}",
                            name, tx.date, requested, sold
                        );
                    }
                }
                _ => {}
            }

            if position.is_closed() {
                debug!("{} closed on {}", name, tx.date);
            } else {
                positions.insert(name, position);
            }
        }

        positions
            .iter()
            .map(|(name, position)| Holding::from_position(*name, position))
            .collect()
    }

    /// BUY/SELL records sorted by date (stable: ties keep ledger order).
    fn trades_by_date(transactions: &[Transaction]) -> Vec<&Transaction> {
        let mut trades: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.tx_type.is_trade())
            .collect();
        trades.sort_by_key(|tx| tx.date);
        trades
    }
}

impl Default for HoldingsService {
    fn default() -> Self {
        Self::new()
    }
}
