use serde::{Deserialize, Serialize};

use super::position::Position;

/// Current position in one instrument, derived from the ledger.
///
/// Never persisted. Only instruments with a positive quantity appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Instrument name (the instrument key)
    pub name: String,

    pub quantity: f64,

    /// Cost basis of the held quantity (moving-average costing)
    pub invested: f64,

    /// `invested / quantity`
    pub avg_price: f64,
}

impl Holding {
    pub fn from_position(name: impl Into<String>, position: &Position) -> Self {
        Self {
            name: name.into(),
            quantity: position.quantity,
            invested: position.invested.max(0.0),
            avg_price: position.avg_price,
        }
    }
}
