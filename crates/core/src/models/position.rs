use serde::{Deserialize, Serialize};

/// How a SELL is applied to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellPolicy {
    /// Never sell more than is held; the excess is ignored.
    ClampToHeld,
    /// Apply the recorded quantity as-is; the position may go negative.
    AsRecorded,
}

/// Moving-average cost position in a single instrument.
///
/// Both the holdings fold and the realized-profit pass run on this type.
/// They differ only in the [`SellPolicy`] they pass to [`Position::sell`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub quantity: f64,

    /// Cost basis of the held quantity
    pub invested: f64,

    /// Recomputed on BUY only; SELL leaves it untouched
    pub avg_price: f64,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a purchase and recompute the weighted average price.
    pub fn buy(&mut self, quantity: f64, amount: f64) {
        self.quantity += quantity;
        self.invested += amount;
        if self.quantity > 0.0 {
            self.avg_price = self.invested / self.quantity;
        } else {
            // Nothing held: no average, and no cost carried into the next buy.
            self.avg_price = 0.0;
            self.invested = 0.0;
        }
    }

    /// Remove `quantity` units at the current average price.
    ///
    /// Returns `(sold_quantity, cost_basis)` where `cost_basis` is
    /// `avg_price × sold_quantity`.
    pub fn sell(&mut self, quantity: f64, policy: SellPolicy) -> (f64, f64) {
        let sold = match policy {
            SellPolicy::ClampToHeld => quantity.min(self.quantity),
            SellPolicy::AsRecorded => quantity,
        };
        let cost_basis = self.avg_price * sold;
        self.quantity -= sold;
        self.invested -= cost_basis;
        (sold, cost_basis)
    }

    /// A position with nothing left in it.
    pub fn is_closed(&self) -> bool {
        self.quantity <= 0.0
    }
}
