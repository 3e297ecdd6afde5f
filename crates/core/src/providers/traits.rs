use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::holding::Holding;

/// A price quoted by an instrument lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentQuote {
    pub symbol: String,
    pub price: f64,
    /// Trading day the price belongs to
    pub date: NaiveDate,
}

/// External service that can supply a price to pre-fill a BUY/SELL form.
///
/// The reducers never call this; it only feeds drafts.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InstrumentLookup: Send + Sync {
    /// Human-readable name of this service (for logs/errors).
    fn name(&self) -> &str;

    /// Most recent price for `symbol`.
    async fn latest_price(&self, symbol: &str) -> Result<InstrumentQuote, CoreError>;

    /// Price for `symbol` on (or closest to) `date`.
    async fn price_on(&self, symbol: &str, date: NaiveDate) -> Result<InstrumentQuote, CoreError>;
}

/// External text-generation service that comments on a set of holdings.
///
/// The returned text is free-form and is neither parsed nor validated.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PortfolioAdvisor: Send + Sync {
    fn name(&self) -> &str;

    async fn advise(&self, holdings: &[Holding]) -> Result<String, CoreError>;
}
