use serde::{Deserialize, Serialize};

use super::tax::TaxLimits;

/// User-configurable settings, persisted alongside the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// ISO 4217 code used when displaying amounts (e.g., "KRW")
    pub display_currency: String,

    /// Annual contribution limits for tax-advantaged accounts
    #[serde(default)]
    pub tax_limits: TaxLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "KRW".to_string(),
            tax_limits: TaxLimits::default(),
        }
    }
}
