use serde::{Deserialize, Serialize};

/// Label used for the cash slice of an allocation breakdown.
pub const CASH_SLICE_NAME: &str = "Cash";

/// One slice of the asset-allocation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Instrument name, or [`CASH_SLICE_NAME`]
    pub name: String,

    /// Value at cost
    pub value: f64,
}

/// Total assets held in one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountValue {
    pub account_id: String,
    pub name: String,
    pub total_assets: f64,
}
