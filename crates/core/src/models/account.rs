use serde::{Deserialize, Serialize};

use super::transaction::new_id;

/// Tax treatment of a brokerage account.
/// Decides which annual contribution limit a deposit counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxType {
    /// Ordinary taxable account, no contribution limit
    General,
    /// Pension savings account
    Pension,
    /// Individual retirement pension
    Irp,
    /// Individual savings account
    Isa,
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxType::General => write!(f, "General"),
            TaxType::Pension => write!(f, "Pension"),
            TaxType::Irp => write!(f, "IRP"),
            TaxType::Isa => write!(f, "ISA"),
        }
    }
}

/// A brokerage account. Transactions reference it by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,

    /// Display name (e.g., "Main brokerage")
    pub name: String,

    /// Broker label (e.g., "Kiwoom")
    pub broker: String,

    pub tax_type: TaxType,

    /// Budget the account was opened with
    #[serde(default)]
    pub initial_budget: f64,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        broker: impl Into<String>,
        tax_type: TaxType,
        initial_budget: f64,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            broker: broker.into(),
            tax_type,
            initial_budget,
        }
    }
}
