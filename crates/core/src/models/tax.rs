use serde::{Deserialize, Serialize};

/// Annual statutory limit for pension-savings deposits.
pub const PENSION_LIMIT: f64 = 6_000_000.0;

/// Annual statutory limit for IRP deposits.
pub const IRP_LIMIT: f64 = 9_000_000.0;

/// Annual statutory limit for ISA deposits.
pub const ISA_LIMIT: f64 = 20_000_000.0;

/// Combined annual cap for pension + IRP deposits.
/// Tighter than the sum of the individual limits.
pub const COMBINED_PENSION_IRP_LIMIT: f64 = 9_000_000.0;

/// Limits the tax calculator reports against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLimits {
    pub pension: f64,
    pub irp: f64,
    pub isa: f64,
    pub combined_pension_irp: f64,
}

impl Default for TaxLimits {
    fn default() -> Self {
        Self {
            pension: PENSION_LIMIT,
            irp: IRP_LIMIT,
            isa: ISA_LIMIT,
            combined_pension_irp: COMBINED_PENSION_IRP_LIMIT,
        }
    }
}

/// Current-year deposits per tax-advantaged bucket, next to their limits.
///
/// Figures are reported as-is; a used amount above its limit is the
/// caller's to flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxStats {
    pub pension_used: f64,
    pub pension_limit: f64,
    pub irp_used: f64,
    pub irp_limit: f64,
    pub isa_used: f64,
    pub isa_limit: f64,
    #[serde(rename = "combinedPensionIRPUsed")]
    pub combined_pension_irp_used: f64,
    pub combined_limit: f64,
}

impl TaxStats {
    /// Zero usage against the given limits.
    pub fn empty(limits: &TaxLimits) -> Self {
        Self {
            pension_used: 0.0,
            pension_limit: limits.pension,
            irp_used: 0.0,
            irp_limit: limits.irp,
            isa_used: 0.0,
            isa_limit: limits.isa,
            combined_pension_irp_used: 0.0,
            combined_limit: limits.combined_pension_irp,
        }
    }

    pub fn pension_exceeded(&self) -> bool {
        self.pension_used > self.pension_limit
    }

    pub fn irp_exceeded(&self) -> bool {
        self.irp_used > self.irp_limit
    }

    pub fn isa_exceeded(&self) -> bool {
        self.isa_used > self.isa_limit
    }

    pub fn combined_exceeded(&self) -> bool {
        self.combined_pension_irp_used > self.combined_limit
    }
}
