use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TxType};

/// Memo attached to BUYs generated from imported holdings.
pub const IMPORTED_HOLDING_MEMO: &str = "Imported existing holding";

/// A position the user already held before tracking started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingInput {
    pub name: String,
    pub quantity: f64,
    pub avg_price: f64,
}

impl HoldingInput {
    pub fn new(name: impl Into<String>, quantity: f64, avg_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            avg_price,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity > 0.0 && self.avg_price > 0.0
    }
}

/// Turns a list of pre-existing holdings into opening BUY transactions.
pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    /// Parse `name,quantity,avg_price` rows (first row is a header).
    ///
    /// Rows with a blank name, or a quantity/price that is missing,
    /// non-numeric or not positive, are skipped.
    pub fn parse_holdings_csv(&self, text: &str) -> Result<Vec<HoldingInput>, CoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut holdings = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let number = |i: usize| {
                record
                    .get(i)
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0)
            };
            let input = HoldingInput {
                name: record.get(0).unwrap_or("").to_string(),
                quantity: number(1),
                avg_price: number(2),
            };
            if input.is_valid() {
                holdings.push(input);
            } else {
                warn!("Skipping holdings row {}: {:?}", idx + 2, record);
            }
        }

        info!("Parsed {} holdings from CSV", holdings.len());
        Ok(holdings)
    }

    /// One BUY per holding, dated the day before `today`, with
    /// `amount = quantity × avg_price`.
    ///
    /// All-or-nothing: an empty list or any invalid row is an error.
    pub fn to_transactions(
        &self,
        holdings: &[HoldingInput],
        account_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>, CoreError> {
        if holdings.is_empty() {
            return Err(CoreError::Import("No holdings to import".into()));
        }
        if let Some(bad) = holdings.iter().find(|h| !h.is_valid()) {
            return Err(CoreError::Import(format!(
                "Holding '{}' needs a name and a positive quantity and average price",
                bad.name
            )));
        }

        let date = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        Ok(holdings
            .iter()
            .map(|h| {
                Transaction::trade(
                    TxType::Buy,
                    account_id,
                    date,
                    h.name.trim(),
                    h.quantity,
                    h.avg_price,
                )
                .with_memo(IMPORTED_HOLDING_MEMO)
            })
            .collect())
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new()
    }
}
