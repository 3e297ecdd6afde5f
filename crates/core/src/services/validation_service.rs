use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Checks transaction drafts before they enter the ledger.
///
/// The reducers trust every record they get, so this is the only place
/// where required fields and positive values are enforced.
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Human-readable problems with a draft. Empty means acceptable.
    ///
    /// Rules:
    /// - A date and an account are required
    /// - BUY/SELL need an instrument name and a positive price and quantity
    ///   whose product is finite
    /// - DEPOSIT, WITHDRAWAL and DIVIDEND need a positive amount
    ///
    /// NaN and infinities are never positive here.
    pub fn validate(&self, draft: &TransactionDraft) -> Vec<String> {
        let mut errors = Vec::new();

        if draft.date.is_none() {
            errors.push("Transaction date is required.".to_string());
        }

        if draft.account_id.as_deref().map_or(true, str::is_empty) {
            errors.push("An account must be selected.".to_string());
        }

        if draft.tx_type.is_trade() {
            if draft.stock_name.as_deref().map_or(true, |n| n.trim().is_empty()) {
                errors.push("Instrument name is required.".to_string());
            }
            let price_ok = draft.price.is_some_and(is_positive);
            let quantity_ok = draft.quantity.is_some_and(is_positive);
            if !price_ok {
                errors.push("Price must be greater than 0.".to_string());
            }
            if !quantity_ok {
                errors.push("Quantity must be greater than 0.".to_string());
            }
            if price_ok && quantity_ok && !draft.effective_amount().is_finite() {
                errors.push("Amount is too large.".to_string());
            }
        } else if !draft.amount.is_some_and(is_positive) {
            errors.push("Amount must be greater than 0.".to_string());
        }

        errors
    }

    /// Validate a draft and build the ledger record with the given id.
    ///
    /// Trades get `amount = price × quantity`; cash records drop any
    /// instrument, price, quantity and trade tags the form still held.
    pub fn accept(&self, draft: TransactionDraft, id: String) -> Result<Transaction, CoreError> {
        let errors = self.validate(&draft);
        if !errors.is_empty() {
            return Err(CoreError::InvalidTransaction(errors));
        }

        let amount = draft.effective_amount();
        let (Some(account_id), Some(date)) = (draft.account_id, draft.date) else {
            return Err(CoreError::Validation("Draft is missing account or date".into()));
        };
        let is_trade = draft.tx_type.is_trade();

        Ok(Transaction {
            id,
            account_id,
            date,
            tx_type: draft.tx_type,
            stock_name: draft
                .stock_name
                .filter(|_| is_trade)
                .map(|n| n.trim().to_string()),
            amount,
            price: draft.price.filter(|_| is_trade),
            quantity: draft.quantity.filter(|_| is_trade),
            memo: draft.memo.filter(|m| !m.is_empty()),
            strategy: draft.strategy.filter(|_| is_trade),
            emotion: draft.emotion.filter(|_| is_trade),
        })
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Strictly positive and finite.
fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}
