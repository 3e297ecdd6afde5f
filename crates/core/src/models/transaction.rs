use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger entry. The sign of `amount` is implied by the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxType {
    /// Purchase of an instrument (cash out)
    Buy,
    /// Sale of an instrument (cash in)
    Sell,
    /// Cash contributed to an account
    Deposit,
    /// Cash taken out of an account
    Withdrawal,
    /// Cash distribution, with or without an instrument attached
    Dividend,
}

impl TxType {
    /// BUY and SELL move instruments; everything else only moves cash.
    pub fn is_trade(&self) -> bool {
        matches!(self, TxType::Buy | TxType::Sell)
    }
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxType::Buy => write!(f, "BUY"),
            TxType::Sell => write!(f, "SELL"),
            TxType::Deposit => write!(f, "DEPOSIT"),
            TxType::Withdrawal => write!(f, "WITHDRAWAL"),
            TxType::Dividend => write!(f, "DIVIDEND"),
        }
    }
}

/// Journal tag: why the trade was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyGroup {
    Routine,
    Active,
    Event,
}

/// Journal tag: how the trader felt when placing the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    Calm,
    Excited,
    Fear,
    Greed,
}

/// One immutable entry of the append-only ledger.
///
/// `stock_name`, `price` and `quantity` are only meaningful for BUY/SELL,
/// where `amount` is expected to equal `price × quantity`. The reducers
/// never enforce that; they trust whatever reaches the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    /// Owning account (lookup only)
    pub account_id: String,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub tx_type: TxType,

    /// Instrument name; the name itself is the instrument key
    #[serde(default)]
    pub stock_name: Option<String>,

    /// Always non-negative
    pub amount: f64,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub memo: Option<String>,

    #[serde(default)]
    pub strategy: Option<StrategyGroup>,

    #[serde(default)]
    pub emotion: Option<Emotion>,
}

impl Transaction {
    /// A cash movement (DEPOSIT / WITHDRAWAL / DIVIDEND) with a fresh id.
    pub fn cash(
        tx_type: TxType,
        account_id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
    ) -> Self {
        Self {
            id: new_id(),
            account_id: account_id.into(),
            date,
            tx_type,
            stock_name: None,
            amount,
            price: None,
            quantity: None,
            memo: None,
            strategy: None,
            emotion: None,
        }
    }

    /// A BUY/SELL with `amount = price × quantity` and a fresh id.
    pub fn trade(
        tx_type: TxType,
        account_id: impl Into<String>,
        date: NaiveDate,
        stock_name: impl Into<String>,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            id: new_id(),
            account_id: account_id.into(),
            date,
            tx_type,
            stock_name: Some(stock_name.into()),
            amount: price * quantity,
            price: Some(price),
            quantity: Some(quantity),
            memo: None,
            strategy: None,
            emotion: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// The instrument key, or `None` when the name is absent or empty.
    pub fn instrument(&self) -> Option<&str> {
        self.stock_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Form state for a transaction that has not entered the ledger yet.
///
/// Every field the user types is optional here; the validation service
/// reports what is missing and turns an acceptable draft into a
/// [`Transaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub tx_type: TxType,
    pub account_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub stock_name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    /// Used for non-trade kinds; trades derive it from price × quantity
    pub amount: Option<f64>,
    pub memo: Option<String>,
    pub strategy: Option<StrategyGroup>,
    pub emotion: Option<Emotion>,
}

impl TransactionDraft {
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            account_id: None,
            date: None,
            stock_name: None,
            price: None,
            quantity: None,
            amount: None,
            memo: None,
            strategy: None,
            emotion: None,
        }
    }

    pub fn trade(
        tx_type: TxType,
        account_id: impl Into<String>,
        date: NaiveDate,
        stock_name: impl Into<String>,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            account_id: Some(account_id.into()),
            date: Some(date),
            stock_name: Some(stock_name.into()),
            quantity: Some(quantity),
            price: Some(price),
            ..Self::new(tx_type)
        }
    }

    pub fn cash(
        tx_type: TxType,
        account_id: impl Into<String>,
        date: NaiveDate,
        amount: f64,
    ) -> Self {
        Self {
            account_id: Some(account_id.into()),
            date: Some(date),
            amount: Some(amount),
            ..Self::new(tx_type)
        }
    }

    /// Start editing an existing record.
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            tx_type: tx.tx_type,
            account_id: Some(tx.account_id.clone()),
            date: Some(tx.date),
            stock_name: tx.stock_name.clone(),
            price: tx.price,
            quantity: tx.quantity,
            amount: Some(tx.amount),
            memo: tx.memo.clone(),
            strategy: tx.strategy,
            emotion: tx.emotion,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_tags(mut self, strategy: StrategyGroup, emotion: Emotion) -> Self {
        self.strategy = Some(strategy);
        self.emotion = Some(emotion);
        self
    }

    /// Amount the record would carry: price × quantity for trades.
    pub fn effective_amount(&self) -> f64 {
        if self.tx_type.is_trade() {
            self.price.unwrap_or(0.0) * self.quantity.unwrap_or(0.0)
        } else {
            self.amount.unwrap_or(0.0)
        }
    }
}

/// Generate a new record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
