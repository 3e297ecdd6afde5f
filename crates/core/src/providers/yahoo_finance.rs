use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::debug;
use time::OffsetDateTime;

use super::traits::{InstrumentLookup, InstrumentQuote};
use crate::errors::CoreError;

const PROVIDER: &str = "Yahoo Finance";

/// Instrument prices from Yahoo Finance.
///
/// No API key needed. Symbols are Yahoo tickers (`005930.KS`, `AAPL`);
/// prices come back in the instrument's trading currency.
///
/// Not WASM-compatible (native reqwest/tokio connectors).
pub struct YahooInstrumentLookup {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooInstrumentLookup {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| api_error(format!("Failed to create connector: {e}")))?;
        Ok(Self { connector })
    }

    /// Midnight UTC on `date`.
    fn midnight_utc(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let month = time::Month::try_from(date.month() as u8)
            .map_err(|e| api_error(format!("Invalid month in {date}: {e}")))?;
        Ok(time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| api_error(format!("Invalid date {date}: {e}")))?
            .midnight()
            .assume_utc())
    }

    fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }
}

#[async_trait]
impl InstrumentLookup for YahooInstrumentLookup {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn latest_price(&self, symbol: &str) -> Result<InstrumentQuote, CoreError> {
        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| api_error(format!("Failed to fetch latest quote for {symbol}: {e}")))?;

        let quote = resp
            .last_quote()
            .map_err(|e| api_error(format!("No quote data for {symbol}: {e}")))?;

        let date = Self::timestamp_to_date(quote.timestamp as i64).ok_or_else(|| {
            api_error(format!("Quote for {symbol} has an invalid timestamp"))
        })?;
        debug!("{PROVIDER}: {symbol} last {} on {date}", quote.close);

        Ok(InstrumentQuote {
            symbol: symbol.to_string(),
            price: quote.close,
            date,
        })
    }

    async fn price_on(&self, symbol: &str, date: NaiveDate) -> Result<InstrumentQuote, CoreError> {
        let start = Self::midnight_utc(date)?;
        // 3-day window covers weekends and holidays
        let end = Self::midnight_utc(date + chrono::Duration::days(3))?;

        let resp = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| api_error(format!("Failed to fetch history for {symbol} on {date}: {e}")))?;

        let quotes = resp
            .quotes()
            .map_err(|e| api_error(format!("Failed to parse quotes for {symbol}: {e}")))?;

        let target = start.unix_timestamp();
        let closest = quotes
            .iter()
            .min_by_key(|q| (q.timestamp as i64 - target).unsigned_abs())
            .ok_or_else(|| CoreError::PriceNotAvailable {
                symbol: symbol.to_string(),
                date: date.to_string(),
            })?;

        Ok(InstrumentQuote {
            symbol: symbol.to_string(),
            price: closest.close,
            date: Self::timestamp_to_date(closest.timestamp as i64).unwrap_or(date),
        })
    }
}

fn api_error(message: String) -> CoreError {
    CoreError::Api {
        provider: PROVIDER.into(),
        message,
    }
}
