//! Exchange rate abstractions and core types

use crate::core::asset::{AssetCode, CurrencyCode};
use crate::core::conversion::format_amount;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::fmt::Display;
use tracing::debug;

/// Units of a currency per one unit of an asset. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(ExchangeRate(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Full precision with thousands separators, e.g. `65,000.12` or `0.0000123`.
impl Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

/// Outcome of a rate lookup. Every upstream failure collapses into
/// `Unavailable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateLookup {
    Value(ExchangeRate),
    Unavailable,
}

impl RateLookup {
    pub fn rate(&self) -> Option<ExchangeRate> {
        match self {
            RateLookup::Value(rate) => Some(*rate),
            RateLookup::Unavailable => None,
        }
    }
}

/// Full exchange-rate record as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub from_code: String,
    pub from_name: Option<String>,
    pub to_code: String,
    pub to_name: Option<String>,
    pub rate: ExchangeRate,
    pub last_refreshed: Option<NaiveDateTime>,
    pub time_zone: Option<String>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the full quote, reporting why it failed.
    async fn fetch_quote(&self, asset: &AssetCode, currency: &CurrencyCode) -> Result<RateQuote>;

    /// Fetches the rate, flattening every failure into [`RateLookup::Unavailable`].
    async fn fetch_rate(&self, asset: &AssetCode, currency: &CurrencyCode) -> RateLookup {
        match self.fetch_quote(asset, currency).await {
            Ok(quote) => {
                debug!(rate = %quote.rate, %asset, %currency, "Rate available");
                RateLookup::Value(quote.rate)
            }
            Err(e) => {
                debug!(error = %e, %asset, %currency, "Rate unavailable");
                RateLookup::Unavailable
            }
        }
    }
}
