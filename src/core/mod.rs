//! Core business logic abstractions

pub mod asset;
pub mod config;
pub mod conversion;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use asset::{AssetCode, Coin, CurrencyCode};
pub use conversion::{ConversionRequest, DisplayResult, convert};
pub use rate::{ExchangeRate, RateLookup, RateProvider, RateQuote};
