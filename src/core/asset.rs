//! Asset and currency codes

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Fiat currencies offered by the converter, in display order.
pub const SUPPORTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

fn normalize_code(s: &str, kind: &str) -> Result<String> {
    let code = s.trim().to_uppercase();
    if code.is_empty() {
        bail!("{kind} code must not be empty");
    }
    Ok(code)
}

/// Ticker of a cryptocurrency, e.g. `BTC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetCode(String);

impl AssetCode {
    /// For codes known to be uppercase and non-empty.
    pub(crate) fn known(code: &str) -> Self {
        AssetCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AssetCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_code(s, "Asset").map(AssetCode)
    }
}

impl TryFrom<String> for AssetCode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetCode> for String {
    fn from(code: AssetCode) -> String {
        code.0
    }
}

impl Display for AssetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fiat currency code. Codes outside [`SUPPORTED_CURRENCIES`] are still
/// representable and are passed through to the rate provider unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub(crate) fn known(code: &str) -> Self {
        CurrencyCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for supported currencies.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "USD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_CURRENCIES.contains(&self.0.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_code(s, "Currency").map(CurrencyCode)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry of the coin catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub code: AssetCode,
    pub name: String,
}

/// Built-in catalogue used when the configuration does not list any coins.
pub fn default_coins() -> Vec<Coin> {
    [
        ("BTC", "Bitcoin"),
        ("ETH", "Ethereum"),
        ("USDT", "Tether"),
        ("BNB", "Binance Coin"),
        ("XRP", "Ripple"),
        ("ADA", "Cardano"),
        ("SOL", "Solana"),
        ("DOGE", "Dogecoin"),
        ("DOT", "Polkadot"),
        ("LTC", "Litecoin"),
    ]
    .into_iter()
    .map(|(code, name)| Coin {
        code: AssetCode::known(code),
        name: name.to_string(),
    })
    .collect()
}

/// Finds a coin by code in the given catalogue.
pub fn lookup<'a>(coins: &'a [Coin], code: &AssetCode) -> Option<&'a Coin> {
    coins.iter().find(|c| &c.code == code)
}
