//! Conversion of an amount at a looked-up rate into a displayable result

use crate::core::asset::{AssetCode, CurrencyCode};
use crate::core::rate::RateLookup;
use std::fmt::Display;

pub const UNAVAILABLE_MESSAGE: &str = "Data not available";

/// Inputs collected by the presentation shell for a single conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub asset: AssetCode,
    pub currency: CurrencyCode,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayResult {
    /// No amount entered, nothing to show.
    Empty,
    Unavailable,
    Converted {
        amount: f64,
        asset: AssetCode,
        currency: CurrencyCode,
        value: f64,
    },
}

impl DisplayResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, DisplayResult::Empty)
    }
}

impl Display for DisplayResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayResult::Empty => Ok(()),
            DisplayResult::Unavailable => f.write_str(UNAVAILABLE_MESSAGE),
            DisplayResult::Converted {
                amount,
                asset,
                currency,
                value,
            } => {
                let symbol = currency
                    .symbol()
                    .map_or_else(|| format!("{currency} "), str::to_string);
                write!(
                    f,
                    "{} {} = {}{}",
                    format_amount(*amount),
                    asset,
                    symbol,
                    format_money(*value)
                )
            }
        }
    }
}

/// Converts `amount` at `rate`. Pure: no lookups happen here.
pub fn convert(
    rate: RateLookup,
    amount: Option<f64>,
    asset: &AssetCode,
    currency: &CurrencyCode,
) -> DisplayResult {
    let Some(amount) = amount else {
        return DisplayResult::Empty;
    };
    let Some(rate) = rate.rate() else {
        return DisplayResult::Unavailable;
    };
    let value = amount * rate.value();
    // Overflow has no meaningful price to show.
    if !value.is_finite() {
        return DisplayResult::Unavailable;
    }
    DisplayResult::Converted {
        amount,
        asset: asset.clone(),
        currency: currency.clone(),
        value,
    }
}

/// Shortest decimal form of `amount` with thousands separators, e.g. `1,234.5`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    group_thousands(&amount.to_string())
}

/// Two-decimal form of `value` with thousands separators, e.g. `65,000.12`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    group_thousands(&format!("{value:.2}"))
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate::ExchangeRate;

    fn codes(asset: &str, currency: &str) -> (AssetCode, CurrencyCode) {
        (asset.parse().unwrap(), currency.parse().unwrap())
    }

    fn rate(value: f64) -> RateLookup {
        RateLookup::Value(ExchangeRate::new(value).unwrap())
    }

    #[test]
    fn test_btc_to_usd() {
        let (asset, currency) = codes("BTC", "USD");
        let result = convert(rate(65000.12), Some(1.0), &asset, &currency);
        assert_eq!(result.to_string(), "1 BTC = $65,000.12");
    }

    #[test]
    fn test_eth_to_eur_fractional_amount() {
        let (asset, currency) = codes("ETH", "EUR");
        let result = convert(rate(3000.0), Some(2.5), &asset, &currency);
        assert_eq!(result.to_string(), "2.5 ETH = €7,500.00");
        if let DisplayResult::Converted { value, .. } = result {
            assert_eq!(value, 7500.0);
        } else {
            panic!("Expected a converted result");
        }
    }

    #[test]
    fn test_gbp_symbol() {
        let (asset, currency) = codes("LTC", "GBP");
        let result = convert(rate(61.237), Some(1234.5), &asset, &currency);
        assert_eq!(result.to_string(), "1,234.5 LTC = £75,597.08");
    }

    #[test]
    fn test_absent_amount_is_empty_regardless_of_rate() {
        let (asset, currency) = codes("BTC", "USD");
        for lookup in [rate(65000.12), RateLookup::Unavailable] {
            let result = convert(lookup, None, &asset, &currency);
            assert!(result.is_empty());
            assert_eq!(result.to_string(), "");
        }
    }

    #[test]
    fn test_unavailable_rate_regardless_of_amount_and_currency() {
        for (amount, currency) in [(1.0, "USD"), (0.0, "EUR"), (1e6, "GBP"), (3.3, "NOK")] {
            let (asset, currency) = codes("BTC", currency);
            let result = convert(RateLookup::Unavailable, Some(amount), &asset, &currency);
            assert_eq!(result, DisplayResult::Unavailable);
            assert_eq!(result.to_string(), "Data not available");
        }
    }

    #[test]
    fn test_value_is_amount_times_rate() {
        let (asset, currency) = codes("SOL", "USD");
        for (amount, r) in [(0.0, 150.0), (3.0, 0.1), (12.75, 99.99), (1e4, 1.2345)] {
            match convert(rate(r), Some(amount), &asset, &currency) {
                DisplayResult::Converted { value, .. } => assert_eq!(value, amount * r),
                other => panic!("Expected a converted result, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unsupported_currency_uses_code_as_symbol() {
        let (asset, currency) = codes("BTC", "NOK");
        let result = convert(rate(700000.0), Some(1.0), &asset, &currency);
        assert_eq!(result.to_string(), "1 BTC = NOK 700,000.00");
    }

    #[test]
    fn test_overflowing_value_is_unavailable() {
        let (asset, currency) = codes("BTC", "USD");
        let result = convert(rate(65000.12), Some(f64::MAX), &asset, &currency);
        assert_eq!(result, DisplayResult::Unavailable);
        assert_eq!(result.to_string(), "Data not available");
    }

    #[test]
    fn test_format_money_rounds_to_two_decimals() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(-1234.5), "-1,234.50");
    }

    #[test]
    fn test_format_amount_keeps_shortest_form() {
        assert_eq!(format_amount(1.0), "1");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(1000000.0), "1,000,000");
        assert_eq!(format_amount(0.001), "0.001");
        assert_eq!(format_amount(-12345.0), "-12,345");
    }
}
