use super::ui;
use crate::core::asset::{self, Coin};
use crate::core::{ConversionRequest, DisplayResult, RateProvider, convert};
use anyhow::Result;
use tracing::{debug, warn};

/// Runs one conversion. No request is made when the amount is absent.
pub async fn conversion_result(
    provider: &(dyn RateProvider + Send + Sync),
    request: &ConversionRequest,
) -> DisplayResult {
    if request.amount.is_none() {
        debug!("No amount entered, skipping rate lookup");
        return DisplayResult::Empty;
    }

    let pb = ui::new_spinner(&format!(
        "Fetching {}/{} rate...",
        request.asset, request.currency
    ));
    let rate = provider.fetch_rate(&request.asset, &request.currency).await;
    pb.finish_and_clear();

    convert(rate, request.amount, &request.asset, &request.currency)
}

/// Renders a display result for the terminal. `Empty` renders as nothing.
pub fn render(result: &DisplayResult) -> Option<String> {
    if result.is_empty() {
        return None;
    }
    let style_type = match result {
        DisplayResult::Converted { .. } => ui::StyleType::Result,
        _ => ui::StyleType::Error,
    };
    Some(ui::style_text(&result.to_string(), style_type))
}

/// Prints the conversion and returns what was shown.
pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    request: &ConversionRequest,
    coins: &[Coin],
) -> Result<DisplayResult> {
    if asset::lookup(coins, &request.asset).is_none() {
        warn!(asset = %request.asset, "Coin is not in the catalogue");
    }
    if !request.currency.is_supported() {
        warn!(currency = %request.currency, "Currency is not one of USD, EUR, GBP");
    }

    let result = conversion_result(provider, request).await;
    if let Some(line) = render(&result) {
        println!("{line}");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AssetCode, CurrencyCode, ExchangeRate, RateQuote};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRateProvider {
        rate: Option<f64>,
        call_count: AtomicUsize,
    }

    impl MockRateProvider {
        fn new(rate: Option<f64>) -> Self {
            Self {
                rate,
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RateProvider for MockRateProvider {
        async fn fetch_quote(
            &self,
            asset: &AssetCode,
            currency: &CurrencyCode,
        ) -> Result<RateQuote> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            let rate = self
                .rate
                .and_then(ExchangeRate::new)
                .ok_or_else(|| anyhow!("Unsupported pair {asset}/{currency}"))?;
            Ok(RateQuote {
                from_code: asset.to_string(),
                from_name: None,
                to_code: currency.to_string(),
                to_name: None,
                rate,
                last_refreshed: None,
                time_zone: None,
                bid: None,
                ask: None,
            })
        }
    }

    fn request(asset: &str, currency: &str, amount: Option<f64>) -> ConversionRequest {
        ConversionRequest {
            asset: asset.parse().unwrap(),
            currency: currency.parse().unwrap(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_conversion_with_rate() {
        let provider = MockRateProvider::new(Some(65000.12));
        let result = conversion_result(&provider, &request("BTC", "USD", Some(1.0))).await;
        assert_eq!(result.to_string(), "1 BTC = $65,000.12");
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_pair_is_unavailable() {
        let provider = MockRateProvider::new(None);
        let result = conversion_result(&provider, &request("BTC", "NOK", Some(1.0))).await;
        assert_eq!(result, DisplayResult::Unavailable);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_absent_amount_skips_lookup() {
        let provider = MockRateProvider::new(Some(3000.0));
        let result = conversion_result(&provider, &request("ETH", "EUR", None)).await;
        assert!(result.is_empty());
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_render() {
        console::set_colors_enabled(false);
        assert_eq!(render(&DisplayResult::Empty), None);
        assert_eq!(
            render(&DisplayResult::Unavailable).as_deref(),
            Some("Data not available")
        );
        let converted = DisplayResult::Converted {
            amount: 2.5,
            asset: "ETH".parse().unwrap(),
            currency: "EUR".parse().unwrap(),
            value: 7500.0,
        };
        assert_eq!(render(&converted).as_deref(), Some("2.5 ETH = €7,500.00"));
    }
}
