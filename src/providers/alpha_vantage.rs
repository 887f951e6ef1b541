use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::asset::{AssetCode, CurrencyCode};
use crate::core::rate::{ExchangeRate, RateProvider, RateQuote};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const LAST_REFRESHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Realtime exchange rates from the Alpha Vantage `CURRENCY_EXCHANGE_RATE` API.
pub struct AlphaVantageProvider {
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        AlphaVantageProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlphaVantageResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    realtime: Option<RealtimeRate>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RealtimeRate {
    #[serde(rename = "1. From_Currency Code", default, deserialize_with = "lenient_text")]
    from_code: Option<String>,
    #[serde(rename = "2. From_Currency Name", default, deserialize_with = "lenient_text")]
    from_name: Option<String>,
    #[serde(rename = "3. To_Currency Code", default, deserialize_with = "lenient_text")]
    to_code: Option<String>,
    #[serde(rename = "4. To_Currency Name", default, deserialize_with = "lenient_text")]
    to_name: Option<String>,
    #[serde(rename = "5. Exchange Rate", default)]
    exchange_rate: Option<Value>,
    #[serde(rename = "6. Last Refreshed", default, deserialize_with = "lenient_text")]
    last_refreshed: Option<String>,
    #[serde(rename = "7. Time Zone", default, deserialize_with = "lenient_text")]
    time_zone: Option<String>,
    #[serde(rename = "8. Bid Price", default, deserialize_with = "lenient_price")]
    bid: Option<f64>,
    #[serde(rename = "9. Ask Price", default, deserialize_with = "lenient_price")]
    ask: Option<f64>,
}

/// Prices arrive as string-encoded numbers, occasionally as plain JSON numbers.
fn price_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(price_from_value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn into_quote(
    data: AlphaVantageResponse,
    asset: &AssetCode,
    currency: &CurrencyCode,
) -> Result<RateQuote> {
    let pair = format!("{asset}/{currency}");
    if let Some(message) = data.error_message {
        return Err(anyhow!("API error for pair {}: {}", pair, message));
    }

    let Some(realtime) = data.realtime else {
        return match data.note.or(data.information) {
            Some(message) => Err(anyhow!("API limit reached for pair {}: {}", pair, message)),
            None => Err(anyhow!("No rate data found for pair: {}", pair)),
        };
    };

    let raw_rate = realtime
        .exchange_rate
        .ok_or_else(|| anyhow!("No exchange rate field for pair: {}", pair))?;
    let rate = price_from_value(&raw_rate)
        .and_then(ExchangeRate::new)
        .ok_or_else(|| anyhow!("Invalid exchange rate {} for pair: {}", raw_rate, pair))?;

    let last_refreshed = realtime.last_refreshed.as_deref().and_then(|ts| {
        NaiveDateTime::parse_from_str(ts.trim(), LAST_REFRESHED_FORMAT)
            .map_err(|e| debug!(error = %e, timestamp = ts, "Unparseable refresh time"))
            .ok()
    });

    Ok(RateQuote {
        from_code: realtime.from_code.unwrap_or_else(|| asset.to_string()),
        from_name: realtime.from_name,
        to_code: realtime.to_code.unwrap_or_else(|| currency.to_string()),
        to_name: realtime.to_name,
        rate,
        last_refreshed,
        time_zone: realtime.time_zone,
        bid: realtime.bid,
        ask: realtime.ask,
    })
}

#[async_trait]
impl RateProvider for AlphaVantageProvider {
    #[instrument(
        name = "AlphaVantageRateFetch",
        skip(self),
        fields(asset = %asset, currency = %currency)
    )]
    async fn fetch_quote(&self, asset: &AssetCode, currency: &CurrencyCode) -> Result<RateQuote> {
        let pair = format!("{asset}/{currency}");
        let endpoint = format!("{}/query", self.base_url);
        // The key is part of the query string; keep it out of the logs.
        debug!("Requesting exchange rate from {}", endpoint);

        let url = reqwest::Url::parse_with_params(
            &endpoint,
            [
                ("function", "CURRENCY_EXCHANGE_RATE"),
                ("from_currency", asset.as_str()),
                ("to_currency", currency.as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| anyhow!("Invalid endpoint {}: {}", endpoint, e))?;

        let client = reqwest::Client::builder()
            .user_agent("coinconv/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pair: {}", e.without_url(), pair))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response.text().await?;

        let data: AlphaVantageResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for pair {}: {}", pair, e))?;

        into_quote(data, asset, currency)
    }
}
