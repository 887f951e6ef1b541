use super::ui;
use crate::core::asset::{self, AssetCode, Coin, CurrencyCode};
use crate::core::conversion::{UNAVAILABLE_MESSAGE, format_money};
use crate::core::{RateProvider, RateQuote};
use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::{debug, warn};

/// Builds a two-column table describing a quote.
pub fn quote_table(quote: &RateQuote) -> Table {
    let describe = |code: &str, name: &Option<String>| match name {
        Some(name) => format!("{code} ({name})"),
        None => code.to_string(),
    };
    let last_refreshed = quote.last_refreshed.map(|ts| match &quote.time_zone {
        Some(tz) => format!("{} {tz}", ts.format("%Y-%m-%d %H:%M:%S")),
        None => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
    });

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("From"),
        Cell::new(describe(&quote.from_code, &quote.from_name)),
    ]);
    table.add_row(vec![
        Cell::new("To"),
        Cell::new(describe(&quote.to_code, &quote.to_name)),
    ]);
    table.add_row(vec![
        Cell::new("Exchange Rate"),
        Cell::new(quote.rate.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Bid"),
        ui::format_optional_cell(quote.bid, format_money),
    ]);
    table.add_row(vec![
        Cell::new("Ask"),
        ui::format_optional_cell(quote.ask, format_money),
    ]);
    table.add_row(vec![
        Cell::new("Last Refreshed"),
        ui::format_optional_cell(last_refreshed, |ts| ts),
    ]);
    table
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    asset: &AssetCode,
    currency: &CurrencyCode,
    coins: &[Coin],
) -> Result<()> {
    let title = match asset::lookup(coins, asset) {
        Some(coin) => format!("{} ({asset}) in {currency}", coin.name),
        None => {
            warn!(%asset, "Coin is not in the catalogue");
            format!("{asset} in {currency}")
        }
    };

    let pb = ui::new_spinner(&format!("Fetching {asset}/{currency} quote..."));
    let quote = provider.fetch_quote(asset, currency).await;
    pb.finish_and_clear();

    match quote {
        Ok(quote) => {
            println!("{}\n", ui::style_text(&title, ui::StyleType::Title));
            println!("{}", quote_table(&quote));
        }
        Err(e) => {
            debug!(error = %e, "Quote unavailable");
            println!("{}", ui::style_text(UNAVAILABLE_MESSAGE, ui::StyleType::Error));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExchangeRate;
    use chrono::NaiveDate;

    #[test]
    fn test_quote_table() {
        let quote = RateQuote {
            from_code: "BTC".to_string(),
            from_name: Some("Bitcoin".to_string()),
            to_code: "USD".to_string(),
            to_name: Some("United States Dollar".to_string()),
            rate: ExchangeRate::new(65000.12).unwrap(),
            last_refreshed: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(12, 30, 5)),
            time_zone: Some("UTC".to_string()),
            bid: Some(64999.5),
            ask: None,
        };

        let rendered = quote_table(&quote).to_string();
        assert!(rendered.contains("BTC (Bitcoin)"));
        assert!(rendered.contains("USD (United States Dollar)"));
        assert!(rendered.contains("65,000.12"));
        assert!(rendered.contains("64,999.50"));
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("2024-05-01 12:30:05 UTC"));
    }
}
