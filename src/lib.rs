pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{AssetCode, ConversionRequest, CurrencyCode, DisplayResult};
use anyhow::{Context, Result, bail};
use tracing::{debug, info};

/// Arguments of the `convert` command; `None` falls back to the configured defaults.
#[derive(Debug, Default, Clone)]
pub struct ConvertArgs {
    pub amount: Option<f64>,
    pub no_amount: bool,
    pub coin: Option<String>,
    pub currency: Option<String>,
}

pub enum AppCommand {
    Coins,
    Convert(ConvertArgs),
    Rate {
        coin: Option<String>,
        currency: Option<String>,
    },
}

/// Settings passed on the command line that take precedence over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions<'a> {
    pub config_path: Option<&'a str>,
    pub api_key: Option<&'a str>,
}

fn resolve_asset(coin: Option<&str>, config: &AppConfig) -> Result<AssetCode> {
    match coin {
        Some(code) => code.parse::<AssetCode>().context("Invalid --coin value"),
        None => Ok(config.defaults.coin.clone()),
    }
}

fn resolve_currency(currency: Option<&str>, config: &AppConfig) -> Result<CurrencyCode> {
    match currency {
        Some(code) => code.parse::<CurrencyCode>().context("Invalid --currency value"),
        None => Ok(config.defaults.currency.clone()),
    }
}

fn resolve_amount(
    amount: Option<f64>,
    no_amount: bool,
    config: &AppConfig,
) -> Result<Option<f64>> {
    if no_amount {
        return Ok(None);
    }
    let amount = amount.unwrap_or(config.defaults.amount);
    if !amount.is_finite() {
        bail!("Amount must be a finite number, got {amount}");
    }
    Ok(Some(amount))
}

fn build_provider(
    config: &AppConfig,
    api_key: Option<&str>,
) -> Result<providers::AlphaVantageProvider> {
    let api_key = config.resolve_api_key(api_key)?;
    Ok(providers::AlphaVantageProvider::new(
        config.alpha_vantage_url(),
        &api_key,
    ))
}

fn load_config(options: &RunOptions<'_>) -> Result<AppConfig> {
    let config = match options.config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = config.alpha_vantage_url(),
        coins = config.coins.len(),
        "Loaded config"
    );
    Ok(config)
}

/// Runs the `convert` command and returns the result it displayed.
pub async fn run_conversion(args: ConvertArgs, options: RunOptions<'_>) -> Result<DisplayResult> {
    let config = load_config(&options)?;
    let request = ConversionRequest {
        asset: resolve_asset(args.coin.as_deref(), &config)?,
        currency: resolve_currency(args.currency.as_deref(), &config)?,
        amount: resolve_amount(args.amount, args.no_amount, &config)?,
    };
    let provider = build_provider(&config, options.api_key)?;
    cli::convert::run(&provider, &request, &config.coins).await
}

pub async fn run_command(command: AppCommand, options: RunOptions<'_>) -> Result<()> {
    info!("coinconv starting...");

    match command {
        AppCommand::Coins => {
            let config = load_config(&options)?;
            cli::coins::run(&config.coins);
            Ok(())
        }
        AppCommand::Convert(args) => run_conversion(args, options).await.map(|_| ()),
        AppCommand::Rate { coin, currency } => {
            let config = load_config(&options)?;
            let asset = resolve_asset(coin.as_deref(), &config)?;
            let currency = resolve_currency(currency.as_deref(), &config)?;
            let provider = build_provider(&config, options.api_key)?;
            cli::rate::run(&provider, &asset, &currency, &config.coins).await
        }
    }
}
