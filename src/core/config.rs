use crate::core::asset::{AssetCode, Coin, CurrencyCode, default_coins};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlphaVantageProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub alpha_vantage: Option<AlphaVantageProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            alpha_vantage: Some(AlphaVantageProviderConfig {
                base_url: DEFAULT_ALPHA_VANTAGE_URL.to_string(),
            }),
        }
    }
}

/// Values preselected when a command line argument is omitted.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DefaultsConfig {
    pub coin: AssetCode,
    pub currency: CurrencyCode,
    pub amount: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            coin: AssetCode::known("BTC"),
            currency: CurrencyCode::known("USD"),
            amount: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default = "default_coins")]
    pub coins: Vec<Coin>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_key: None,
            providers: ProvidersConfig::default(),
            defaults: DefaultsConfig::default(),
            coins: default_coins(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "coinconv", "coinconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn alpha_vantage_url(&self) -> &str {
        self.providers
            .alpha_vantage
            .as_ref()
            .map_or(DEFAULT_ALPHA_VANTAGE_URL, |p| &p.base_url)
    }

    /// Resolves the API key, preferring an explicit override.
    pub fn resolve_api_key(&self, override_key: Option<&str>) -> Result<String> {
        override_key
            .or(self.api_key.as_deref())
            .map(str::to_string)
            .context("No API key configured; set `api_key` in the config file or pass --api-key")
    }
}
