//! Runtime configuration
//!
//! Merges command-line flags, environment variables (read by clap), stored
//! settings, and built-in defaults into one `Config`. Flags and environment
//! win over stored settings, which win over defaults.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::cache::{CacheConfig, TimeBoxedCache, DEFAULT_FRESHNESS_WINDOW};
use crate::cli::{join_city, parse_units_arg, Cli, CliError};
use crate::data::{Units, WeatherClient, WeatherService};
use crate::storage::FavoritesStore;

/// Errors that can occur while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A CLI value was invalid
    #[error(transparent)]
    Cli(#[from] CliError),

    /// No API key was given
    #[error("No API key configured. Pass --api-key or set OPENWEATHER_API_KEY")]
    MissingApiKey,

    /// No city was given and no default city is stored
    #[error("No city given and no default city set. Use `weatherdash default <CITY>`")]
    MissingCity,

    /// No data file was given and no home directory is known
    #[error("Cannot determine a data directory. Pass --data-file")]
    NoDataDir,
}

/// Settings for one run of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// OpenWeatherMap API key, if any
    pub api_key: Option<String>,
    /// API root override
    pub api_url: Option<String>,
    /// Units for requests and display
    pub units: Units,
    /// Response cache settings
    pub cache: CacheConfig,
}

impl Config {
    /// Builds the config from parsed arguments and stored settings
    ///
    /// # Returns
    /// * `Ok(Config)` with defaults filled in
    /// * `Err(ConfigError)` if `--units` is not a known unit system
    pub fn resolve(cli: &Cli, store: &FavoritesStore) -> Result<Self, ConfigError> {
        let units = match cli.units.as_deref() {
            Some(units) => parse_units_arg(units)?,
            None => store.units(),
        };

        let window = cli
            .cache_ttl
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FRESHNESS_WINDOW);

        Ok(Self {
            api_key: cli
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            api_url: cli.api_url.clone(),
            units,
            cache: CacheConfig {
                window,
                capacity: cli.cache_capacity,
            },
        })
    }

    /// Location of the favorites/settings file
    pub fn data_file(cli: &Cli) -> Result<PathBuf, ConfigError> {
        match &cli.data_file {
            Some(path) => Ok(path.clone()),
            None => FavoritesStore::default_path().ok_or(ConfigError::NoDataDir),
        }
    }

    /// The API key, or an error explaining how to set one
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    /// Builds an API client from this config
    pub fn weather_client(&self) -> Result<WeatherClient, ConfigError> {
        let client = WeatherClient::new(self.require_api_key()?).with_units(self.units);
        Ok(match &self.api_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    /// Builds a cached weather service from this config
    pub fn weather_service(&self) -> Result<WeatherService, ConfigError> {
        let cache = TimeBoxedCache::with_config(self.cache);
        Ok(WeatherService::new(self.weather_client()?, cache))
    }
}

/// Picks the city from the arguments, falling back to the stored default
pub fn resolve_city(words: &[String], store: &FavoritesStore) -> Result<String, ConfigError> {
    join_city(words)
        .or_else(|| store.default_city().map(str::to_string))
        .ok_or(ConfigError::MissingCity)
}
