//! Command-line interface parsing for the weather dashboard
//!
//! This module handles parsing of CLI arguments using clap. Running without a
//! subcommand starts the interactive menu.

use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::Units;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified units name is not recognized
    #[error("Invalid units: '{0}'. Valid units: metric, imperial, standard")]
    InvalidUnits(String),
}

/// Weather dashboard - current conditions, forecasts, and favorite cities
#[derive(Parser, Debug)]
#[command(name = "weatherdash")]
#[command(about = "Current weather, 5-day forecasts, and favorite cities from OpenWeatherMap")]
#[command(version)]
pub struct Cli {
    /// OpenWeatherMap API key
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API root, e.g. for a local mock server
    #[arg(long, global = true, env = "WEATHERDASH_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Units for this run: metric, imperial, or standard
    #[arg(long, global = true, value_name = "UNITS")]
    pub units: Option<String>,

    /// Seconds a fetched response is reused before fetching again
    #[arg(long, global = true, env = "WEATHERDASH_CACHE_TTL", value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Keep at most this many cached responses, evicting the least recently used
    #[arg(long, global = true, value_name = "N")]
    pub cache_capacity: Option<NonZeroUsize>,

    /// Location of the favorites/settings file
    #[arg(long, global = true, env = "WEATHERDASH_DATA_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Log cache and request activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show current weather (defaults to the stored default city)
    Current {
        /// City name, e.g. "Paris" or "New York"
        city: Vec<String>,
    },
    /// Show the 5-day forecast (defaults to the stored default city)
    Forecast {
        /// City name
        city: Vec<String>,
    },
    /// Manage favorite cities
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Set the default city
    Default {
        /// City name
        #[arg(required = true)]
        city: Vec<String>,
    },
    /// Set the stored default units
    Units {
        /// metric, imperial, or standard
        units: String,
    },
    /// Show a summary of stored data
    Summary,
    /// Start the interactive menu
    Interactive,
}

/// Favorites subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    /// List favorite cities
    List,
    /// Add a city
    Add {
        #[arg(required = true)]
        city: Vec<String>,
    },
    /// Remove a city
    Remove {
        #[arg(required = true)]
        city: Vec<String>,
    },
    /// Remove all cities
    Clear,
    /// Write favorites to a text file
    Export {
        #[arg(default_value = "favorites_export.txt")]
        path: PathBuf,
    },
}

/// Parses a units string argument into a Units enum.
///
/// # Returns
/// * `Ok(Units)` if the string matches a known unit system
/// * `Err(CliError::InvalidUnits)` if the string doesn't match
pub fn parse_units_arg(s: &str) -> Result<Units, CliError> {
    Units::from_str(s).ok_or_else(|| CliError::InvalidUnits(s.to_string()))
}

/// Joins the words of a multi-word city argument
///
/// Returns `None` if no words were given.
pub fn join_city(words: &[String]) -> Option<String> {
    let city = words.join(" ");
    let city = city.trim();
    (!city.is_empty()).then(|| city.to_string())
}
