//! Core data models for the weather dashboard
//!
//! This module contains the parsed weather reports handed to the display layer,
//! the unit system used for API requests, and the client and service that
//! fetch them.

pub mod service;
pub mod weather;

pub use service::WeatherService;
pub use weather::{WeatherClient, WeatherError};

use serde::{Deserialize, Serialize};

/// Measurement system requested from the weather API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius and metres per second
    #[default]
    Metric,
    /// Fahrenheit and miles per hour
    Imperial,
    /// Kelvin and metres per second
    Standard,
}

impl Units {
    /// Parses a units name, case-insensitively
    ///
    /// Accepts "metric" / "celsius" / "c", "imperial" / "fahrenheit" / "f",
    /// and "standard" / "kelvin" / "k". Returns `None` for anything else.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Units> {
        match s.to_lowercase().trim() {
            "metric" | "celsius" | "c" => Some(Units::Metric),
            "imperial" | "fahrenheit" | "f" => Some(Units::Imperial),
            "standard" | "kelvin" | "k" => Some(Units::Standard),
            _ => None,
        }
    }

    /// Value of the `units` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Suffix for temperatures
    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    /// Suffix for wind speeds
    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// City name as reported by the API
    pub city: String,
    /// ISO country code
    pub country: String,
    /// Temperature, rounded to one decimal
    pub temperature: f64,
    /// Feels-like temperature, rounded to one decimal
    pub feels_like: f64,
    /// Condition description, e.g. "scattered clouds"
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Wind speed, rounded to one decimal
    pub wind_speed: f64,
}

/// Forecast summary for a single day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    /// Display label, e.g. "Monday, July 15"
    pub date: String,
    /// Minimum temperature, rounded to one decimal
    pub temp_min: f64,
    /// Maximum temperature, rounded to one decimal
    pub temp_max: f64,
    /// Condition description
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
}

/// Multi-day forecast for a city
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// City name as reported by the API
    pub city: String,
    /// One entry per day, at most five
    pub days: Vec<DailyForecast>,
}

/// Rounds to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
