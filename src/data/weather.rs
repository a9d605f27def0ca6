//! OpenWeatherMap API client
//!
//! This module provides functionality to fetch current conditions and 5-day
//! forecasts from the OpenWeatherMap API and parse them into our weather
//! data structures.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::{round1, CurrentWeather, DailyForecast, Forecast, Units};

/// Base URL for the OpenWeatherMap API
const OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of days in a forecast
const FORECAST_DAYS: usize = 5;

/// Local minute-of-day range treated as "around noon": [10:30, 13:30).
///
/// The forecast list is 3-hourly, so exactly one slot of any day falls in this
/// range regardless of the city's UTC offset.
const NOON_SLOT_MINUTES: std::ops::Range<u32> = 630..810;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API rejected the key (HTTP 401)
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The API does not know the city (HTTP 404)
    #[error("City not found: '{0}'")]
    CityNotFound(String),

    /// Any other non-success HTTP status
    #[error("Request failed with status {0}")]
    Status(u16),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// The server could not be reached
    #[error("No internet connection")]
    Connection,

    /// Other HTTP transport failure
    #[error("HTTP request failed: {0}")]
    RequestFailed(reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// A forecast entry carried an out-of-range timestamp
    #[error("Invalid timestamp in response: {0}")]
    InvalidTimestamp(i64),

    /// The city name was blank
    #[error("City name cannot be empty")]
    EmptyCity,
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_connect() {
            WeatherError::Connection
        } else {
            WeatherError::RequestFailed(err)
        }
    }
}

/// Client for fetching weather data from the OpenWeatherMap API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    units: Units,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient with metric units
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            units: Units::default(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Use a different unit system
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Unit system used for requests
    pub fn units(&self) -> Units {
        self.units
    }

    /// Fetch current conditions for a city
    ///
    /// # Arguments
    /// * `city` - City name as typed by the user, e.g. "Paris" or "Paris,FR"
    ///
    /// # Returns
    /// * `Ok(CurrentWeather)` - Parsed conditions
    /// * `Err(WeatherError)` - If the request fails or the response is malformed
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let text = self.request("weather", city).await?;
        let api_response: CurrentResponse = serde_json::from_str(&text)?;

        self.parse_current(api_response)
    }

    /// Fetch a 5-day forecast for a city, one entry per day around noon
    ///
    /// # Arguments
    /// * `city` - City name as typed by the user
    ///
    /// # Returns
    /// * `Ok(Forecast)` - Up to five daily summaries
    /// * `Err(WeatherError)` - If the request fails or the response is malformed
    pub async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let text = self.request("forecast", city).await?;
        let api_response: ForecastResponse = serde_json::from_str(&text)?;

        self.parse_forecast(api_response)
    }

    /// Issue a GET for `endpoint` and map HTTP failures to `WeatherError`
    async fn request(&self, endpoint: &str, city: &str) -> Result<String, WeatherError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, city, units = self.units.as_str(), "requesting weather data");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound(city.to_string())),
            status => Err(WeatherError::Status(status.as_u16())),
        }
    }

    /// Parse the current-weather response into a CurrentWeather struct
    fn parse_current(&self, response: CurrentResponse) -> Result<CurrentWeather, WeatherError> {
        let description = response
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| WeatherError::MissingField("weather".to_string()))?;

        Ok(CurrentWeather {
            city: response.name,
            country: response.sys.country.unwrap_or_default(),
            temperature: round1(response.main.temp),
            feels_like: round1(response.main.feels_like),
            description,
            humidity: response.main.humidity.round() as u8,
            pressure: response.main.pressure.round() as u32,
            wind_speed: round1(response.wind.speed),
        })
    }

    /// Parse the 3-hourly forecast list into at most five daily summaries
    ///
    /// Entries are converted to the city's local time. The first entry of each
    /// date that falls in the noon slot is kept; days without one are skipped.
    fn parse_forecast(&self, response: ForecastResponse) -> Result<Forecast, WeatherError> {
        let offset = FixedOffset::east_opt(response.city.timezone).unwrap_or_else(|| Utc.fix());

        let mut days = Vec::with_capacity(FORECAST_DAYS);
        let mut seen: HashSet<NaiveDate> = HashSet::new();

        for item in &response.list {
            let local = DateTime::from_timestamp(item.dt, 0)
                .ok_or(WeatherError::InvalidTimestamp(item.dt))?
                .with_timezone(&offset);
            let minute_of_day = local.hour() * 60 + local.minute();

            if NOON_SLOT_MINUTES.contains(&minute_of_day) && seen.insert(local.date_naive()) {
                let description = item
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .ok_or_else(|| WeatherError::MissingField("list.weather".to_string()))?;

                days.push(DailyForecast {
                    date: local.format("%A, %B %d").to_string(),
                    temp_min: round1(item.main.temp_min),
                    temp_max: round1(item.main.temp_max),
                    description,
                    humidity: item.main.humidity.round() as u8,
                });
            }

            if days.len() >= FORECAST_DAYS {
                break;
            }
        }

        Ok(Forecast {
            city: response.city.name,
            days,
        })
    }
}

/// Current weather response
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    sys: SysInfo,
    main: MainReadings,
    weather: Vec<ConditionInfo>,
    wind: WindInfo,
}

#[derive(Debug, Deserialize)]
struct SysInfo {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

/// 5-day / 3-hour forecast response
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastItem>,
    city: CityInfo,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    /// Unix timestamp, UTC
    dt: i64,
    main: ForecastReadings,
    weather: Vec<ConditionInfo>,
}

#[derive(Debug, Deserialize)]
struct ForecastReadings {
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct CityInfo {
    name: String,
    /// Shift in seconds from UTC
    #[serde(default)]
    timezone: i32,
}
