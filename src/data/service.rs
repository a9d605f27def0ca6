//! Cached access to weather data
//!
//! `WeatherService` sits between the dashboard and the API client. Each request
//! goes through a caller-supplied `TimeBoxedCache`, so asking for the same city
//! twice within the freshness window costs one HTTP call.

use tracing::info;

use super::{CurrentWeather, Forecast, WeatherClient, WeatherError};
use crate::cache::{cache_key, Clock, RequestKind, SystemClock, TimeBoxedCache};

/// A cached response of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum CachedReport {
    /// Current conditions
    Current(CurrentWeather),
    /// Daily forecast
    Forecast(Forecast),
}

/// Weather lookups backed by a response cache
#[derive(Debug)]
pub struct WeatherService<C = SystemClock> {
    client: WeatherClient,
    cache: TimeBoxedCache<CachedReport, C>,
}

impl<C: Clock> WeatherService<C> {
    /// Creates a service from a client and an already-constructed cache
    pub fn new(client: WeatherClient, cache: TimeBoxedCache<CachedReport, C>) -> Self {
        Self { client, cache }
    }

    /// The underlying API client
    pub fn client(&self) -> &WeatherClient {
        &self.client
    }

    /// The response cache
    pub fn cache(&self) -> &TimeBoxedCache<CachedReport, C> {
        &self.cache
    }

    /// Current conditions for `city`, served from cache while fresh
    ///
    /// # Returns
    /// * `Ok(CurrentWeather)` - Cached or freshly fetched conditions
    /// * `Err(WeatherError::EmptyCity)` - If `city` is blank
    /// * `Err(WeatherError)` - If a fetch was needed and failed
    pub async fn current_weather(&mut self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let city = validate_city(city)?;
        let key = cache_key(RequestKind::Current, city);
        self.log_if_cached(&key);

        let client = &self.client;
        let report = self
            .cache
            .get_or_fetch_async(&key, || async move {
                client.fetch_current(city).await.map(CachedReport::Current)
            })
            .await?;

        match report {
            CachedReport::Current(weather) => Ok(weather),
            CachedReport::Forecast(_) => Err(WeatherError::MissingField("current".to_string())),
        }
    }

    /// Five-day forecast for `city`, served from cache while fresh
    ///
    /// # Returns
    /// * `Ok(Forecast)` - Cached or freshly fetched forecast
    /// * `Err(WeatherError::EmptyCity)` - If `city` is blank
    /// * `Err(WeatherError)` - If a fetch was needed and failed
    pub async fn forecast(&mut self, city: &str) -> Result<Forecast, WeatherError> {
        let city = validate_city(city)?;
        let key = cache_key(RequestKind::Forecast, city);
        self.log_if_cached(&key);

        let client = &self.client;
        let report = self
            .cache
            .get_or_fetch_async(&key, || async move {
                client.fetch_forecast(city).await.map(CachedReport::Forecast)
            })
            .await?;

        match report {
            CachedReport::Forecast(forecast) => Ok(forecast),
            CachedReport::Current(_) => Err(WeatherError::MissingField("forecast".to_string())),
        }
    }

    /// Whether a request would currently be answered from cache
    pub fn is_cached(&self, kind: RequestKind, city: &str) -> bool {
        self.cache.contains_fresh(&cache_key(kind, city))
    }

    /// Drops the cached response for one request
    pub fn invalidate(&mut self, kind: RequestKind, city: &str) -> bool {
        self.cache.invalidate(&cache_key(kind, city))
    }

    /// Drops every cached response
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn log_if_cached(&self, key: &str) {
        if self.cache.contains_fresh(key) {
            info!(key, "using cached data");
        }
    }
}

/// Trims `city` and rejects blank names
fn validate_city(city: &str) -> Result<&str, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        Err(WeatherError::EmptyCity)
    } else {
        Ok(city)
    }
}
