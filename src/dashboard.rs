//! Interactive menu for the weather dashboard
//!
//! A line-oriented loop over any `BufRead`/`Write` pair. Weather lookups go
//! through the caller's `WeatherService`, so repeated requests for the same
//! city within the freshness window are answered from cache. Without a
//! service (no API key) the favorites options still work and lookups report
//! the missing key.

use std::io::{self, BufRead, Write};

use crate::cache::{Clock, RequestKind};
use crate::config::ConfigError;
use crate::data::{Units, WeatherService};
use crate::display::{render_current, render_favorites, render_forecast};
use crate::storage::FavoritesStore;

const MENU: &str = "\
==================================================
     WEATHER INFORMATION DASHBOARD
==================================================
1. Get Current Weather
2. Get 5-Day Forecast
3. View Saved Locations
4. Add Favorite Location
5. Remove Favorite Location
6. Clear Cached Data
7. Exit
==================================================";

/// Interactive session state
#[derive(Debug)]
pub struct Dashboard<'a, R, W, C> {
    service: Option<&'a mut WeatherService<C>>,
    store: &'a mut FavoritesStore,
    input: R,
    output: W,
    units: Units,
}

impl<'a, R: BufRead, W: Write, C: Clock> Dashboard<'a, R, W, C> {
    /// Creates a session reading choices from `input` and printing to `output`
    ///
    /// `service` is `None` when no API key is configured; weather lookups then
    /// print the configuration error instead of fetching.
    pub fn new(
        service: Option<&'a mut WeatherService<C>>,
        store: &'a mut FavoritesStore,
        input: R,
        output: W,
        units: Units,
    ) -> Self {
        Self {
            service,
            store,
            input,
            output,
            units,
        }
    }

    /// Runs the menu until the user exits or input ends
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nWelcome to Weather Information Dashboard!")?;
        if self.service.is_none() {
            writeln!(self.output, "Note: {}", ConfigError::MissingApiKey)?;
        }

        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("\nEnter your choice (1-7): ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.current_weather().await?,
                "2" => self.forecast().await?,
                "3" => self.view_favorites().await?,
                "4" => self.add_favorite()?,
                "5" => self.remove_favorite()?,
                "6" => {
                    if let Some(service) = self.service.as_deref_mut() {
                        service.clear_cache();
                    }
                    writeln!(self.output, "\n✓ Cached weather data cleared")?;
                }
                "7" => {
                    writeln!(self.output, "\nThank you for using Weather Dashboard!")?;
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "\n✗ Invalid choice! Please try again.")?,
            }
        }

        self.output.flush()
    }

    /// Prints `message` and reads one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a city name; `None` if blank or at end of input
    fn prompt_city(&mut self, message: &str) -> io::Result<Option<String>> {
        match self.prompt(message)? {
            Some(city) if !city.is_empty() => Ok(Some(city)),
            Some(_) => {
                writeln!(self.output, "City name cannot be empty!")?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Asks for a 1-based index into `len` items
    fn prompt_index(&mut self, message: &str, len: usize) -> io::Result<Option<usize>> {
        let Some(choice) = self.prompt(message)? else {
            return Ok(None);
        };
        Ok(choice
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=len).contains(n))
            .map(|n| n - 1))
    }

    /// Fetches and prints current weather; returns whether it succeeded
    async fn show_current(&mut self, city: &str) -> io::Result<bool> {
        let Some(service) = self.service.as_deref_mut() else {
            writeln!(self.output, "✗ {}", ConfigError::MissingApiKey)?;
            return Ok(false);
        };
        if service.is_cached(RequestKind::Current, city) {
            writeln!(self.output, "(Using cached data)")?;
        }
        match service.current_weather(city).await {
            Ok(weather) => {
                write!(self.output, "\n{}", render_current(&weather, self.units))?;
                Ok(true)
            }
            Err(err) => {
                writeln!(self.output, "✗ Could not find weather data for '{}': {}", city, err)?;
                Ok(false)
            }
        }
    }

    async fn current_weather(&mut self) -> io::Result<()> {
        let Some(city) = self.prompt_city("\nEnter city name: ")? else {
            return Ok(());
        };

        writeln!(self.output, "\nFetching weather data...")?;
        if !self.show_current(&city).await? {
            return Ok(());
        }

        let save = self.prompt("\nSave this location to favorites? (y/n): ")?;
        if save.is_some_and(|answer| answer.eq_ignore_ascii_case("y")) {
            self.save_favorite(&city)?;
        }
        Ok(())
    }

    async fn forecast(&mut self) -> io::Result<()> {
        let Some(city) = self.prompt_city("\nEnter city name: ")? else {
            return Ok(());
        };

        writeln!(self.output, "\nFetching forecast data...")?;
        let Some(service) = self.service.as_deref_mut() else {
            writeln!(self.output, "✗ {}", ConfigError::MissingApiKey)?;
            return Ok(());
        };
        if service.is_cached(RequestKind::Forecast, &city) {
            writeln!(self.output, "(Using cached data)")?;
        }
        match service.forecast(&city).await {
            Ok(forecast) => write!(self.output, "\n{}", render_forecast(&forecast, self.units))?,
            Err(err) => writeln!(
                self.output,
                "✗ Could not find forecast data for '{}': {}",
                city, err
            )?,
        }
        Ok(())
    }

    async fn view_favorites(&mut self) -> io::Result<()> {
        let favorites = self.store.favorites().to_vec();
        write!(self.output, "\n{}", render_favorites(&favorites))?;
        if favorites.is_empty() {
            return Ok(());
        }

        let message = "\nEnter number to view weather (or press Enter to go back): ";
        if let Some(index) = self.prompt_index(message, favorites.len())? {
            let city = &favorites[index];
            writeln!(self.output, "\nFetching weather for {}...", city)?;
            self.show_current(city).await?;
        }
        Ok(())
    }

    fn save_favorite(&mut self, city: &str) -> io::Result<()> {
        match self.store.add_favorite(city) {
            Ok(true) => writeln!(self.output, "✓ {} added to favorites!", city),
            Ok(false) => writeln!(self.output, "✗ {} is already in favorites!", city),
            Err(err) => writeln!(self.output, "✗ Could not save {}: {}", city, err),
        }
    }

    fn add_favorite(&mut self) -> io::Result<()> {
        if let Some(city) = self.prompt_city("\nEnter city name to add: ")? {
            self.save_favorite(&city)?;
        }
        Ok(())
    }

    fn remove_favorite(&mut self) -> io::Result<()> {
        let favorites = self.store.favorites().to_vec();
        if favorites.is_empty() {
            writeln!(self.output, "\nNo favorite locations to remove!")?;
            return Ok(());
        }
        write!(self.output, "\n{}", render_favorites(&favorites))?;

        let message = "\nEnter number to remove (or press Enter to cancel): ";
        if let Some(index) = self.prompt_index(message, favorites.len())? {
            let city = &favorites[index];
            match self.store.remove_favorite(city) {
                Ok(true) => writeln!(self.output, "✓ {} removed from favorites!", city)?,
                Ok(false) => writeln!(self.output, "✗ {} is not in favorites!", city)?,
                Err(err) => writeln!(self.output, "✗ Could not remove {}: {}", city, err)?,
            }
        }
        Ok(())
    }
}
