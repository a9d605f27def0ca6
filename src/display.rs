//! Text rendering for weather reports
//!
//! Produces the boxed plain-text blocks printed by the CLI and the interactive
//! dashboard.

use crate::data::{CurrentWeather, Forecast, Units};
use crate::storage::DataSummary;
use crate::text::title_case;

const RULE_WIDTH: usize = 50;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Renders current conditions
pub fn render_current(weather: &CurrentWeather, units: Units) -> String {
    let temp = units.temperature_symbol();
    let location = if weather.country.is_empty() {
        weather.city.clone()
    } else {
        format!("{}, {}", weather.city, weather.country)
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("   Weather in {}\n", location));
    out.push_str(&format!("{}\n\n", heavy_rule()));
    out.push_str(&format!("Temperature: {:.1}{}\n", weather.temperature, temp));
    out.push_str(&format!("Feels Like: {:.1}{}\n", weather.feels_like, temp));
    out.push_str(&format!("Condition: {}\n", title_case(&weather.description)));
    out.push_str(&format!("Humidity: {}%\n", weather.humidity));
    out.push_str(&format!(
        "Wind Speed: {:.1} {}\n",
        weather.wind_speed,
        units.speed_symbol()
    ));
    out.push_str(&format!("Pressure: {} hPa\n", weather.pressure));
    out.push_str(&format!("{}\n", heavy_rule()));
    out
}

/// Renders a multi-day forecast
pub fn render_forecast(forecast: &Forecast, units: Units) -> String {
    let temp = units.temperature_symbol();

    let mut out = String::new();
    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("   5-Day Forecast for {}\n", forecast.city));
    out.push_str(&format!("{}\n", heavy_rule()));

    if forecast.days.is_empty() {
        out.push_str("\nNo daily forecast available.\n");
    }

    for day in &forecast.days {
        out.push_str(&format!("\n{}\n", day.date));
        out.push_str(&format!(
            "  Temperature: {:.1}{} - {:.1}{}\n",
            day.temp_min, temp, day.temp_max, temp
        ));
        out.push_str(&format!("  Condition: {}\n", title_case(&day.description)));
        out.push_str(&format!("  Humidity: {}%\n", day.humidity));
        out.push_str(&format!("{}\n", light_rule()));
    }
    out
}

/// Renders a numbered list of cities
pub fn render_favorites(favorites: &[String]) -> String {
    if favorites.is_empty() {
        return "No favorite locations saved yet!\n".to_string();
    }

    let mut out = String::from("--- Favorite Locations ---\n");
    for (i, city) in favorites.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, city));
    }
    out
}

/// Renders the stored-data summary
pub fn render_summary(summary: &DataSummary) -> String {
    format!(
        "Favorites: {}\nDefault city: {}\nUnits: {}\n",
        summary.total_favorites,
        summary.default_city.as_deref().unwrap_or("(none)"),
        summary.units.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyForecast;

    fn paris() -> CurrentWeather {
        CurrentWeather {
            city: "Paris".to_string(),
            country: "FR".to_string(),
            temperature: 21.5,
            feels_like: 21.0,
            description: "scattered clouds".to_string(),
            humidity: 58,
            pressure: 1016,
            wind_speed: 4.1,
        }
    }

    #[test]
    fn test_render_current_metric() {
        let out = render_current(&paris(), Units::Metric);

        assert!(out.contains("Weather in Paris, FR"));
        assert!(out.contains("Temperature: 21.5°C"));
        assert!(out.contains("Feels Like: 21.0°C"));
        assert!(out.contains("Condition: Scattered Clouds"));
        assert!(out.contains("Humidity: 58%"));
        assert!(out.contains("Wind Speed: 4.1 m/s"));
        assert!(out.contains("Pressure: 1016 hPa"));
    }

    #[test]
    fn test_render_current_imperial_symbols() {
        let out = render_current(&paris(), Units::Imperial);

        assert!(out.contains("21.5°F"));
        assert!(out.contains("4.1 mph"));
    }

    #[test]
    fn test_render_current_without_country() {
        let mut weather = paris();
        weather.country.clear();

        let out = render_current(&weather, Units::Metric);

        assert!(out.contains("Weather in Paris\n"));
    }

    #[test]
    fn test_render_forecast() {
        let forecast = Forecast {
            city: "Paris".to_string(),
            days: vec![DailyForecast {
                date: "Monday, July 15".to_string(),
                temp_min: 18.0,
                temp_max: 24.5,
                description: "light rain".to_string(),
                humidity: 70,
            }],
        };

        let out = render_forecast(&forecast, Units::Metric);

        assert!(out.contains("5-Day Forecast for Paris"));
        assert!(out.contains("Monday, July 15"));
        assert!(out.contains("Temperature: 18.0°C - 24.5°C"));
        assert!(out.contains("Condition: Light Rain"));
        assert!(out.contains("Humidity: 70%"));
    }

    #[test]
    fn test_render_empty_forecast() {
        let forecast = Forecast {
            city: "Paris".to_string(),
            days: Vec::new(),
        };

        assert!(render_forecast(&forecast, Units::Metric).contains("No daily forecast available"));
    }

    #[test]
    fn test_render_favorites() {
        assert_eq!(render_favorites(&[]), "No favorite locations saved yet!\n");
        assert_eq!(
            render_favorites(&["Paris".to_string(), "Oslo".to_string()]),
            "--- Favorite Locations ---\n1. Paris\n2. Oslo\n"
        );
    }

    #[test]
    fn test_render_summary() {
        let summary = DataSummary {
            total_favorites: 2,
            default_city: None,
            units: Units::Metric,
        };

        assert_eq!(
            render_summary(&summary),
            "Favorites: 2\nDefault city: (none)\nUnits: metric\n"
        );
    }
}
