//! Integration tests for CLI argument handling
//!
//! Runs the binary against a temporary data file and, where weather data is
//! needed, a local mock of the OpenWeatherMap API.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use mockito::Matcher;
use tempfile::TempDir;

const CURRENT_BODY: &str = r#"{
    "name": "Paris",
    "sys": {"country": "FR"},
    "main": {"temp": 21.46, "feels_like": 21.04, "humidity": 58, "pressure": 1016},
    "weather": [{"description": "scattered clouds"}],
    "wind": {"speed": 4.12}
}"#;

/// Helper to run the CLI with given args and capture output
fn run_cli(data_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weatherdash"))
        .arg("--data-file")
        .arg(data_dir.join("weather_data.json"))
        .args(args)
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("WEATHERDASH_API_URL")
        .env_remove("WEATHERDASH_CACHE_TTL")
        .env_remove("WEATHERDASH_DATA_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute weatherdash")
}

/// Runs the interactive menu with `input` piped to stdin
fn run_interactive(data_dir: &Path, input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_weatherdash"))
        .arg("--data-file")
        .arg(data_dir.join("weather_data.json"))
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("WEATHERDASH_API_URL")
        .env_remove("WEATHERDASH_CACHE_TTL")
        .env_remove("WEATHERDASH_DATA_FILE")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start weatherdash");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write menu input");
    child.wait_with_output().expect("Failed to wait for weatherdash")
}

#[test]
fn test_help_flag_exits_successfully() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weatherdash"), "Help should mention weatherdash");
    assert!(stdout.contains("forecast"), "Help should mention the forecast command");
    assert!(stdout.contains("--cache-ttl"), "Help should mention --cache-ttl");
}

#[test]
fn test_invalid_units_prints_error_and_exits() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--units", "cubits", "summary"]);
    assert!(!output.status.success(), "Expected invalid units to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid units"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_current_without_api_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["current", "Paris"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_current_without_city_or_default_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--api-key", "k", "current"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("default city"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_favorites_round_trip_through_data_file() {
    let temp_dir = TempDir::new().unwrap();

    assert!(run_cli(temp_dir.path(), &["favorites", "add", "new", "york"]).status.success());
    assert!(run_cli(temp_dir.path(), &["favorites", "add", "Oslo"]).status.success());
    assert!(run_cli(temp_dir.path(), &["default", "oslo"]).status.success());

    let list = run_cli(temp_dir.path(), &["favorites"]);
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("1. New York"), "Unexpected list: {}", stdout);
    assert!(stdout.contains("2. Oslo"), "Unexpected list: {}", stdout);

    let summary = run_cli(temp_dir.path(), &["summary"]);
    let stdout = String::from_utf8_lossy(&summary.stdout);
    assert!(stdout.contains("Favorites: 2"));
    assert!(stdout.contains("Default city: Oslo"));

    let export_path = temp_dir.path().join("export.txt");
    let export = run_cli(
        temp_dir.path(),
        &["favorites", "export", export_path.to_str().unwrap()],
    );
    assert!(export.status.success());
    let exported = std::fs::read_to_string(&export_path).unwrap();
    assert!(exported.starts_with("FAVORITE CITIES\n"));
    assert!(exported.contains("1. New York\n2. Oslo\n"));
}

#[test]
fn test_interactive_favorites_without_api_key() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_interactive(temp_dir.path(), "4\nParis\n7\n");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Paris added to favorites!"), "Unexpected stdout: {}", stdout);
    assert!(stdout.contains("Goodbye!"));

    let list = run_cli(temp_dir.path(), &["favorites"]);
    assert!(String::from_utf8_lossy(&list.stdout).contains("1. Paris"));
}

#[test]
fn test_global_flags_after_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["summary", "--units", "imperial"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_current_weather_from_mock_api() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Paris".into()),
            Matcher::UrlEncoded("appid".into(), "k".into()),
            Matcher::UrlEncoded("units".into(), "metric".into()),
        ]))
        .with_status(200)
        .with_body(CURRENT_BODY)
        .expect(1)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let url = server.url();
    let output = run_cli(
        temp_dir.path(),
        &["--api-key", "k", "--api-url", url.as_str(), "current", "Paris"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Weather in Paris, FR"));
    assert!(stdout.contains("Temperature: 21.5°C"));
    assert!(stdout.contains("Condition: Scattered Clouds"));
    mock.assert();
}

#[test]
fn test_unknown_city_reports_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let url = server.url();
    let output = run_cli(
        temp_dir.path(),
        &["--api-key", "k", "--api-url", url.as_str(), "current", "Atlantis"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("City not found"), "Unexpected stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use weatherdash::cli::{parse_units_arg, Cli, Command, FavoritesAction};
    use weatherdash::data::Units;

    #[test]
    fn test_cli_no_args_starts_interactive() {
        let cli = Cli::parse_from(["weatherdash"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_forecast_with_city() {
        let cli = Cli::parse_from(["weatherdash", "forecast", "Paris"]);
        assert_eq!(
            cli.command,
            Some(Command::Forecast {
                city: vec!["Paris".to_string()]
            })
        );
    }

    #[test]
    fn test_cli_favorites_remove() {
        let cli = Cli::parse_from(["weatherdash", "favorites", "remove", "Oslo"]);
        assert_eq!(
            cli.command,
            Some(Command::Favorites {
                action: Some(FavoritesAction::Remove {
                    city: vec!["Oslo".to_string()]
                })
            })
        );
    }

    #[test]
    fn test_parse_units_arg_returns_units() {
        assert_eq!(parse_units_arg("imperial").unwrap(), Units::Imperial);
        assert!(parse_units_arg("invalid").is_err());
    }
}
