//! Weather Dashboard - current conditions and forecasts from the terminal
//!
//! One-shot subcommands print a single report; with no subcommand an
//! interactive menu runs until the user exits. Responses are cached in memory
//! for the freshness window, so repeated lookups in the menu reuse them.

use std::error::Error;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use weatherdash::cli::{join_city, parse_units_arg, Cli, Command, FavoritesAction};
use weatherdash::config::{resolve_city, Config, ConfigError};
use weatherdash::dashboard::Dashboard;
use weatherdash::display::{render_current, render_favorites, render_forecast, render_summary};
use weatherdash::storage::{FavoritesStore, StorageError};

/// Installs the stderr log subscriber.
/// `RUST_LOG` takes precedence; otherwise `-v` selects debug, else warn.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "weatherdash=debug" } else { "weatherdash=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Handles a `favorites` subcommand
fn run_favorites(store: &mut FavoritesStore, action: FavoritesAction) -> Result<(), Box<dyn Error>> {
    match action {
        FavoritesAction::List => print!("{}", render_favorites(store.favorites())),
        FavoritesAction::Add { city } => {
            let city = join_city(&city).unwrap_or_default();
            if store.add_favorite(&city)? {
                println!("✓ {} added to favorites!", city);
            } else {
                println!("✗ {} is already in favorites!", city);
            }
        }
        FavoritesAction::Remove { city } => {
            let city = join_city(&city).unwrap_or_default();
            if store.remove_favorite(&city)? {
                println!("✓ {} removed from favorites!", city);
            } else {
                println!("✗ {} is not in favorites!", city);
            }
        }
        FavoritesAction::Clear => {
            store.clear_favorites()?;
            println!("✓ Favorites cleared");
        }
        FavoritesAction::Export { path } => export_favorites(store, &path)?,
    }
    Ok(())
}

fn export_favorites(store: &FavoritesStore, path: &Path) -> Result<(), Box<dyn Error>> {
    match store.export_favorites(path) {
        Ok(count) => {
            println!("✓ {} favorites exported to {}", count, path.display());
            Ok(())
        }
        Err(StorageError::NothingToExport) => {
            println!("No favorites to export!");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut store = FavoritesStore::open(Config::data_file(&cli)?)?;
    let config = Config::resolve(&cli, &store)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Current { city } => {
            let city = resolve_city(&city, &store)?;
            let mut service = config.weather_service()?;
            let weather = service.current_weather(&city).await?;
            print!("{}", render_current(&weather, config.units));
        }
        Command::Forecast { city } => {
            let city = resolve_city(&city, &store)?;
            let mut service = config.weather_service()?;
            let forecast = service.forecast(&city).await?;
            print!("{}", render_forecast(&forecast, config.units));
        }
        Command::Favorites { action } => {
            run_favorites(&mut store, action.unwrap_or(FavoritesAction::List))?;
        }
        Command::Default { city } => {
            store.set_default_city(&join_city(&city).unwrap_or_default())?;
            if let Some(city) = store.default_city() {
                println!("✓ Default city set to {}", city);
            }
        }
        Command::Units { units } => {
            let units = parse_units_arg(&units)?;
            store.set_units(units)?;
            println!("✓ Default units set to {}", units.as_str());
        }
        Command::Summary => print!("{}", render_summary(&store.summary())),
        Command::Interactive => {
            // Favorites work without a key; lookups report it when chosen.
            let mut service = match config.weather_service() {
                Ok(service) => Some(service),
                Err(ConfigError::MissingApiKey) => None,
                Err(err) => return Err(err.into()),
            };
            let stdin = io::stdin();
            Dashboard::new(service.as_mut(), &mut store, stdin.lock(), io::stdout(), config.units)
                .run()
                .await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
