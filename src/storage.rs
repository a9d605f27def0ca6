//! Local storage for favorite cities and preferences
//!
//! Persists a small JSON document (favorites plus settings) to an XDG-compliant
//! location (`~/.config/weatherdash/weather_data.json` on Linux). Every change is
//! written through to disk immediately.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::Units;
use crate::text::title_case;

/// File name of the data document inside the config directory
pub const DATA_FILE_NAME: &str = "weather_data.json";

/// Errors that can occur while reading or writing stored data
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a file failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The data could not be serialized
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A blank city name was given
    #[error("City name cannot be empty")]
    EmptyCity,

    /// Export was requested with no favorites saved
    #[error("No favorites to export")]
    NothingToExport,
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Unit system for API requests
    #[serde(default)]
    pub units: Units,
    /// City used when none is given on the command line
    #[serde(default)]
    pub default_city: Option<String>,
}

/// The document stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoredData {
    #[serde(default)]
    favorites: Vec<String>,
    #[serde(default)]
    settings: Settings,
}

/// Overview of stored data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSummary {
    pub total_favorites: usize,
    pub default_city: Option<String>,
    pub units: Units,
}

/// Favorite cities and settings backed by a JSON file
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
    data: StoredData,
}

impl FavoritesStore {
    /// Returns the default data file location, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "weatherdash")?;
        Some(project_dirs.config_dir().join(DATA_FILE_NAME))
    }

    /// Opens the store at `path`
    ///
    /// A missing file is created with default contents. A file that is not
    /// valid JSON is replaced with defaults (logged as a warning).
    ///
    /// # Returns
    /// * `Ok(FavoritesStore)` on success
    /// * `Err(StorageError)` if the file exists but cannot be read, or if the
    ///   defaults cannot be written
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if !path.exists() {
            debug!(path = %path.display(), "creating data file with defaults");
            let store = Self {
                path,
                data: StoredData::default(),
            };
            store.save()?;
            return Ok(store);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<StoredData>(&content) {
            Ok(data) => Ok(Self { path, data }),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "corrupted data file, resetting to defaults");
                let store = Self {
                    path,
                    data: StoredData::default(),
                };
                store.save()?;
                Ok(store)
            }
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Favorite cities in insertion order
    pub fn favorites(&self) -> &[String] {
        &self.data.favorites
    }

    /// Adds a city to favorites
    ///
    /// Returns `Ok(false)` if the city is already a favorite.
    pub fn add_favorite(&mut self, city: &str) -> Result<bool, StorageError> {
        let city = normalize_city(city)?;
        if self.data.favorites.contains(&city) {
            return Ok(false);
        }
        self.data.favorites.push(city);
        self.save()?;
        Ok(true)
    }

    /// Removes a city from favorites
    ///
    /// Returns `Ok(false)` if the city was not a favorite.
    pub fn remove_favorite(&mut self, city: &str) -> Result<bool, StorageError> {
        let city = normalize_city(city)?;
        let before = self.data.favorites.len();
        self.data.favorites.retain(|f| f != &city);
        if self.data.favorites.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Whether `city` is a favorite (case and whitespace insensitive)
    pub fn is_favorite(&self, city: &str) -> bool {
        normalize_city(city).is_ok_and(|city| self.data.favorites.contains(&city))
    }

    /// Removes every favorite
    pub fn clear_favorites(&mut self) -> Result<(), StorageError> {
        self.data.favorites.clear();
        self.save()
    }

    /// The stored default city
    pub fn default_city(&self) -> Option<&str> {
        self.data.settings.default_city.as_deref()
    }

    /// Stores the default city
    pub fn set_default_city(&mut self, city: &str) -> Result<(), StorageError> {
        self.data.settings.default_city = Some(normalize_city(city)?);
        self.save()
    }

    /// The stored unit system
    pub fn units(&self) -> Units {
        self.data.settings.units
    }

    /// Stores the unit system
    pub fn set_units(&mut self, units: Units) -> Result<(), StorageError> {
        self.data.settings.units = units;
        self.save()
    }

    /// Writes favorites as a numbered text list
    ///
    /// # Returns
    /// * `Ok(n)` with the number of cities written
    /// * `Err(StorageError::NothingToExport)` if there are no favorites
    pub fn export_favorites(&self, path: &Path) -> Result<usize, StorageError> {
        if self.data.favorites.is_empty() {
            return Err(StorageError::NothingToExport);
        }

        let mut out = String::from("FAVORITE CITIES\n");
        out.push_str(&"=".repeat(30));
        out.push_str("\n\n");
        for (i, city) in self.data.favorites.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, city));
        }

        fs::write(path, out)?;
        Ok(self.data.favorites.len())
    }

    /// Summary of stored data
    pub fn summary(&self) -> DataSummary {
        DataSummary {
            total_favorites: self.data.favorites.len(),
            default_city: self.data.settings.default_city.clone(),
            units: self.data.settings.units,
        }
    }

    /// Writes the document to disk, creating parent directories as needed
    fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Trims, collapses whitespace, and title-cases a city name
fn normalize_city(city: &str) -> Result<String, StorageError> {
    let words: Vec<String> = city.split_whitespace().map(title_case).collect();
    if words.is_empty() {
        return Err(StorageError::EmptyCity);
    }
    Ok(words.join(" "))
}
