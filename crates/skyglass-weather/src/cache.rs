//! Key-based JSON cache for the last forecast and recently viewed cities.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;
use crate::types::{Coordinates, SavedCity, WeatherData};

pub const CACHE_FILE_NAME: &str = "weather_cache.json";
pub const MAX_RECENT_CITIES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct CacheDocument {
    #[serde(default)]
    last_weather: Option<WeatherData>,
    #[serde(default)]
    last_city: Option<String>,
    #[serde(default)]
    last_location: Option<Coordinates>,
    #[serde(default)]
    recent_cities: Vec<SavedCity>,
}

#[derive(Debug)]
pub struct WeatherCache {
    cache_path: PathBuf,
    data: CacheDocument,
}

impl WeatherCache {
    /// Open the cache in `config_dir`. A missing file starts empty; an
    /// unreadable one is logged and also starts empty.
    pub fn new(config_dir: &Path) -> Self {
        let cache_path = config_dir.join(CACHE_FILE_NAME);
        let data = Self::read(&cache_path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable weather cache {}: {}", cache_path.display(), e);
            CacheDocument::default()
        });
        Self { cache_path, data }
    }

    fn read(path: &Path) -> Result<CacheDocument, WeatherError> {
        if !path.exists() {
            return Ok(CacheDocument::default());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| WeatherError::Cache(format!("corrupt cache file: {}", e)))
    }

    /// Write the cache to disk
    pub fn save(&self) -> Result<(), WeatherError> {
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.data)
            .map_err(|e| WeatherError::Cache(e.to_string()))?;
        std::fs::write(&self.cache_path, contents)?;
        tracing::debug!("Saved weather cache to {}", self.cache_path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.cache_path
    }

    pub fn last_weather(&self) -> Option<&WeatherData> {
        self.data.last_weather.as_ref()
    }

    pub fn last_city(&self) -> Option<&str> {
        self.data.last_city.as_deref()
    }

    pub fn last_location(&self) -> Option<Coordinates> {
        self.data.last_location
    }

    /// Most recent first
    pub fn recent_cities(&self) -> &[SavedCity] {
        &self.data.recent_cities
    }

    /// Record a successful load for `city`
    pub fn store_weather(&mut self, city: &str, coords: Coordinates, weather: WeatherData) {
        self.data.last_weather = Some(weather);
        self.data.last_city = Some(city.to_string());
        self.data.last_location = Some(coords);
    }

    /// Put `city` first in the recent list, replacing any entry with the same name
    pub fn remember_city(&mut self, city: SavedCity) {
        self.data.recent_cities.retain(|c| c.name != city.name);
        self.data.recent_cities.insert(0, city);
        self.data.recent_cities.truncate(MAX_RECENT_CITIES);
    }

    /// Remove a recent city by name; returns whether anything was removed
    pub fn forget_city(&mut self, name: &str) -> bool {
        let before = self.data.recent_cities.len();
        self.data.recent_cities.retain(|c| c.name != name);
        self.data.recent_cities.len() != before
    }
}
