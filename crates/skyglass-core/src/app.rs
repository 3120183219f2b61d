use std::sync::Arc;

use skyglass_weather::{
    Coordinates, GeocodingClient, SavedCity, WeatherCache, WeatherData, WeatherError,
    WeatherProvider,
};
use tracing::instrument;

use crate::config::Config;
use crate::error::{AppError, ConfigError};

/// A forecast together with the city it was loaded for
#[derive(Debug, Clone)]
pub struct CityWeather {
    pub city: SavedCity,
    pub weather: WeatherData,
    /// Set when the refresh failed and the cached forecast was used instead
    pub stale: bool,
}

/// Application state: configuration, API clients and the weather cache
pub struct App {
    config: Arc<Config>,
    provider: WeatherProvider,
    geocoder: GeocodingClient,
    cache: WeatherCache,
}

impl App {
    /// Build the application from a configuration. Invalid configurations
    /// are rejected before any client is created.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let provider = WeatherProvider::new(config.provider_settings())?;
        let geocoder = config.geocoding_client()?;
        let cache = WeatherCache::new(&config.config_dir);

        tracing::info!(
            "Application ready (cache: {}, {} recent cities)",
            cache.path().display(),
            cache.recent_cities().len()
        );

        Ok(Self {
            config: Arc::new(config),
            provider,
            geocoder,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    pub fn recent_cities(&self) -> &[SavedCity] {
        self.cache.recent_cities()
    }

    /// City to show at startup: the last one loaded, else the configured default
    pub fn startup_city(&self) -> SavedCity {
        match (self.cache.last_city(), self.cache.last_location()) {
            (Some(name), Some(coords)) => SavedCity {
                name: name.to_string(),
                latitude: coords.latitude,
                longitude: coords.longitude,
            },
            _ => self.config.weather.default_location.clone(),
        }
    }

    /// Resolve a free-text query to the best-matching city
    pub async fn find_city(&self, query: &str) -> Result<SavedCity, AppError> {
        let hit = self
            .geocoder
            .search_city(query)
            .await
            .into_iter()
            .next()
            .ok_or_else(|| AppError::CityNotFound(query.trim().to_string()))?;

        tracing::info!("Resolved {:?} to {}", query, hit.display_name());
        Ok(SavedCity {
            name: hit.name,
            latitude: hit.latitude,
            longitude: hit.longitude,
        })
    }

    /// Load weather for raw coordinates, naming them by reverse geocoding
    pub async fn load_location(&mut self, coords: Coordinates) -> Result<CityWeather, AppError> {
        let name = self.geocoder.city_name(&coords).await;
        self.load_city(SavedCity {
            name,
            latitude: coords.latitude,
            longitude: coords.longitude,
        })
        .await
    }

    /// Fetch weather for `city` and record it in the cache.
    ///
    /// When the fetch fails and the cache holds a forecast for the same
    /// location, that forecast is returned marked as stale.
    #[instrument(skip(self, city), fields(city = %city.name), level = "info")]
    pub async fn load_city(&mut self, city: SavedCity) -> Result<CityWeather, AppError> {
        let coords = city.coordinates();

        match self.provider.fetch(&coords).await {
            Ok(weather) => {
                self.cache.store_weather(&city.name, coords, weather.clone());
                self.cache.remember_city(city.clone());
                if let Err(e) = self.cache.save() {
                    tracing::warn!("Failed to save weather cache: {}", e);
                }
                Ok(CityWeather {
                    city,
                    weather,
                    stale: false,
                })
            }
            Err(e) => {
                tracing::error!("Weather fetch failed: {}", e);
                match self.cached_weather_for(coords) {
                    Some(weather) => {
                        tracing::warn!("Showing cached weather fetched at {}", weather.fetched_at);
                        Ok(CityWeather {
                            city,
                            weather,
                            stale: true,
                        })
                    }
                    None => Err(fetch_error(e)),
                }
            }
        }
    }

    fn cached_weather_for(&self, coords: Coordinates) -> Option<WeatherData> {
        if self.cache.last_location() != Some(coords) {
            return None;
        }
        self.cache.last_weather().cloned()
    }

    /// Drop a city from the recent list; returns whether it was there
    pub fn forget_city(&mut self, name: &str) -> Result<bool, AppError> {
        let removed = self.cache.forget_city(name);
        if removed {
            self.cache.save()?;
            tracing::info!("Removed {} from recent cities", name);
        }
        Ok(removed)
    }
}

/// Transport and HTTP failures surface as network errors; the rest stay weather errors
fn fetch_error(err: WeatherError) -> AppError {
    match err {
        WeatherError::Network(_) | WeatherError::Api { .. } => AppError::Network(err.into()),
        other => AppError::Weather(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            config_dir: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.network.timeout_secs = 0;

        let err = App::new(config).err().unwrap();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_startup_city_defaults_to_configured_location() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config_in(&dir)).unwrap();
        assert_eq!(app.startup_city().name, "Dubai");
    }

    #[test]
    fn test_forget_unknown_city() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(config_in(&dir)).unwrap();
        assert!(!app.forget_city("Nowhere").unwrap());
    }

    #[test]
    fn test_fetch_error_classification() {
        let api = fetch_error(WeatherError::Api {
            status: 500,
            message: "boom".into(),
        });
        assert!(matches!(
            api,
            AppError::Network(NetworkError::ServerError { status: 500, .. })
        ));

        let parse = fetch_error(WeatherError::Parse("missing field".into()));
        assert!(matches!(parse, AppError::Weather(WeatherError::Parse(_))));
    }
}
