use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use skyglass_weather::geocode::{GEOCODING_URL, REVERSE_GEOCODING_URL};
use skyglass_weather::provider::{AIR_QUALITY_URL, FORECAST_URL};
use skyglass_weather::{
    GeocodingClient, Locale, ProviderSettings, RetryConfig, SavedCity, TemperatureUnit,
    WeatherError,
};

const APP_DIR_NAME: &str = "skyglass";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Open-Meteo serves at most 16 forecast days and 7 air-quality days
const MAX_FORECAST_DAYS: u8 = 16;
const MAX_AIR_QUALITY_DAYS: u8 = 7;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and the weather cache
    pub config_dir: PathBuf,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Language for labels and geocoding results
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    /// Refresh interval in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    #[serde(default = "default_air_quality_days")]
    pub air_quality_days: u8,

    /// Shown when nothing has been cached yet
    #[serde(default = "default_location")]
    pub default_location: SavedCity,
}

fn default_refresh_minutes() -> u32 {
    15
}

fn default_forecast_days() -> u8 {
    16
}

fn default_air_quality_days() -> u8 {
    5
}

fn default_location() -> SavedCity {
    SavedCity {
        name: "Dubai".to_string(),
        latitude: 25.2048,
        longitude: 55.2708,
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            temperature_unit: TemperatureUnit::default(),
            refresh_minutes: default_refresh_minutes(),
            forecast_days: default_forecast_days(),
            air_quality_days: default_air_quality_days(),
            default_location: default_location(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub geocoding_url: String,
    pub reverse_geocoding_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_string(),
            air_quality_url: AIR_QUALITY_URL.to_string(),
            geocoding_url: GEOCODING_URL.to_string(),
            reverse_geocoding_url: REVERSE_GEOCODING_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            endpoints: EndpointsConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default
    /// file if none exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; any error fails the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        let endpoints = [
            (&self.endpoints.forecast_url, "endpoints.forecast_url"),
            (&self.endpoints.air_quality_url, "endpoints.air_quality_url"),
            (&self.endpoints.geocoding_url, "endpoints.geocoding_url"),
            (
                &self.endpoints.reverse_geocoding_url,
                "endpoints.reverse_geocoding_url",
            ),
        ];
        for (url, field) in endpoints {
            validate_url(url, field, &mut result);
        }

        let location = &self.weather.default_location;
        if !(-90.0..=90.0).contains(&location.latitude) {
            result.add_error(
                "weather.default_location.latitude",
                format!("Latitude must be between -90 and 90, got {}", location.latitude),
            );
        }
        if !(-180.0..=180.0).contains(&location.longitude) {
            result.add_error(
                "weather.default_location.longitude",
                format!("Longitude must be between -180 and 180, got {}", location.longitude),
            );
        }
        if location.name.trim().is_empty() {
            result.add_warning("weather.default_location.name", "Default location has no name");
        }

        if !(1..=MAX_FORECAST_DAYS).contains(&self.weather.forecast_days) {
            result.add_error(
                "weather.forecast_days",
                format!("Forecast days must be between 1 and {}", MAX_FORECAST_DAYS),
            );
        }
        if !(1..=MAX_AIR_QUALITY_DAYS).contains(&self.weather.air_quality_days) {
            result.add_error(
                "weather.air_quality_days",
                format!("Air quality days must be between 1 and {}", MAX_AIR_QUALITY_DAYS),
            );
        }

        if self.weather.refresh_minutes == 0 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh disabled (0 minutes)",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if self.network.timeout_secs == 0 {
            result.add_error("network.timeout_secs", "Timeout must be greater than 0");
        }
        if self.network.max_retries > 10 {
            result.add_warning("network.max_retries", "More than 10 retries is unusually high");
        }

        result
    }

    /// Settings for the forecast and air-quality provider
    pub fn provider_settings(&self) -> ProviderSettings {
        let defaults = RetryConfig::default();
        ProviderSettings {
            forecast_url: self.endpoints.forecast_url.clone(),
            air_quality_url: self.endpoints.air_quality_url.clone(),
            forecast_days: self.weather.forecast_days,
            air_quality_days: self.weather.air_quality_days,
            temperature_unit: self.weather.temperature_unit,
            timeout: Duration::from_secs(self.network.timeout_secs),
            retry: RetryConfig {
                max_retries: self.network.max_retries,
                ..defaults
            },
        }
    }

    pub fn geocoding_client(&self) -> Result<GeocodingClient, WeatherError> {
        GeocodingClient::with_urls(
            &self.endpoints.geocoding_url,
            &self.endpoints.reverse_geocoding_url,
            self.weather.locale,
        )
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
