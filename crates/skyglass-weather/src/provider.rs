//! Open-Meteo forecast and air-quality provider.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use crate::error::WeatherError;
use crate::moon::moon_phase_for_date;
use crate::retry::{with_retry, RetryConfig};
use crate::types::{
    Coordinates, CurrentConditions, DailySeries, HourlySeries, TemperatureUnit, Units, WeatherData,
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,weather_code,wind_speed_10m,wind_direction_10m,surface_pressure";
const HOURLY_FIELDS: &str =
    "temperature_2m,weather_code,precipitation_probability,uv_index,is_day,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max,precipitation_sum,wind_speed_10m_max";
const AIR_CURRENT_FIELDS: &str = "us_aqi,pm10,pm2_5";
const AIR_HOURLY_FIELDS: &str = "us_aqi";

/// Endpoint and request settings for [`WeatherProvider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub forecast_days: u8,
    pub air_quality_days: u8,
    pub temperature_unit: TemperatureUnit,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_string(),
            air_quality_url: AIR_QUALITY_URL.to_string(),
            forecast_days: 16,
            air_quality_days: 5,
            temperature_unit: TemperatureUnit::Celsius,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    settings: ProviderSettings,
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            settings,
        })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Fetch forecast and air quality for a location.
    ///
    /// Both requests run concurrently. A failed forecast is an error; a failed
    /// air-quality request only leaves the AQI fields empty.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, coords: &Coordinates) -> Result<WeatherData, WeatherError> {
        let (forecast, air) = tokio::join!(self.fetch_forecast(coords), self.fetch_air_quality(coords));

        let forecast = forecast?;
        let air = match air {
            Ok(air) => Some(air),
            Err(e) => {
                tracing::warn!("Air quality unavailable, continuing without AQI: {}", e);
                None
            }
        };

        let data = forecast.into_weather_data(air, Utc::now());
        tracing::info!(
            "Fetched weather for {}: {} hourly, {} daily entries (offset {}s)",
            coords.label(),
            data.hourly.time.len(),
            data.daily.time.len(),
            data.utc_offset_seconds
        );
        Ok(data)
    }

    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<ForecastResponse, WeatherError> {
        let query = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", self.settings.forecast_days.to_string()),
            (
                "temperature_unit",
                self.settings.temperature_unit.api_value().to_string(),
            ),
        ];
        self.get_json(&self.settings.forecast_url, &query).await
    }

    async fn fetch_air_quality(
        &self,
        coords: &Coordinates,
    ) -> Result<AirQualityResponse, WeatherError> {
        let query = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", AIR_CURRENT_FIELDS.to_string()),
            ("hourly", AIR_HOURLY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", self.settings.air_quality_days.to_string()),
        ];
        self.get_json(&self.settings.air_quality_url, &query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        tracing::debug!("GET {}", url);
        let response = with_retry(&self.settings.retry, || {
            self.client.get(url).query(query).send()
        })
        .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("Weather API error {}: {}", status, body);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default = "default_timezone")]
    timezone: String,
    current_units: CurrentUnitsResponse,
    current: CurrentResponse,
    hourly: HourlyResponse,
    daily: DailyResponse,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize)]
struct CurrentUnitsResponse {
    temperature_2m: String,
    wind_speed_10m: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    is_day: u8,
    weather_code: i32,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    surface_pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    wind_speed_10m: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    time: Vec<String>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    #[serde(default)]
    uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AirQualityResponse {
    #[serde(default)]
    current: AirCurrentResponse,
    #[serde(default)]
    hourly: AirHourlyResponse,
}

#[derive(Debug, Default, Deserialize)]
struct AirCurrentResponse {
    us_aqi: Option<f64>,
    pm10: Option<f64>,
    pm2_5: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AirHourlyResponse {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    us_aqi: Vec<Option<f64>>,
}

fn round_aqi(value: f64) -> i32 {
    value.round() as i32
}

impl ForecastResponse {
    fn into_weather_data(self, air: Option<AirQualityResponse>, fetched_at: DateTime<Utc>) -> WeatherData {
        let air = air.unwrap_or_default();

        // Align hourly AQI with forecast hours by timestamp
        let aqi_by_time: HashMap<&str, i32> = air
            .hourly
            .time
            .iter()
            .zip(&air.hourly.us_aqi)
            .filter_map(|(t, v)| v.map(|v| (t.as_str(), round_aqi(v))))
            .collect();
        let us_aqi = if aqi_by_time.is_empty() {
            Vec::new()
        } else {
            self.hourly
                .time
                .iter()
                .map(|t| aqi_by_time.get(t.as_str()).copied())
                .collect()
        };

        let moon_phase = self
            .daily
            .time
            .iter()
            .map(|t| match NaiveDate::parse_from_str(t, "%Y-%m-%d") {
                Ok(date) => moon_phase_for_date(date),
                Err(e) => {
                    tracing::warn!("Unparseable daily date {:?}: {}", t, e);
                    0.0
                }
            })
            .collect();

        let current = CurrentConditions {
            temperature: self.current.temperature_2m,
            weather_code: self.current.weather_code,
            wind_speed: self.current.wind_speed_10m,
            wind_direction: self.current.wind_direction_10m,
            is_day: self.current.is_day != 0,
            time: self.current.time,
            humidity: self.current.relative_humidity_2m,
            apparent_temperature: self.current.apparent_temperature,
            pressure: self.current.surface_pressure,
            aqi: air.current.us_aqi.map(round_aqi),
            pm2_5: air.current.pm2_5,
            pm10: air.current.pm10,
        };

        WeatherData {
            current,
            hourly: HourlySeries {
                time: self.hourly.time,
                temperature: self.hourly.temperature_2m,
                weather_code: self.hourly.weather_code,
                precipitation_probability: self.hourly.precipitation_probability,
                wind_speed: self.hourly.wind_speed_10m,
                us_aqi,
            },
            daily: DailySeries {
                time: self.daily.time,
                weather_code: self.daily.weather_code,
                temperature_max: self.daily.temperature_2m_max,
                temperature_min: self.daily.temperature_2m_min,
                sunrise: self.daily.sunrise,
                sunset: self.daily.sunset,
                uv_index_max: self.daily.uv_index_max,
                precipitation_sum: self.daily.precipitation_sum,
                wind_speed_max: self.daily.wind_speed_10m_max,
                moon_phase,
            },
            units: Units {
                temperature: self.current_units.temperature_2m,
                wind_speed: self.current_units.wind_speed_10m,
            },
            utc_offset_seconds: self.utc_offset_seconds,
            timezone: self.timezone,
            fetched_at,
        }
    }
}
