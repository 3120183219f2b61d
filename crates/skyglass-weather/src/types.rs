use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::city_time::CityClock;
use crate::condition::WeatherType;

/// Temperature unit requested from the forecast API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn api_value(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// "25.2°, 55.3°", used when no place name is available
    pub fn label(&self) -> String {
        format!("{:.1}°, {:.1}°", self.latitude, self.longitude)
    }
}

/// A city the user picked, kept in the recent list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SavedCity {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// One hit from the city search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// State or province
    #[serde(default)]
    pub admin1: Option<String>,
}

impl SearchResult {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "Name, Province, Country" with empty parts dropped
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_code: i32,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub is_day: bool,
    /// City wall-clock time of the observation, `YYYY-MM-DDTHH:MM`
    pub time: String,
    pub humidity: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub aqi: Option<i32>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
}

impl CurrentConditions {
    pub fn weather_type(&self) -> WeatherType {
        WeatherType::from_wmo_code(self.weather_code)
    }

    pub fn feels_like(&self) -> f64 {
        self.apparent_temperature.unwrap_or(self.temperature)
    }
}

/// Parallel hourly series, indexed by position in `time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature: Vec<f64>,
    pub weather_code: Vec<i32>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub wind_speed: Vec<f64>,
    /// Hourly AQI, aligned with `time` when the air-quality API answered
    #[serde(default)]
    pub us_aqi: Vec<Option<i32>>,
}

/// Parallel daily series, indexed by position in `time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    pub temperature_max: Vec<f64>,
    pub temperature_min: Vec<f64>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
    pub uv_index_max: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub wind_speed_max: Vec<f64>,
    /// Computed locally for each date
    pub moon_phase: Vec<f64>,
}

/// Units reported by the forecast API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Units {
    pub temperature: String,
    pub wind_speed: String,
}

/// Complete weather data bundle for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
    pub units: Units,
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherData {
    pub fn clock(&self) -> CityClock {
        CityClock::from_offset_seconds(self.utc_offset_seconds)
    }

    /// Current instant in the forecast city
    pub fn city_now(&self) -> DateTime<FixedOffset> {
        self.clock().now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_label() {
        assert_eq!(Coordinates::new(25.2048, 55.2708).label(), "25.2°, 55.3°");
        assert_eq!(Coordinates::new(-33.87, 151.21).label(), "-33.9°, 151.2°");
    }

    #[test]
    fn test_search_result_display_name() {
        let result = SearchResult {
            id: 1,
            name: "Springfield".into(),
            latitude: 39.8,
            longitude: -89.6,
            country: Some("United States".into()),
            admin1: Some("Illinois".into()),
        };
        assert_eq!(result.display_name(), "Springfield, Illinois, United States");

        let bare = SearchResult { admin1: None, country: Some(String::new()), ..result };
        assert_eq!(bare.display_name(), "Springfield");
    }

    #[test]
    fn test_feels_like_falls_back_to_temperature() {
        let current = CurrentConditions {
            temperature: 21.0,
            weather_code: 2,
            wind_speed: 5.0,
            wind_direction: 90.0,
            is_day: true,
            time: "2024-01-01T12:00".into(),
            humidity: None,
            apparent_temperature: None,
            pressure: None,
            aqi: None,
            pm2_5: None,
            pm10: None,
        };
        assert_eq!(current.feels_like(), 21.0);
        assert_eq!(current.weather_type(), WeatherType::Cloudy);
    }
}
