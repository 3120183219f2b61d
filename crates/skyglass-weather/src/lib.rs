//! Weather derivations and data access for Skyglass
//!
//! The derivation modules (`condition`, `air_quality`, `wind`, `moon`,
//! `city_time`, `sun`, `theme`, `forecast`) are pure and synchronous. The
//! Open-Meteo provider, geocoding client and cache supply their inputs.

pub mod air_quality;
pub mod cache;
pub mod city_time;
pub mod condition;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod locale;
pub mod moon;
pub mod provider;
pub mod retry;
pub mod sun;
pub mod theme;
pub mod types;
pub mod wind;

pub use air_quality::{classify_aqi, AqiBand, AqiReading};
pub use cache::WeatherCache;
pub use city_time::{
    city_local_at, city_local_now, day_label, day_label_in, format_city_time, format_clock,
    parse_city_date, CityClock,
};
pub use condition::{classify_weather, describe_weather, describe_weather_in, icon_name, WeatherType};
pub use error::WeatherError;
pub use geocode::GeocodingClient;
pub use locale::Locale;
pub use moon::{
    describe_moon_phase, describe_moon_phase_in, illumination_percent, moon_phase,
    moon_phase_for_date, MoonPhaseName,
};
pub use provider::{ProviderSettings, WeatherProvider};
pub use retry::RetryConfig;
pub use sun::{SunArc, SunEvent, SunEventKind};
pub use theme::{backdrop_for, Backdrop};
pub use types::*;
pub use wind::{wind_direction_to_cardinal, wind_scale};
