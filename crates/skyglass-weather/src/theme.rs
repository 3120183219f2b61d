//! Background palettes keyed by weather and time of day.

use serde::Serialize;

use crate::condition::WeatherType;

/// Three-stop vertical gradient, top to bottom, as hex colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Backdrop {
    pub top: &'static str,
    pub middle: &'static str,
    pub bottom: &'static str,
}

const fn backdrop(top: &'static str, middle: &'static str, bottom: &'static str) -> Backdrop {
    Backdrop { top, middle, bottom }
}

const DAY_CLEAR: Backdrop = backdrop("#005AA7", "#2980B9", "#86A8E7");
const DAY_CLOUDY: Backdrop = backdrop("#606C88", "#8E9EAB", "#D7DDE8");
const DAY_FOG: Backdrop = backdrop("#9D8157", "#C9A66B", "#E3D5B8");
const DAY_RAIN: Backdrop = backdrop("#4B6CB7", "#587399", "#182848");
const DAY_STORM: Backdrop = backdrop("#2C3E50", "#4CA1AF", "#2C3E50");
const DAY_SNOW: Backdrop = backdrop("#E6DADA", "#274046", "#E6DADA");

const NIGHT_CLEAR: Backdrop = backdrop("#0B1026", "#2B32B2", "#1488CC");
const NIGHT_CLOUDY: Backdrop = backdrop("#232526", "#414345", "#2C3E50");
const NIGHT_FOG: Backdrop = backdrop("#3E3834", "#544F49", "#636363");
const NIGHT_RAIN: Backdrop = backdrop("#000428", "#004E92", "#005C97");
const NIGHT_STORM: Backdrop = backdrop("#0F0C29", "#302B63", "#24243E");
const NIGHT_SNOW: Backdrop = backdrop("#16222A", "#3A6073", "#8CA6DB");

/// Gradient for the dashboard background
pub fn backdrop_for(weather: WeatherType, is_day: bool) -> Backdrop {
    match (weather, is_day) {
        (WeatherType::Clear, true) => DAY_CLEAR,
        (WeatherType::Cloudy, true) => DAY_CLOUDY,
        (WeatherType::Fog, true) => DAY_FOG,
        (WeatherType::Rain | WeatherType::Drizzle, true) => DAY_RAIN,
        (WeatherType::Thunderstorm, true) => DAY_STORM,
        (WeatherType::Snow, true) => DAY_SNOW,
        (WeatherType::Clear, false) => NIGHT_CLEAR,
        (WeatherType::Cloudy, false) => NIGHT_CLOUDY,
        (WeatherType::Fog, false) => NIGHT_FOG,
        (WeatherType::Rain | WeatherType::Drizzle, false) => NIGHT_RAIN,
        (WeatherType::Thunderstorm, false) => NIGHT_STORM,
        (WeatherType::Snow, false) => NIGHT_SNOW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_and_drizzle_share_palette() {
        assert_eq!(
            backdrop_for(WeatherType::Rain, true),
            backdrop_for(WeatherType::Drizzle, true)
        );
        assert_eq!(
            backdrop_for(WeatherType::Rain, false),
            backdrop_for(WeatherType::Drizzle, false)
        );
    }

    #[test]
    fn test_day_and_night_differ() {
        assert_ne!(
            backdrop_for(WeatherType::Clear, true),
            backdrop_for(WeatherType::Clear, false)
        );
        assert_eq!(backdrop_for(WeatherType::Clear, false).top, "#0B1026");
    }
}
