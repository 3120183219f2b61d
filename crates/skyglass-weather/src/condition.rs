//! WMO weather code classification and descriptions.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Weather categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherType {
    #[default]
    Clear,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherType {
    /// Convert WMO weather code to WeatherType
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 | 80..=82 => Self::Rain,
            71..=77 | 85..=86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Get icon name; clear skies switch between sun and moon
    pub fn icon_name(&self, is_day: bool) -> &'static str {
        match self {
            Self::Clear if is_day => "sun",
            Self::Clear => "moon",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Drizzle => "cloud_drizzle",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }
}

/// (code, English, Chinese), sorted by code
static WMO_DESCRIPTIONS: &[(i32, &str, &str)] = &[
    (0, "Clear sky", "晴朗"),
    (1, "Mainly clear", "大致晴朗"),
    (2, "Partly cloudy", "多云"),
    (3, "Overcast", "阴天"),
    (45, "Fog", "雾"),
    (48, "Depositing rime fog", "冻雾"),
    (51, "Light drizzle", "毛毛雨"),
    (53, "Moderate drizzle", "中度毛毛雨"),
    (55, "Dense drizzle", "密毛毛雨"),
    (61, "Slight rain", "小雨"),
    (63, "Moderate rain", "中雨"),
    (65, "Heavy rain", "大雨"),
    (71, "Slight snow fall", "小雪"),
    (73, "Moderate snow fall", "中雪"),
    (75, "Heavy snow fall", "大雪"),
    (77, "Snow grains", "雪粒"),
    (80, "Slight rain showers", "阵雨"),
    (81, "Moderate rain showers", "中度阵雨"),
    (82, "Violent rain showers", "暴雨"),
    (85, "Slight snow showers", "阵雪"),
    (86, "Heavy snow showers", "大阵雪"),
    (95, "Thunderstorm", "雷雨"),
    (96, "Thunderstorm with slight hail", "雷雨伴有冰雹"),
    (99, "Thunderstorm with heavy hail", "强雷雨伴有冰雹"),
];

/// Classify a WMO code. Codes outside every known range are `Clear`.
pub fn classify_weather(code: i32) -> WeatherType {
    WeatherType::from_wmo_code(code)
}

/// English description of a WMO code, "Unknown" when not in the table.
pub fn describe_weather(code: i32) -> &'static str {
    describe_weather_in(code, Locale::En)
}

pub fn describe_weather_in(code: i32, locale: Locale) -> &'static str {
    match WMO_DESCRIPTIONS.binary_search_by_key(&code, |(c, _, _)| *c) {
        Ok(idx) => {
            let (_, en, zh) = WMO_DESCRIPTIONS[idx];
            match locale {
                Locale::En => en,
                Locale::Zh => zh,
            }
        }
        Err(_) => match locale {
            Locale::En => "Unknown",
            Locale::Zh => "未知",
        },
    }
}

/// Icon identifier for a WMO code at the given time of day
pub fn icon_name(code: i32, is_day: bool) -> &'static str {
    WeatherType::from_wmo_code(code).icon_name(is_day)
}
