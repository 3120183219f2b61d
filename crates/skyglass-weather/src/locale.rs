use serde::{Deserialize, Serialize};

/// Display language for derived labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Language code understood by the geocoding APIs
    pub fn api_code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Word used for the city's current calendar day
    pub fn today(&self) -> &'static str {
        match self {
            Self::En => "Today",
            Self::Zh => "今天",
        }
    }

    /// Word used for the current hourly slot
    pub fn now(&self) -> &'static str {
        match self {
            Self::En => "Now",
            Self::Zh => "现在",
        }
    }

    /// Short weekday name, Sunday first
    pub fn weekday(&self, days_from_sunday: u32) -> &'static str {
        const EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        const ZH: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];
        let idx = (days_from_sunday % 7) as usize;
        match self {
            Self::En => EN[idx],
            Self::Zh => ZH[idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_wraps() {
        assert_eq!(Locale::En.weekday(0), "Sun");
        assert_eq!(Locale::En.weekday(6), "Sat");
        assert_eq!(Locale::En.weekday(7), "Sun");
        assert_eq!(Locale::Zh.weekday(1), "周一");
    }

    #[test]
    fn test_locale_serde_lowercase() {
        let json = serde_json::to_string(&Locale::Zh).unwrap();
        assert_eq!(json, "\"zh\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
