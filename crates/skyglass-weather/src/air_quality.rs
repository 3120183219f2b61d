//! US AQI banding for gauge rendering.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// AQI severity bands, ordered from cleanest to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiBand {
    Good,
    Moderate,
    LightlyPolluted,
    ModeratelyPolluted,
    HeavilyPolluted,
    SeverelyPolluted,
}

struct BandInfo {
    band: AqiBand,
    /// Inclusive upper bound; `None` for the open-ended last band
    upper: Option<i32>,
    lower: i32,
    en: &'static str,
    zh: &'static str,
    color_tag: &'static str,
}

static AQI_BANDS: [BandInfo; 6] = [
    BandInfo { band: AqiBand::Good, upper: Some(50), lower: 0, en: "Good", zh: "优", color_tag: "green" },
    BandInfo { band: AqiBand::Moderate, upper: Some(100), lower: 50, en: "Moderate", zh: "良", color_tag: "yellow" },
    BandInfo { band: AqiBand::LightlyPolluted, upper: Some(150), lower: 100, en: "Lightly Polluted", zh: "轻度污染", color_tag: "orange" },
    BandInfo { band: AqiBand::ModeratelyPolluted, upper: Some(200), lower: 150, en: "Moderately Polluted", zh: "中度污染", color_tag: "red" },
    BandInfo { band: AqiBand::HeavilyPolluted, upper: Some(300), lower: 200, en: "Heavily Polluted", zh: "重度污染", color_tag: "purple" },
    BandInfo { band: AqiBand::SeverelyPolluted, upper: None, lower: 300, en: "Severely Polluted", zh: "严重污染", color_tag: "maroon" },
];

impl AqiBand {
    fn info(&self) -> &'static BandInfo {
        &AQI_BANDS[self.rank() as usize - 1]
    }

    /// Severity rank, 1 (Good) through 6 (Severely Polluted)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Good => 1,
            Self::Moderate => 2,
            Self::LightlyPolluted => 3,
            Self::ModeratelyPolluted => 4,
            Self::HeavilyPolluted => 5,
            Self::SeverelyPolluted => 6,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        let info = self.info();
        match locale {
            Locale::En => info.en,
            Locale::Zh => info.zh,
        }
    }

    pub fn color_tag(&self) -> &'static str {
        self.info().color_tag
    }
}

/// A classified AQI value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiReading {
    pub aqi: i32,
    pub band: AqiBand,
    /// Position within the band, clamped to [0, 100]
    pub percent: f64,
}

impl AqiReading {
    pub fn label(&self) -> &'static str {
        self.band.label(Locale::En)
    }

    pub fn label_in(&self, locale: Locale) -> &'static str {
        self.band.label(locale)
    }

    pub fn color_tag(&self) -> &'static str {
        self.band.color_tag()
    }

    /// Needle angle for a half-circle gauge, -90 (empty) to 90 (full)
    pub fn gauge_angle(&self) -> f64 {
        -90.0 + self.percent / 100.0 * 180.0
    }
}

/// Classify an AQI value into its band.
///
/// Negative values are not rejected; they land in `Good` with a percent
/// clamped to 0.
pub fn classify_aqi(aqi: i32) -> AqiReading {
    let info = AQI_BANDS
        .iter()
        .find(|b| b.upper.map_or(true, |upper| aqi <= upper))
        .unwrap_or(&AQI_BANDS[AQI_BANDS.len() - 1]);

    let percent = match info.upper {
        Some(upper) => {
            let width = f64::from(upper - info.lower);
            f64::from(aqi - info.lower) / width * 100.0
        }
        None => 100.0,
    };

    AqiReading {
        aqi,
        band: info.band,
        percent: percent.clamp(0.0, 100.0),
    }
}
