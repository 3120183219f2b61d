//! Moon phase from a reference new moon.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Mean length of the synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_67;

/// 2000-01-06T18:14:00Z, a known new moon
pub const REFERENCE_NEW_MOON_MS: i64 = 947_182_440_000;

const MS_PER_DAY: f64 = 86_400_000.0;

/// The eight named phases of the lunar cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhaseName {
    /// Bucket a phase value. The new and full moon buckets straddle 0 and 0.5.
    pub fn from_phase(phase: f64) -> Self {
        if phase > 0.95 || phase <= 0.05 {
            Self::NewMoon
        } else if phase < 0.20 {
            Self::WaxingCrescent
        } else if phase <= 0.30 {
            Self::FirstQuarter
        } else if phase < 0.45 {
            Self::WaxingGibbous
        } else if phase <= 0.55 {
            Self::FullMoon
        } else if phase < 0.70 {
            Self::WaningGibbous
        } else if phase <= 0.80 {
            Self::LastQuarter
        } else {
            Self::WaningCrescent
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::NewMoon, Locale::En) => "New Moon",
            (Self::WaxingCrescent, Locale::En) => "Waxing Crescent",
            (Self::FirstQuarter, Locale::En) => "First Quarter",
            (Self::WaxingGibbous, Locale::En) => "Waxing Gibbous",
            (Self::FullMoon, Locale::En) => "Full Moon",
            (Self::WaningGibbous, Locale::En) => "Waning Gibbous",
            (Self::LastQuarter, Locale::En) => "Last Quarter",
            (Self::WaningCrescent, Locale::En) => "Waning Crescent",
            (Self::NewMoon, Locale::Zh) => "新月",
            (Self::WaxingCrescent, Locale::Zh) => "娥眉月",
            (Self::FirstQuarter, Locale::Zh) => "上弦月",
            (Self::WaxingGibbous, Locale::Zh) => "盈凸月",
            (Self::FullMoon, Locale::Zh) => "满月",
            (Self::WaningGibbous, Locale::Zh) => "亏凸月",
            (Self::LastQuarter, Locale::Zh) => "下弦月",
            (Self::WaningCrescent, Locale::Zh) => "残月",
        }
    }
}

fn normalize_phase(cycles: f64) -> f64 {
    let phase = cycles.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if phase >= 1.0 || phase.is_nan() {
        0.0
    } else {
        phase
    }
}

/// Phase of the moon at `instant`, in [0, 1). 0 is new, 0.5 is full.
pub fn moon_phase(instant: DateTime<Utc>) -> f64 {
    let elapsed_ms = (instant.timestamp_millis() - REFERENCE_NEW_MOON_MS) as f64;
    normalize_phase(elapsed_ms / MS_PER_DAY / SYNODIC_MONTH_DAYS)
}

/// Phase at UTC midnight of a calendar date
pub fn moon_phase_for_date(date: NaiveDate) -> f64 {
    moon_phase(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Shift a phase by a (possibly fractional or negative) number of days
pub fn phase_after_days(phase: f64, days: f64) -> f64 {
    normalize_phase(phase + days / SYNODIC_MONTH_DAYS)
}

/// Illuminated fraction of the disc as a whole percentage
pub fn illumination_percent(phase: f64) -> u8 {
    let lit = (1.0 - (phase * std::f64::consts::TAU).cos()) / 2.0;
    (lit * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn describe_moon_phase(phase: f64) -> &'static str {
    MoonPhaseName::from_phase(phase).label(Locale::En)
}

pub fn describe_moon_phase_in(phase: f64, locale: Locale) -> &'static str {
    MoonPhaseName::from_phase(phase).label(locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap()
    }

    fn close_on_circle(a: f64, b: f64) -> bool {
        let d = (a - b).abs();
        d < 1e-6 || (1.0 - d) < 1e-6
    }

    #[test]
    fn test_reference_constant_matches_epoch() {
        assert_eq!(reference().timestamp_millis(), REFERENCE_NEW_MOON_MS);
    }

    #[test]
    fn test_reference_is_new_moon() {
        assert!(moon_phase(reference()).abs() < 1e-9);
    }

    #[test]
    fn test_phase_is_periodic() {
        let synodic_ms = (SYNODIC_MONTH_DAYS * MS_PER_DAY).round() as i64;
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let later = start + Duration::milliseconds(synodic_ms);
        assert!(close_on_circle(moon_phase(start), moon_phase(later)));
    }

    #[test]
    fn test_phase_before_reference_wraps_positive() {
        let before = reference() - Duration::days(3);
        let phase = moon_phase(before);
        assert!((0.0..1.0).contains(&phase));
        assert!((phase - (1.0 - 3.0 / SYNODIC_MONTH_DAYS)).abs() < 1e-9);
    }

    #[test]
    fn test_half_cycle_is_full_moon() {
        let half_ms = (SYNODIC_MONTH_DAYS * MS_PER_DAY / 2.0).round() as i64;
        let full = reference() + Duration::milliseconds(half_ms);
        assert_eq!(describe_moon_phase(moon_phase(full)), "Full Moon");
    }

    #[test]
    fn test_phase_range_over_many_days() {
        let start = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        for day in 0..2000 {
            let phase = moon_phase(start + Duration::days(day * 7));
            assert!((0.0..1.0).contains(&phase));
        }
    }

    #[test]
    fn test_describe_named_points() {
        assert_eq!(describe_moon_phase(0.5), "Full Moon");
        assert_eq!(describe_moon_phase(0.0), "New Moon");
        assert_eq!(describe_moon_phase(0.96), "New Moon");
    }

    #[test]
    fn test_describe_bucket_edges() {
        assert_eq!(describe_moon_phase(0.05), "New Moon");
        assert_eq!(describe_moon_phase(0.06), "Waxing Crescent");
        assert_eq!(describe_moon_phase(0.20), "First Quarter");
        assert_eq!(describe_moon_phase(0.30), "First Quarter");
        assert_eq!(describe_moon_phase(0.31), "Waxing Gibbous");
        assert_eq!(describe_moon_phase(0.45), "Full Moon");
        assert_eq!(describe_moon_phase(0.55), "Full Moon");
        assert_eq!(describe_moon_phase(0.60), "Waning Gibbous");
        assert_eq!(describe_moon_phase(0.70), "Last Quarter");
        assert_eq!(describe_moon_phase(0.80), "Last Quarter");
        assert_eq!(describe_moon_phase(0.85), "Waning Crescent");
        assert_eq!(describe_moon_phase(0.95), "Waning Crescent");
    }

    #[test]
    fn test_describe_localized() {
        assert_eq!(describe_moon_phase_in(0.5, Locale::Zh), "满月");
        assert_eq!(describe_moon_phase_in(0.9, Locale::Zh), "残月");
    }

    #[test]
    fn test_illumination() {
        assert_eq!(illumination_percent(0.0), 0);
        assert_eq!(illumination_percent(0.25), 50);
        assert_eq!(illumination_percent(0.5), 100);
    }

    #[test]
    fn test_phase_after_days_wraps() {
        let shifted = phase_after_days(0.9, SYNODIC_MONTH_DAYS * 0.2);
        assert!((shifted - 0.1).abs() < 1e-9);
        let back = phase_after_days(0.1, -SYNODIC_MONTH_DAYS * 0.2);
        assert!((back - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_phase_for_date_uses_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 7).unwrap();
        let expected = (5.0 * 60.0 + 46.0) / (24.0 * 60.0) / SYNODIC_MONTH_DAYS;
        assert!((moon_phase_for_date(date) - expected).abs() < 1e-9);
    }
}
