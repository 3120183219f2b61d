//! Position of the sun along the day arc.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunEventKind {
    Sunrise,
    Sunset,
}

/// The sun event a dashboard should headline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub at: DateTime<FixedOffset>,
}

/// A point on the normalised day arc; x runs 0..1 from horizon to horizon,
/// y peaks at 1 at solar noon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPoint {
    pub x: f64,
    pub y: f64,
}

/// Today's sunrise and sunset in city-local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunArc {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

impl SunArc {
    pub fn new(sunrise: DateTime<FixedOffset>, sunset: DateTime<FixedOffset>) -> Self {
        Self { sunrise, sunset }
    }

    pub fn daylight(&self) -> Duration {
        (self.sunset - self.sunrise).max(Duration::zero())
    }

    pub fn is_daylight(&self, now: DateTime<FixedOffset>) -> bool {
        now >= self.sunrise && now <= self.sunset
    }

    /// Fraction of daylight elapsed, clamped to [0, 1]
    pub fn progress(&self, now: DateTime<FixedOffset>) -> f64 {
        let total = self.daylight().num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        let elapsed = (now - self.sunrise).num_milliseconds();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Sun position on the quadratic day arc at `now`
    pub fn position(&self, now: DateTime<FixedOffset>) -> ArcPoint {
        arc_point(self.progress(now))
    }

    /// Sunrise before dawn, sunset during the day, and tomorrow's sunrise
    /// after dusk when it is known.
    pub fn next_event(
        &self,
        now: DateTime<FixedOffset>,
        next_sunrise: Option<DateTime<FixedOffset>>,
    ) -> SunEvent {
        if now < self.sunrise {
            SunEvent { kind: SunEventKind::Sunrise, at: self.sunrise }
        } else if now <= self.sunset {
            SunEvent { kind: SunEventKind::Sunset, at: self.sunset }
        } else {
            match next_sunrise {
                Some(at) => SunEvent { kind: SunEventKind::Sunrise, at },
                None => SunEvent { kind: SunEventKind::Sunset, at: self.sunset },
            }
        }
    }
}

/// Quadratic Bézier from (0,0) through control (0.5,2) to (1,0)
pub fn arc_point(t: f64) -> ArcPoint {
    let t = t.clamp(0.0, 1.0);
    ArcPoint {
        x: t,
        y: 4.0 * t * (1.0 - t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_time::CityClock;

    fn arc() -> (CityClock, SunArc) {
        let clock = CityClock::from_offset_seconds(4 * 3600);
        let arc = SunArc::new(
            clock.parse("2024-06-21T05:30").unwrap(),
            clock.parse("2024-06-21T19:30").unwrap(),
        );
        (clock, arc)
    }

    #[test]
    fn test_daylight_duration() {
        let (_, arc) = arc();
        assert_eq!(arc.daylight(), Duration::hours(14));
    }

    #[test]
    fn test_progress_clamped() {
        let (clock, arc) = arc();
        assert_eq!(arc.progress(clock.parse("2024-06-21T04:00").unwrap()), 0.0);
        assert_eq!(arc.progress(clock.parse("2024-06-21T12:30").unwrap()), 0.5);
        assert_eq!(arc.progress(clock.parse("2024-06-21T22:00").unwrap()), 1.0);
    }

    #[test]
    fn test_zero_length_day() {
        let (clock, _) = arc();
        let t = clock.parse("2024-12-21T12:00").unwrap();
        let polar = SunArc::new(t, t);
        assert_eq!(polar.progress(t), 0.0);
        assert_eq!(polar.daylight(), Duration::zero());
    }

    #[test]
    fn test_position_peaks_at_noon() {
        let (clock, arc) = arc();
        let noon = arc.position(clock.parse("2024-06-21T12:30").unwrap());
        assert!((noon.x - 0.5).abs() < 1e-9);
        assert!((noon.y - 1.0).abs() < 1e-9);
        assert_eq!(arc_point(0.0), ArcPoint { x: 0.0, y: 0.0 });
        assert_eq!(arc_point(1.0), ArcPoint { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_next_event() {
        let (clock, arc) = arc();
        let tomorrow = clock.parse("2024-06-22T05:31").unwrap();

        let dawn = arc.next_event(clock.parse("2024-06-21T03:00").unwrap(), Some(tomorrow));
        assert_eq!(dawn.kind, SunEventKind::Sunrise);
        assert_eq!(dawn.at, arc.sunrise);

        let midday = arc.next_event(clock.parse("2024-06-21T12:00").unwrap(), Some(tomorrow));
        assert_eq!(midday.kind, SunEventKind::Sunset);

        let night = arc.next_event(clock.parse("2024-06-21T21:00").unwrap(), Some(tomorrow));
        assert_eq!(night.kind, SunEventKind::Sunrise);
        assert_eq!(night.at, tomorrow);

        let unknown = arc.next_event(clock.parse("2024-06-21T21:00").unwrap(), None);
        assert_eq!(unknown.kind, SunEventKind::Sunset);
    }

    #[test]
    fn test_is_daylight() {
        let (clock, arc) = arc();
        assert!(arc.is_daylight(clock.parse("2024-06-21T10:00").unwrap()));
        assert!(!arc.is_daylight(clock.parse("2024-06-21T20:00").unwrap()));
    }
}
