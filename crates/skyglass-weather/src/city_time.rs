//! City-local time resolution.
//!
//! The forecast API reports timestamps as city wall-clock strings
//! (`YYYY-MM-DDTHH:MM`) together with the city's UTC offset. Every "now" and
//! "today" decision for a city goes through a [`CityClock`] built from that
//! offset, so the device's own timezone never leaks into the result.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::locale::Locale;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A fixed-offset clock for one city
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityClock {
    offset: FixedOffset,
}

impl CityClock {
    /// Build a clock from the offset reported by the forecast API.
    ///
    /// Offsets outside chrono's representable range (a full day or more)
    /// fall back to UTC.
    pub fn from_offset_seconds(utc_offset_seconds: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| {
            tracing::warn!(
                "UTC offset {}s out of range, falling back to UTC",
                utc_offset_seconds
            );
            Utc.fix()
        });
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current instant on the city's wall clock
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.at(Utc::now())
    }

    /// `instant` on the city's wall clock
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// Parse a city wall-clock timestamp. Bare dates resolve to midnight.
    pub fn parse(&self, iso: &str) -> Option<DateTime<FixedOffset>> {
        let iso = iso.trim();
        let naive = TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.and_time(chrono::NaiveTime::MIN))
            })?;
        self.offset.from_local_datetime(&naive).single()
    }

    /// "Today" when `iso` falls on the city's current date, else a weekday name
    pub fn day_label_at(&self, iso: &str, now: DateTime<FixedOffset>, locale: Locale) -> String {
        let Some(date) = self.parse(iso) else {
            return date_part(iso).to_string();
        };
        let today = now.with_timezone(&self.offset).date_naive();
        if date.date_naive() == today {
            locale.today().to_string()
        } else {
            locale
                .weekday(date.weekday().num_days_from_sunday())
                .to_string()
        }
    }

    pub fn day_label(&self, iso: &str, locale: Locale) -> String {
        self.day_label_at(iso, self.now(), locale)
    }

    /// Whether the hourly slot starting at `iso` has not fully elapsed at `now`
    pub fn is_current_or_future_hour(&self, iso: &str, now: DateTime<FixedOffset>) -> bool {
        match self.parse(iso) {
            Some(start) => start + chrono::Duration::hours(1) > now,
            None => false,
        }
    }
}

fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

/// The current instant in the city with the given UTC offset
pub fn city_local_now(utc_offset_seconds: i32) -> DateTime<FixedOffset> {
    CityClock::from_offset_seconds(utc_offset_seconds).now()
}

/// `instant` in the city with the given UTC offset
pub fn city_local_at(instant: DateTime<Utc>, utc_offset_seconds: i32) -> DateTime<FixedOffset> {
    CityClock::from_offset_seconds(utc_offset_seconds).at(instant)
}

/// Read a city wall-clock timestamp at the given offset
pub fn parse_city_date(iso: &str, utc_offset_seconds: i32) -> Option<DateTime<FixedOffset>> {
    CityClock::from_offset_seconds(utc_offset_seconds).parse(iso)
}

/// "HH:MM" from a `YYYY-MM-DDTHH:MM` string, "--:--" when there is no time
pub fn format_city_time(iso: &str) -> String {
    match iso.split_once('T') {
        Some((_, time)) => time.chars().take(5).collect(),
        None => "--:--".to_string(),
    }
}

/// "HH:MM" for a city-local timestamp
pub fn format_clock(time: &DateTime<FixedOffset>) -> String {
    time.format("%H:%M").to_string()
}

/// "Today" or an English weekday name for the city with the given offset
pub fn day_label(iso: &str, utc_offset_seconds: i32) -> String {
    day_label_in(iso, utc_offset_seconds, Locale::En)
}

pub fn day_label_in(iso: &str, utc_offset_seconds: i32, locale: Locale) -> String {
    CityClock::from_offset_seconds(utc_offset_seconds).day_label(iso, locale)
}
