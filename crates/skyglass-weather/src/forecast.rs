//! Presentation views over a fetched forecast.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::sun::SunArc;
use crate::types::{DailySeries, HourlySeries, WeatherData};
use crate::wind::wind_scale;

/// One hourly slot ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    pub time: String,
    pub temperature: f64,
    pub weather_code: i32,
    pub precipitation_probability: Option<f64>,
    pub wind_scale: u8,
    pub aqi: Option<i32>,
}

/// The next `limit` hourly slots, starting with the one containing `now`
pub fn upcoming_hours(
    data: &WeatherData,
    now: DateTime<FixedOffset>,
    limit: usize,
) -> Vec<HourSlot> {
    let clock = data.clock();
    let hourly = &data.hourly;

    hourly
        .time
        .iter()
        .enumerate()
        .filter(|(_, t)| clock.is_current_or_future_hour(t, now))
        .take(limit)
        .filter_map(|(i, t)| hour_slot(hourly, i, t))
        .collect()
}

fn hour_slot(hourly: &HourlySeries, i: usize, time: &str) -> Option<HourSlot> {
    Some(HourSlot {
        time: time.to_string(),
        temperature: *hourly.temperature.get(i)?,
        weather_code: *hourly.weather_code.get(i)?,
        precipitation_probability: hourly.precipitation_probability.get(i).copied().flatten(),
        wind_scale: wind_scale(hourly.wind_speed.get(i).copied().unwrap_or(0.0)),
        aqi: hourly.us_aqi.get(i).copied().flatten(),
    })
}

/// Highest hourly AQI per city-local date, earliest first, at most `days`
pub fn daily_max_aqi(hourly: &HourlySeries, days: usize) -> Vec<(NaiveDate, i32)> {
    let mut by_date: BTreeMap<NaiveDate, i32> = BTreeMap::new();

    for (time, aqi) in hourly.time.iter().zip(&hourly.us_aqi) {
        let (Some(aqi), Some(date)) = (aqi, date_of(time)) else {
            continue;
        };
        by_date
            .entry(date)
            .and_modify(|max| *max = (*max).max(*aqi))
            .or_insert(*aqi);
    }

    by_date.into_iter().take(days).collect()
}

fn date_of(iso: &str) -> Option<NaiveDate> {
    let date = iso.split('T').next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Horizontal placement of one day's low-high bar within the whole forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBar {
    pub low: f64,
    pub high: f64,
    pub left_percent: f64,
    pub width_percent: f64,
}

/// Bars for every day, scaled to the coldest low and warmest high
pub fn temperature_bars(daily: &DailySeries) -> Vec<TemperatureBar> {
    let lows = &daily.temperature_min;
    let highs = &daily.temperature_max;
    let (Some(min), Some(max)) = (
        lows.iter().copied().reduce(f64::min),
        highs.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    let range = max - min;

    lows.iter()
        .zip(highs)
        .map(|(&low, &high)| {
            let (left_percent, width_percent) = if range > 0.0 {
                ((low - min) / range * 100.0, (high - low) / range * 100.0)
            } else {
                (0.0, 0.0)
            };
            TemperatureBar {
                low,
                high,
                left_percent,
                width_percent,
            }
        })
        .collect()
}

/// Sunrise and sunset for the first forecast day
pub fn sun_arc_today(data: &WeatherData) -> Option<SunArc> {
    let clock = data.clock();
    let sunrise = clock.parse(data.daily.sunrise.first()?)?;
    let sunset = clock.parse(data.daily.sunset.first()?)?;
    Some(SunArc::new(sunrise, sunset))
}

/// Sunrise of the second forecast day, if present
pub fn next_sunrise(data: &WeatherData) -> Option<DateTime<FixedOffset>> {
    data.clock().parse(data.daily.sunrise.get(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurrentConditions, Units};
    use chrono::Utc;

    fn sample(offset: i32) -> WeatherData {
        let time: Vec<String> = (0..48)
            .map(|h| format!("2024-08-{:02}T{:02}:00", 1 + h / 24, h % 24))
            .collect();
        let n = time.len();
        WeatherData {
            current: CurrentConditions {
                temperature: 30.0,
                weather_code: 0,
                wind_speed: 10.0,
                wind_direction: 180.0,
                is_day: true,
                time: "2024-08-01T10:00".into(),
                humidity: Some(40.0),
                apparent_temperature: Some(33.0),
                pressure: Some(1008.0),
                aqi: Some(42),
                pm2_5: None,
                pm10: None,
            },
            hourly: HourlySeries {
                time,
                temperature: (0..n).map(|i| 20.0 + i as f64 * 0.1).collect(),
                weather_code: vec![1; n],
                precipitation_probability: vec![Some(10.0); n],
                wind_speed: vec![7.0; n],
                us_aqi: (0..n).map(|i| if i == 5 { None } else { Some(i as i32) }).collect(),
            },
            daily: DailySeries {
                time: vec!["2024-08-01".into(), "2024-08-02".into()],
                weather_code: vec![0, 3],
                temperature_max: vec![38.0, 35.0],
                temperature_min: vec![28.0, 30.0],
                sunrise: vec!["2024-08-01T05:50".into(), "2024-08-02T05:51".into()],
                sunset: vec!["2024-08-01T19:00".into(), "2024-08-02T18:59".into()],
                uv_index_max: vec![Some(10.0), None],
                precipitation_sum: vec![Some(0.0), Some(1.5)],
                wind_speed_max: vec![20.0, 25.0],
                moon_phase: vec![0.9, 0.93],
            },
            units: Units {
                temperature: "°C".into(),
                wind_speed: "km/h".into(),
            },
            utc_offset_seconds: offset,
            timezone: "Asia/Dubai".into(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_upcoming_hours_starts_at_current_hour() {
        let data = sample(4 * 3600);
        let now = data.clock().parse("2024-08-01T10:20").unwrap();
        let hours = upcoming_hours(&data, now, 24);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].time, "2024-08-01T10:00");
        assert_eq!(hours[23].time, "2024-08-02T09:00");
        assert_eq!(hours[0].wind_scale, 2);
    }

    #[test]
    fn test_upcoming_hours_truncated_at_end_of_series() {
        let data = sample(0);
        let now = data.clock().parse("2024-08-02T20:00").unwrap();
        let hours = upcoming_hours(&data, now, 24);
        assert_eq!(hours.len(), 4);
    }

    #[test]
    fn test_daily_max_aqi() {
        let data = sample(0);
        let maxima = daily_max_aqi(&data.hourly, 5);
        assert_eq!(
            maxima,
            vec![
                (NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), 23),
                (NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(), 47),
            ]
        );
        assert_eq!(daily_max_aqi(&data.hourly, 1).len(), 1);
    }

    #[test]
    fn test_daily_max_aqi_without_air_quality() {
        let mut data = sample(0);
        data.hourly.us_aqi.clear();
        assert!(daily_max_aqi(&data.hourly, 5).is_empty());
    }

    #[test]
    fn test_temperature_bars() {
        let data = sample(0);
        let bars = temperature_bars(&data.daily);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].left_percent, 0.0);
        assert_eq!(bars[0].width_percent, 100.0);
        assert_eq!(bars[1].left_percent, 20.0);
        assert_eq!(bars[1].width_percent, 50.0);
    }

    #[test]
    fn test_temperature_bars_flat_range() {
        let mut data = sample(0);
        data.daily.temperature_min = vec![10.0];
        data.daily.temperature_max = vec![10.0];
        let bars = temperature_bars(&data.daily);
        assert_eq!(bars[0].width_percent, 0.0);
        data.daily.temperature_min.clear();
        assert!(temperature_bars(&data.daily).is_empty());
    }

    #[test]
    fn test_sun_arc_today() {
        let data = sample(4 * 3600);
        let arc = sun_arc_today(&data).unwrap();
        assert_eq!(arc.sunrise.offset().local_minus_utc(), 4 * 3600);
        assert!(next_sunrise(&data).unwrap() > arc.sunset);
    }
}
