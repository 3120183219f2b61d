//! Plain-text rendering of a loaded forecast.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use skyglass_core::CityWeather;
use skyglass_weather::forecast::{
    daily_max_aqi, next_sunrise, sun_arc_today, temperature_bars, upcoming_hours,
};
use skyglass_weather::{
    backdrop_for, classify_aqi, describe_moon_phase_in, describe_weather_in, format_city_time,
    format_clock, icon_name, illumination_percent, moon_phase, wind_direction_to_cardinal,
    wind_scale, Locale, SunEventKind,
};

const HOURS_SHOWN: usize = 24;
const AQI_DAYS_SHOWN: usize = 5;
const BAR_WIDTH: usize = 20;

/// Render the dashboard for `view` as seen at `now` in the city's clock
pub fn render(view: &CityWeather, locale: Locale, now: DateTime<FixedOffset>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_dashboard(&mut out, view, locale, now);
    out
}

fn write_dashboard(
    out: &mut String,
    view: &CityWeather,
    locale: Locale,
    now: DateTime<FixedOffset>,
) -> std::fmt::Result {
    let data = &view.weather;
    let current = &data.current;
    let units = &data.units;
    let clock = data.clock();

    writeln!(out, "{}  {} ({})", view.city.name, format_clock(&now), data.timezone)?;
    if view.stale {
        writeln!(
            out,
            "  (offline, showing forecast fetched {})",
            data.fetched_at.format("%Y-%m-%d %H:%M UTC")
        )?;
    }

    writeln!(
        out,
        "  {:.0}{}  {} [{}]  feels like {:.0}{}",
        current.temperature,
        units.temperature,
        describe_weather_in(current.weather_code, locale),
        icon_name(current.weather_code, current.is_day),
        current.feels_like(),
        units.temperature
    )?;

    writeln!(
        out,
        "  Wind {:.0} {} {} (scale {})",
        current.wind_speed,
        units.wind_speed,
        wind_direction_to_cardinal(current.wind_direction),
        wind_scale(current.wind_speed)
    )?;
    if let Some(humidity) = current.humidity {
        writeln!(out, "  Humidity {:.0}%", humidity)?;
    }
    if let Some(pressure) = current.pressure {
        writeln!(out, "  Pressure {:.0} hPa", pressure)?;
    }

    match current.aqi {
        Some(aqi) => {
            let reading = classify_aqi(aqi);
            writeln!(
                out,
                "  AQI {} {} ({}, level {}/6)",
                aqi,
                reading.label_in(locale),
                reading.color_tag(),
                reading.band.rank()
            )?;
        }
        None => writeln!(out, "  AQI unavailable")?,
    }

    let phase = moon_phase(now.with_timezone(&Utc));
    writeln!(
        out,
        "  Moon {} ({}% lit)",
        describe_moon_phase_in(phase, locale),
        illumination_percent(phase)
    )?;

    if let Some(arc) = sun_arc_today(data) {
        let event = arc.next_event(now, next_sunrise(data));
        let kind = match event.kind {
            SunEventKind::Sunrise => "Sunrise",
            SunEventKind::Sunset => "Sunset",
        };
        writeln!(
            out,
            "  Daylight {:.0}% done, {} at {}",
            arc.progress(now) * 100.0,
            kind,
            format_clock(&event.at)
        )?;
    }

    let backdrop = backdrop_for(current.weather_type(), current.is_day);
    writeln!(out, "  Theme {} {} {}", backdrop.top, backdrop.middle, backdrop.bottom)?;

    writeln!(out)?;
    writeln!(out, "Hourly")?;
    for (i, slot) in upcoming_hours(data, now, HOURS_SHOWN).iter().enumerate() {
        let label = if i == 0 {
            locale.now().to_string()
        } else {
            format_city_time(&slot.time)
        };
        let rain = slot
            .precipitation_probability
            .map(|p| format!("{:.0}%", p))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  {:<6} {:>5.0}{} {:<24} rain {:>4}  wind {}",
            label,
            slot.temperature,
            units.temperature,
            describe_weather_in(slot.weather_code, locale),
            rain,
            slot.wind_scale
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Daily")?;
    let bars = temperature_bars(&data.daily);
    for ((date, code), bar) in data.daily.time.iter().zip(&data.daily.weather_code).zip(&bars) {
        writeln!(
            out,
            "  {:<6} {:<24} {:>5.0} {} {:.0}",
            clock.day_label_at(date, now, locale),
            describe_weather_in(*code, locale),
            bar.low,
            bar_graphic(bar.left_percent, bar.width_percent),
            bar.high
        )?;
    }

    let aqi_days = daily_max_aqi(&data.hourly, AQI_DAYS_SHOWN);
    if !aqi_days.is_empty() {
        writeln!(out)?;
        writeln!(out, "Air quality")?;
        for (date, aqi) in aqi_days {
            let iso = date.format("%Y-%m-%d").to_string();
            writeln!(
                out,
                "  {:<6} {:>3} {}",
                clock.day_label_at(&iso, now, locale),
                aqi,
                classify_aqi(aqi).label_in(locale)
            )?;
        }
    }

    Ok(())
}

/// Fixed-width bar with the day's range filled in
fn bar_graphic(left_percent: f64, width_percent: f64) -> String {
    let cells = BAR_WIDTH as f64;
    let start = ((left_percent / 100.0 * cells).round() as usize).min(BAR_WIDTH);
    let len = ((width_percent / 100.0 * cells).round() as usize).clamp(1, BAR_WIDTH);
    let start = start.min(BAR_WIDTH - len);

    let mut bar = String::with_capacity(BAR_WIDTH);
    bar.push_str(&"·".repeat(start));
    bar.push_str(&"█".repeat(len));
    bar.push_str(&"·".repeat(BAR_WIDTH - start - len));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skyglass_weather::{
        CityClock, CurrentConditions, DailySeries, HourlySeries, SavedCity, Units, WeatherData,
    };

    fn view() -> CityWeather {
        CityWeather {
            city: SavedCity {
                name: "Lisbon".into(),
                latitude: 38.72,
                longitude: -9.14,
            },
            weather: WeatherData {
                current: CurrentConditions {
                    temperature: 14.2,
                    weather_code: 61,
                    wind_speed: 22.0,
                    wind_direction: 315.0,
                    is_day: false,
                    time: "2024-03-09T21:15".into(),
                    humidity: Some(81.0),
                    apparent_temperature: Some(12.9),
                    pressure: Some(1009.0),
                    aqi: Some(61),
                    pm2_5: None,
                    pm10: None,
                },
                hourly: HourlySeries {
                    time: (20..24).map(|h| format!("2024-03-09T{}:00", h)).collect(),
                    temperature: vec![14.5, 14.0, 13.6, 13.1],
                    weather_code: vec![61, 61, 3, 3],
                    precipitation_probability: vec![Some(70.0), Some(60.0), None, Some(10.0)],
                    wind_speed: vec![22.0, 20.0, 18.0, 5.0],
                    us_aqi: vec![Some(58), Some(61), Some(55), None],
                },
                daily: DailySeries {
                    time: vec!["2024-03-09".into(), "2024-03-10".into()],
                    weather_code: vec![61, 1],
                    temperature_max: vec![16.0, 19.0],
                    temperature_min: vec![11.0, 10.0],
                    sunrise: vec!["2024-03-09T06:58".into(), "2024-03-10T06:57".into()],
                    sunset: vec!["2024-03-09T18:38".into(), "2024-03-10T18:39".into()],
                    uv_index_max: vec![Some(3.0), Some(5.0)],
                    precipitation_sum: vec![Some(6.0), Some(0.0)],
                    wind_speed_max: vec![30.0, 15.0],
                    moon_phase: vec![0.98, 0.01],
                },
                units: Units {
                    temperature: "°C".into(),
                    wind_speed: "km/h".into(),
                },
                utc_offset_seconds: 0,
                timezone: "Europe/Lisbon".into(),
                fetched_at: Utc.with_ymd_and_hms(2024, 3, 9, 21, 0, 0).unwrap(),
            },
            stale: false,
        }
    }

    fn now() -> DateTime<FixedOffset> {
        CityClock::from_offset_seconds(0).at(Utc.with_ymd_and_hms(2024, 3, 9, 21, 20, 0).unwrap())
    }

    #[test]
    fn test_render_headline() {
        let text = render(&view(), Locale::En, now());
        assert!(text.starts_with("Lisbon  21:20 (Europe/Lisbon)"));
        assert!(text.contains("Slight rain"));
        assert!(text.contains("NW"));
        assert!(text.contains("AQI 61 Moderate"));
        assert!(text.contains("Sunrise at 06:57"));
        assert!(!text.contains("offline"));
    }

    #[test]
    fn test_render_hourly_starts_with_now() {
        let text = render(&view(), Locale::En, now());
        let hourly: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "Hourly")
            .skip(1)
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(hourly.len(), 3);
        assert!(hourly[0].trim_start().starts_with("Now"));
        assert!(hourly[1].trim_start().starts_with("22:00"));
    }

    #[test]
    fn test_render_daily_labels_in_chinese() {
        let text = render(&view(), Locale::Zh, now());
        assert!(text.contains("今天"));
        assert!(text.contains("周日"));
        assert!(text.contains("现在"));
    }

    #[test]
    fn test_render_stale_notice() {
        let mut stale = view();
        stale.stale = true;
        let text = render(&stale, Locale::En, now());
        assert!(text.contains("offline, showing forecast fetched 2024-03-09 21:00 UTC"));
    }

    #[test]
    fn test_bar_graphic_bounds() {
        assert_eq!(bar_graphic(0.0, 100.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar_graphic(100.0, 0.0).chars().count(), BAR_WIDTH);
        assert!(bar_graphic(100.0, 0.0).ends_with('█'));
        assert!(bar_graphic(0.0, 0.0).starts_with('█'));
    }
}
