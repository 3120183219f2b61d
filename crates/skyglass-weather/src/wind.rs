//! Beaufort-like wind scale from km/h.

/// Lower bound (km/h) of scale levels 1 through 12
const WIND_BREAKPOINTS_KMH: [f64; 12] = [
    1.0, 6.0, 12.0, 20.0, 29.0, 39.0, 50.0, 62.0, 75.0, 89.0, 103.0, 117.0,
];

pub const MAX_WIND_SCALE: u8 = 12;

/// Map a wind speed to a 0-12 scale level.
///
/// Negative and NaN speeds fall below every breakpoint and map to 0.
pub fn wind_scale(speed_kmh: f64) -> u8 {
    WIND_BREAKPOINTS_KMH
        .iter()
        .take_while(|&&lower| speed_kmh >= lower)
        .count() as u8
}

/// Compass point for a wind direction in degrees
pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    if !degrees.is_finite() {
        return "N";
    }
    let normalized = degrees.rem_euclid(360.0);
    let idx = ((normalized + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[idx]
}
