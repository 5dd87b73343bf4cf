//! Solar geometry: declination of the sun and length of the day.

use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

/// Maximum declination of the sun (axial tilt), degrees.
const AXIAL_TILT_DEG: f64 = 23.45;

/// Declination of the sun in degrees on day `day_of_year` (1 = January 1st).
///
/// Uses Cooper's approximation `23.45 · sin(360 · (284 + n) / 365)`, which repeats every
/// 365 days, so day 366 of a leap year lands back on day 1.
///
/// # Examples
///
/// ```
/// use solar_rank::astronomy::declination_angle;
///
/// // Near the June solstice the sun sits close to the Tropic of Cancer.
/// assert!((declination_angle(172) - 23.45).abs() < 0.01);
/// ```
pub fn declination_angle(day_of_year: u32) -> f64 {
    let degrees = 360.0 * (284.0 + day_of_year as f64) / 365.0;
    AXIAL_TILT_DEG * degrees.to_radians().sin()
}

/// Declination for a calendar date.
pub fn declination_for(date: NaiveDate) -> f64 {
    declination_angle(date.ordinal())
}

/// Hours between sunrise and sunset at `latitude` when the sun sits at `declination`
/// (both in degrees).
///
/// During polar day or polar night the sunset hour angle is undefined. In that case this
/// returns `0.0` rather than 24 or an error; rankings downstream rely on that value.
pub fn daylight_hours(latitude: f64, declination: f64) -> f64 {
    let cos_hour_angle = -latitude.to_radians().tan() * declination.to_radians().tan();
    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return 0.0;
    }
    let hour_angle = cos_hour_angle.acos();
    (2.0 * hour_angle * 180.0 / PI) / 15.0
}
