//! The record produced for one location on one day.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Estimated solar yield for one location.
///
/// Field order and serialized names match the columns of the query log and the ranked
/// snapshot files: `region,date,time,temp,cloud,intensity,daylight,energy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    #[serde(rename = "region")]
    pub region_name: String,
    pub date: NaiveDate,
    /// Wall-clock time the result was computed, whole seconds.
    pub time: NaiveTime,
    #[serde(rename = "temp")]
    pub temperature_celsius: f64,
    /// Mean cloud cover in percent, rounded to two decimals.
    #[serde(rename = "cloud")]
    pub cloud_cover_percent: f64,
    /// Effective irradiance in W/m², rounded to two decimals.
    #[serde(rename = "intensity")]
    pub solar_intensity: f64,
    #[serde(rename = "daylight")]
    pub daylight_hours: f64,
    /// Estimated energy over the daylight period in megajoules.
    #[serde(rename = "energy")]
    pub energy_mj: f64,
}

/// Column names in serialization order.
pub const RESULT_COLUMNS: [&str; 8] = [
    "region",
    "date",
    "time",
    "temp",
    "cloud",
    "intensity",
    "daylight",
    "energy",
];
