
/// Current temperature and mean cloud cover at a (rounded) coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    pub temperature_celsius: f64,
    /// Mean of the hourly cloud-cover readings, in percent.
    pub cloud_cover_percent: f64,
}

impl WeatherSample {
    /// Returned whenever the weather service cannot be reached or understood.
    pub const FALLBACK: WeatherSample = WeatherSample {
        temperature_celsius: 25.0,
        cloud_cover_percent: 0.0,
    };

    /// Builds a sample from the current temperature and a window of hourly cloud-cover
    /// readings. An empty window counts as a clear sky.
    pub fn from_readings(temperature_celsius: f64, hourly_cloud_cover: &[f64]) -> Self {
        let cloud_cover_percent = if hourly_cloud_cover.is_empty() {
            0.0
        } else {
            hourly_cloud_cover.iter().sum::<f64>() / hourly_cloud_cover.len() as f64
        };
        Self {
            temperature_celsius,
            cloud_cover_percent,
        }
    }
}
