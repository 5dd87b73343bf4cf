//! Cloud-attenuated irradiance and the energy it yields over a day.

use crate::utils::round_to;

/// Solar constant at the top of the atmosphere, W/m².
pub const SOLAR_CONSTANT: f64 = 1367.0;

/// Converts weather into irradiance and energy for a fixed solar constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModel {
    solar_constant: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self::new(SOLAR_CONSTANT)
    }
}

impl EnergyModel {
    pub fn new(solar_constant: f64) -> Self {
        Self { solar_constant }
    }

    pub fn solar_constant(&self) -> f64 {
        self.solar_constant
    }

    /// Irradiance in W/m² left after `cloud_cover_percent` of the sky is covered,
    /// rounded to two decimals.
    pub fn solar_intensity(&self, cloud_cover_percent: f64) -> f64 {
        round_to(self.solar_constant * (1.0 - cloud_cover_percent / 100.0), 2)
    }

    /// See [`calculate_energy`].
    pub fn energy(&self, intensity: f64, daylight_hours: f64) -> f64 {
        calculate_energy(intensity, daylight_hours)
    }
}

/// Energy in MJ collected at `intensity` W/m² over `daylight_hours`, rounded to two decimals.
///
/// The whole daylight period is counted at full intensity; the irradiance curve over the
/// day is not integrated.
pub fn calculate_energy(intensity: f64, daylight_hours: f64) -> f64 {
    round_to((intensity * daylight_hours * 3600.0) / 1_000_000.0, 2)
}
