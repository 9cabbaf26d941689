//! Weather inputs consumed by the flight engine.
//!
//! Weather acquisition, caching, and storage live in collaborating crates;
//! the engine only defines the sample value type it reads. A sample is never
//! mutated by any calculation.

use serde::{Deserialize, Serialize};

/// A single weather measurement, SI units except where noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Relative humidity (0-100 %)
    pub humidity: f64,
    /// Barometric pressure (hPa)
    pub pressure: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Wind direction (degrees, 0 = North, clockwise)
    pub wind_direction: f64,
    /// Altitude above sea level (m)
    pub altitude: f64,
}

impl Default for WeatherSample {
    fn default() -> Self {
        Self {
            temperature: 15.0,
            humidity: 50.0,
            pressure: 1013.25,
            wind_speed: 0.0,
            wind_direction: 0.0,
            altitude: 0.0,
        }
    }
}

impl WeatherSample {
    /// Check that every field is inside the range a course-side station can
    /// plausibly report. Callers feeding the engine from external sources
    /// should reject samples that fail this before simulating.
    pub fn is_valid(&self) -> bool {
        self.temperature >= -50.0
            && self.temperature <= 50.0
            && self.humidity >= 0.0
            && self.humidity <= 100.0
            && self.pressure >= 850.0
            && self.pressure <= 1100.0
            && self.wind_speed >= 0.0
            && self.wind_speed <= 40.0
            && self.wind_direction >= 0.0
            && self.wind_direction < 360.0
            && self.altitude >= -500.0
            && self.altitude <= 5000.0
    }
}
