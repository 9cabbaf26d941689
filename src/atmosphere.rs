//! Layered standard-atmosphere model.
//!
//! Implements the International Standard Atmosphere (ISA) up to the
//! stratopause for temperature, pressure, and density at altitude. Density
//! can be corrected for local weather (temperature, pressure, humidity) via
//! the Magnus saturation-vapor formula and virtual temperature.

use once_cell::sync::Lazy;

use crate::weather::WeatherSample;

/// Specific gas constant for dry air (J/(kg·K))
const R_AIR: f64 = 287.058;

/// Gravitational acceleration used in the barometric formula (m/s²)
const G_ACCEL: f64 = 9.80665;

/// One layer of the standard atmosphere.
#[derive(Debug, Clone, Copy)]
pub struct AtmosphericLayer {
    /// Base altitude of this layer (m)
    pub base_altitude: f64,
    /// Temperature at the layer base (K)
    pub base_temperature: f64,
    /// Pressure at the layer base (Pa)
    pub base_pressure: f64,
    /// Temperature lapse rate through the layer (K/m)
    pub lapse_rate: f64,
}

/// ISA layer table, troposphere through stratopause.
/// Base pressures follow the barometric formula between layer boundaries.
static ISA_LAYERS: [AtmosphericLayer; 5] = [
    // Troposphere (0 - 11 km)
    AtmosphericLayer {
        base_altitude: 0.0,
        base_temperature: 288.15,
        base_pressure: 101_325.0,
        lapse_rate: -0.0065,
    },
    // Tropopause (11 - 20 km), isothermal
    AtmosphericLayer {
        base_altitude: 11_000.0,
        base_temperature: 216.65,
        base_pressure: 22_632.1,
        lapse_rate: 0.0,
    },
    // Stratosphere 1 (20 - 32 km)
    AtmosphericLayer {
        base_altitude: 20_000.0,
        base_temperature: 216.65,
        base_pressure: 5_474.89,
        lapse_rate: 0.001,
    },
    // Stratosphere 2 (32 - 47 km)
    AtmosphericLayer {
        base_altitude: 32_000.0,
        base_temperature: 228.65,
        base_pressure: 868.019,
        lapse_rate: 0.0028,
    },
    // Stratopause (47 km+), isothermal
    AtmosphericLayer {
        base_altitude: 47_000.0,
        base_temperature: 270.65,
        base_pressure: 110.906,
        lapse_rate: 0.0,
    },
];

/// Shared immutable model instance built once at first use.
pub static STANDARD_ATMOSPHERE: Lazy<AtmosphericModel> = Lazy::new(AtmosphericModel::new);

/// Standard-atmosphere calculations over the ISA layer table.
///
/// Altitudes outside the table resolve to the nearest layer; no lookup fails.
#[derive(Debug, Clone)]
pub struct AtmosphericModel {
    layers: &'static [AtmosphericLayer],
}

impl AtmosphericModel {
    pub fn new() -> Self {
        Self {
            layers: &ISA_LAYERS,
        }
    }

    /// Layer containing `altitude`: the last layer whose base is at or below
    /// it, or the first layer when the altitude is below the whole table.
    pub fn layer_at(&self, altitude: f64) -> &AtmosphericLayer {
        self.layers
            .iter()
            .rev()
            .find(|layer| altitude >= layer.base_altitude)
            .unwrap_or(&self.layers[0])
    }

    /// Temperature at altitude (K): `T = T_base + L * (h - h_base)`.
    pub fn temperature_at(&self, altitude: f64) -> f64 {
        let layer = self.layer_at(altitude);
        layer.base_temperature + layer.lapse_rate * (altitude - layer.base_altitude)
    }

    /// Pressure at altitude (Pa).
    ///
    /// Isothermal layers use `P = P_base * exp(-g*Δh/(R*T))`; layers with a
    /// temperature gradient use `P = P_base * (T/T_base)^(-g/(R*L))`. Both
    /// forms agree at layer boundaries, keeping the profile continuous.
    pub fn pressure_at(&self, altitude: f64) -> f64 {
        let layer = self.layer_at(altitude);
        let delta_h = altitude - layer.base_altitude;
        let temperature = self.temperature_at(altitude);

        if layer.lapse_rate.abs() < 1e-10 {
            layer.base_pressure * (-G_ACCEL * delta_h / (R_AIR * temperature)).exp()
        } else {
            let exponent = -G_ACCEL / (R_AIR * layer.lapse_rate);
            layer.base_pressure * (temperature / layer.base_temperature).powf(exponent)
        }
    }

    /// Air density at altitude (kg/m³).
    ///
    /// Without weather, dry ideal gas: `ρ = P/(R*T)`. With a local sample,
    /// temperature and pressure are corrected toward the measured conditions
    /// and humidity enters through the virtual temperature
    /// `T_v = T/(1 - 0.378*e/P)`, so humid air comes out less dense than dry
    /// air at the same temperature and pressure.
    pub fn density_at(&self, altitude: f64, weather: Option<&WeatherSample>) -> f64 {
        let mut temperature = self.temperature_at(altitude);
        let mut pressure = self.pressure_at(altitude);

        if let Some(sample) = weather {
            let local_temp = sample.temperature + 273.15;
            let local_press = sample.pressure * 100.0;

            let temp_ratio = temperature / local_temp;
            let press_ratio = pressure / local_press;

            temperature *= temp_ratio;
            pressure *= press_ratio;

            let vapor_pressure = vapor_pressure(temperature, sample.humidity);
            let virtual_temp = temperature / (1.0 - 0.378 * vapor_pressure / pressure);

            return pressure / (R_AIR * virtual_temp);
        }

        pressure / (R_AIR * temperature)
    }
}

impl Default for AtmosphericModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Water vapor partial pressure (Pa) from the Magnus formula.
fn vapor_pressure(temperature_k: f64, humidity: f64) -> f64 {
    let temp_c = temperature_k - 273.15;
    let saturation = 610.78 * ((17.27 * temp_c) / (temp_c + 237.3)).exp();
    (humidity / 100.0) * saturation
}

/// Air density at altitude, optionally corrected by local weather.
pub fn air_density(weather: Option<&WeatherSample>, altitude: f64) -> f64 {
    STANDARD_ATMOSPHERE.density_at(altitude, weather)
}
