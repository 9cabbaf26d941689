//! Height-dependent wind modeling.
//!
//! Two layers of fidelity. The integrator itself uses [`wind_gradient`], a
//! Hellmann power-law scaling of the surface wind reading. The richer
//! [`Wind`] type models the full boundary layer — constant, logarithmic,
//! power-law, and Ekman-spiral profiles over parameterized terrain — and
//! plugs into the solver through the [`WindField`] trait without touching
//! the integration loop.

use std::f64::consts::PI;

use crate::constants::MIN_GRADIENT_HEIGHT;

/// Standard meteorological measurement height (m)
const REFERENCE_HEIGHT: f64 = 10.0;

/// Hellmann exponent for open terrain
const HELLMANN_EXPONENT: f64 = 0.143;

/// Typical eddy viscosity inside the Ekman layer (m²/s)
const EDDY_VISCOSITY: f64 = 15.0;

/// Mid-latitude Coriolis parameter (s⁻¹)
const CORIOLIS_PARAMETER: f64 = 1e-4;

/// Wind speed at `height` meters given the 10 m reference reading.
///
/// Power-law profile `v(h) = v_ref * (h/10)^0.143`. Heights below 0.1 m
/// return the base speed unchanged to avoid the singularity at the surface.
pub fn wind_gradient(base_wind_speed: f64, height: f64) -> f64 {
    if height < MIN_GRADIENT_HEIGHT {
        return base_wind_speed;
    }
    base_wind_speed * (height / REFERENCE_HEIGHT).powf(HELLMANN_EXPONENT)
}

/// Wind speed and direction as a function of height above ground.
///
/// The trajectory solver accepts any implementation, so callers can swap in
/// the boundary-layer [`Wind`] model, measured layer data, or a test stub
/// without changing the integration loop.
pub trait WindField {
    /// Wind speed at `height` meters above ground (m/s).
    fn speed_at_height(&self, height: f64) -> f64;

    /// Wind direction at `height` meters above ground (degrees).
    fn direction_at_height(&self, height: f64) -> f64;
}

/// Surface reading scaled by the Hellmann power law; direction constant.
#[derive(Debug, Clone, Copy)]
pub struct GradientWind {
    pub speed: f64,
    pub direction: f64,
}

impl WindField for GradientWind {
    fn speed_at_height(&self, height: f64) -> f64 {
        wind_gradient(self.speed, height)
    }

    fn direction_at_height(&self, _height: f64) -> f64 {
        self.direction
    }
}

/// Boundary-layer wind profile models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindProfile {
    /// Constant speed with height
    Constant,
    /// Logarithmic boundary-layer profile
    Logarithmic,
    /// Power-law profile
    PowerLaw,
    /// Ekman spiral, direction veers with height
    EkmanSpiral,
}

/// Terrain parameters controlling the shape of the wind profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainParameters {
    /// Surface roughness length z0 (m)
    pub roughness_length: f64,
    /// Alpha exponent for the power-law profile
    pub power_law_exponent: f64,
    /// Reference measurement height (m)
    pub reference_height: f64,
}

impl TerrainParameters {
    /// Open water, very smooth.
    pub fn water() -> Self {
        Self {
            roughness_length: 0.0002,
            power_law_exponent: 0.10,
            reference_height: 10.0,
        }
    }

    /// Grass with few obstacles; typical golf course.
    pub fn open_terrain() -> Self {
        Self {
            roughness_length: 0.03,
            power_law_exponent: 0.143,
            reference_height: 10.0,
        }
    }

    /// Suburban surroundings.
    pub fn suburban() -> Self {
        Self {
            roughness_length: 0.3,
            power_law_exponent: 0.22,
            reference_height: 10.0,
        }
    }

    /// Built-up urban surroundings.
    pub fn urban() -> Self {
        Self {
            roughness_length: 1.0,
            power_law_exponent: 0.33,
            reference_height: 10.0,
        }
    }
}

impl Default for TerrainParameters {
    fn default() -> Self {
        Self::open_terrain()
    }
}

/// A 3D position perturbed by wind displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Boundary-layer wind model over parameterized terrain.
#[derive(Debug, Clone)]
pub struct Wind {
    speed: f64,
    direction: f64,
    profile: WindProfile,
    terrain: TerrainParameters,
}

impl Wind {
    /// `speed` is the reading at the terrain's reference height (m/s);
    /// `direction` is degrees, 0 = North, clockwise.
    pub fn new(speed: f64, direction: f64, profile: WindProfile, terrain: TerrainParameters) -> Self {
        Self {
            speed,
            direction,
            profile,
            terrain,
        }
    }

    pub fn base_speed(&self) -> f64 {
        self.speed
    }

    pub fn base_direction(&self) -> f64 {
        self.direction
    }

    pub fn profile(&self) -> WindProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: WindProfile) {
        self.profile = profile;
    }

    pub fn terrain(&self) -> &TerrainParameters {
        &self.terrain
    }

    pub fn set_terrain(&mut self, terrain: TerrainParameters) {
        self.terrain = terrain;
    }

    fn log_profile(&self, height: f64) -> f64 {
        if height < self.terrain.roughness_length {
            return 0.0;
        }
        self.speed
            * ((height / self.terrain.roughness_length).ln()
                / (self.terrain.reference_height / self.terrain.roughness_length).ln())
    }

    fn power_law_profile(&self, height: f64) -> f64 {
        if height < self.terrain.roughness_length {
            return 0.0;
        }
        self.speed * (height / self.terrain.reference_height).powf(self.terrain.power_law_exponent)
    }

    /// Ekman spiral speed and direction at height. Speed decays toward the
    /// surface while direction veers with the normalized layer height.
    fn ekman_profile(&self, height: f64) -> (f64, f64) {
        if height < self.terrain.roughness_length {
            return (0.0, self.direction);
        }

        let height_scale = (2.0 * EDDY_VISCOSITY / CORIOLIS_PARAMETER).sqrt();
        let z = height / height_scale;

        let speed_factor = (-z).exp() * (1.0 + 2.0 * z.cos() + z * z).sqrt();
        let direction_change = z.sin().atan2(z.cos() + z) * 180.0 / PI;

        (self.speed * speed_factor, self.direction + direction_change)
    }

    /// Perturb a ball position by the local wind.
    ///
    /// The displacement scales with the wind-to-ball relative velocity
    /// ratio, a height factor saturating at 100 m, and a terrain roughness
    /// reduction. Rough terrain (z0 > 0.1) also stirs a small vertical
    /// component.
    pub fn apply_wind_effect(&self, position: Point3D, ball_velocity: f64) -> Point3D {
        let current_speed = self.speed_at_height(position.z);
        let current_direction = self.direction_at_height(position.z);
        let dir_rad = current_direction.to_radians();

        let height_factor = (position.z / 100.0).min(1.0);
        let relative_effect = (current_speed / (ball_velocity + current_speed + 1.0)) * height_factor;

        // Negative because direction is where the wind blows FROM.
        let wind_x = -current_speed * dir_rad.cos();
        let wind_y = current_speed * dir_rad.sin();

        let terrain_factor = 1.0 - (self.terrain.roughness_length + 1.0).ln() / 10.0;
        let scale_factor = 0.1 * terrain_factor;

        let mut result = position;
        result.x = position.x + wind_x * relative_effect * scale_factor;
        result.y = position.y + wind_y * relative_effect * scale_factor;

        if self.terrain.roughness_length > 0.1 {
            let vertical_factor = 0.05 * self.terrain.roughness_length;
            result.z = position.z + current_speed * vertical_factor * relative_effect;
        }

        result
    }
}

impl WindField for Wind {
    fn speed_at_height(&self, height: f64) -> f64 {
        match self.profile {
            WindProfile::Constant => self.speed,
            WindProfile::Logarithmic => self.log_profile(height),
            WindProfile::PowerLaw => self.power_law_profile(height),
            WindProfile::EkmanSpiral => self.ekman_profile(height).0,
        }
    }

    fn direction_at_height(&self, height: f64) -> f64 {
        match self.profile {
            WindProfile::EkmanSpiral => self.ekman_profile(height).1,
            _ => self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wind_gradient_reference_height() {
        assert_relative_eq!(wind_gradient(10.0, 10.0), 10.0);
    }

    #[test]
    fn test_wind_gradient_grows_with_height() {
        let ground = wind_gradient(5.0, 0.0);
        let apex = wind_gradient(5.0, 30.0);
        assert_relative_eq!(ground, 5.0);
        assert!(apex > ground);
    }

    #[test]
    fn test_wind_gradient_below_cutoff_unchanged() {
        assert_relative_eq!(wind_gradient(5.0, 0.05), 5.0);
    }

    #[test]
    fn test_constant_profile() {
        let wind = Wind::new(10.0, 90.0, WindProfile::Constant, TerrainParameters::default());
        assert_relative_eq!(wind.speed_at_height(0.0), 10.0);
        assert_relative_eq!(wind.speed_at_height(100.0), 10.0);
        assert_relative_eq!(wind.direction_at_height(100.0), 90.0);
    }

    #[test]
    fn test_logarithmic_profile_increases() {
        let wind = Wind::new(10.0, 0.0, WindProfile::Logarithmic, TerrainParameters::open_terrain());
        let v10 = wind.speed_at_height(10.0);
        let v20 = wind.speed_at_height(20.0);
        let v40 = wind.speed_at_height(40.0);
        assert_relative_eq!(v10, 10.0, epsilon = 1e-9);
        assert!(v20 > v10);
        assert!(v40 > v20);
    }

    #[test]
    fn test_power_law_profile_ratio() {
        let terrain = TerrainParameters::open_terrain();
        let wind = Wind::new(10.0, 0.0, WindProfile::PowerLaw, terrain);
        let ratio = wind.speed_at_height(20.0) / wind.speed_at_height(10.0);
        assert_relative_eq!(ratio, 2.0_f64.powf(terrain.power_law_exponent), epsilon = 1e-9);
    }

    #[test]
    fn test_below_roughness_length_is_calm() {
        let wind = Wind::new(10.0, 0.0, WindProfile::Logarithmic, TerrainParameters::urban());
        assert_relative_eq!(wind.speed_at_height(0.5), 0.0);

        let power = Wind::new(10.0, 0.0, WindProfile::PowerLaw, TerrainParameters::urban());
        assert_relative_eq!(power.speed_at_height(0.5), 0.0);
    }

    #[test]
    fn test_ekman_direction_veers_with_height() {
        let wind = Wind::new(10.0, 90.0, WindProfile::EkmanSpiral, TerrainParameters::default());
        let d100 = wind.direction_at_height(100.0);
        let d500 = wind.direction_at_height(500.0);
        assert!(d500 > d100);
        // Only the Ekman profile varies direction.
        let log = Wind::new(10.0, 90.0, WindProfile::Logarithmic, TerrainParameters::default());
        assert_relative_eq!(log.direction_at_height(500.0), 90.0);
    }

    #[test]
    fn test_wind_effect_saturates_at_altitude() {
        let wind = Wind::new(10.0, 0.0, WindProfile::Constant, TerrainParameters::open_terrain());
        let low = wind.apply_wind_effect(Point3D::new(0.0, 0.0, 10.0), 50.0);
        let high = wind.apply_wind_effect(Point3D::new(0.0, 0.0, 100.0), 50.0);
        let higher = wind.apply_wind_effect(Point3D::new(0.0, 0.0, 200.0), 50.0);
        assert!(low.x.abs() < high.x.abs());
        assert_relative_eq!(high.x.abs(), higher.x.abs(), epsilon = 1e-9);
    }

    #[test]
    fn test_wind_effect_rough_terrain_vertical_component() {
        let wind = Wind::new(10.0, 0.0, WindProfile::Constant, TerrainParameters::urban());
        let moved = wind.apply_wind_effect(Point3D::new(0.0, 0.0, 50.0), 50.0);
        assert!(moved.z > 50.0);

        let smooth = Wind::new(10.0, 0.0, WindProfile::Constant, TerrainParameters::water());
        let flat = smooth.apply_wind_effect(Point3D::new(0.0, 0.0, 50.0), 50.0);
        assert_relative_eq!(flat.z, 50.0);
    }
}
