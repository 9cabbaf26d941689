//! Stateless aerodynamic functions for a spinning golf ball.
//!
//! Everything here is a pure function of instantaneous velocity, spin, and
//! altitude. The drag model implements the drag-crisis transition between
//! laminar and turbulent flow; lift and Magnus force follow the spin-factor
//! formulation with exponential spin decay.

use std::f64::consts::PI;

use crate::atmosphere::air_density;
use crate::constants::{
    AIR_VISCOSITY, BALL_AREA, BALL_RADIUS, BASE_DRAG_COEFFICIENT, CRITICAL_REYNOLDS,
    MAX_LIFT_COEFFICIENT, SPIN_DECAY_RATE, SPIN_LIFT_SLOPE, STANDARD_AIR_DENSITY,
    SURFACE_ROUGHNESS, TURBULENT_REYNOLDS,
};
use crate::trajectory::SpinAxis;
use crate::weather::WeatherSample;

/// Reynolds number for the ball at `velocity` (m/s) and `altitude` (m).
///
/// `Re = ρ·v·D/μ` with the ball diameter as characteristic length and the
/// standard-atmosphere density at altitude.
pub fn reynolds_number(velocity: f64, altitude: f64) -> f64 {
    let density = air_density(None, altitude);
    density * velocity * (2.0 * BALL_RADIUS) / AIR_VISCOSITY
}

/// Drag coefficient as a function of Reynolds number.
///
/// Below the critical Reynolds number the flow is laminar and Cd is the
/// base value; past the turbulent threshold the drag crisis has halved it.
/// The transition is linearly interpolated so Cd is continuous and
/// non-increasing across both boundaries.
pub fn drag_coefficient(reynolds: f64) -> f64 {
    if reynolds < CRITICAL_REYNOLDS {
        BASE_DRAG_COEFFICIENT
    } else if reynolds > TURBULENT_REYNOLDS {
        BASE_DRAG_COEFFICIENT * 0.5
    } else {
        let t = (reynolds - CRITICAL_REYNOLDS) / (TURBULENT_REYNOLDS - CRITICAL_REYNOLDS);
        BASE_DRAG_COEFFICIENT * (1.0 - 0.5 * t)
    }
}

/// Spin rate (rpm) remaining after `time` seconds of flight.
pub fn spin_decay(initial_spin: f64, time: f64) -> f64 {
    initial_spin * (-SPIN_DECAY_RATE * time).exp()
}

/// Lift coefficient from spin rate (rpm) and relative air speed (m/s).
///
/// The nondimensional spin factor `ω·r/v` is scaled by a dimple-roughness
/// term and saturates at the maximum lift coefficient.
pub fn lift_coefficient(spin_rate: f64, velocity: f64) -> f64 {
    let spin_factor = (spin_rate * PI / 30.0) * BALL_RADIUS / velocity;
    let roughness_effect = 1.0 + SURFACE_ROUGHNESS / BALL_RADIUS;
    (SPIN_LIFT_SLOPE * spin_factor * roughness_effect).min(MAX_LIFT_COEFFICIENT)
}

/// Magnus force magnitude (N) for the current flight state.
///
/// Spin is decayed to `time`, decomposed into vertical and horizontal
/// components along the spin axis tilt, and the resulting lift force is
/// recombined along the axis direction. The integrator decomposes the
/// returned scalar perpendicular to the relative velocity.
pub fn magnus_force(
    spin_rate: f64,
    velocity: f64,
    _radius: f64,
    spin_axis: &SpinAxis,
    time: f64,
) -> f64 {
    let current_spin = spin_decay(spin_rate, time);
    if current_spin <= 0.0 {
        return 0.0;
    }

    let tilt_rad = spin_axis.tilt.to_radians();
    let direction_rad = spin_axis.direction.to_radians();

    let vertical_spin = current_spin * tilt_rad.cos();
    let horizontal_spin = current_spin * tilt_rad.sin();

    let lift_coef = lift_coefficient(current_spin, velocity);
    let force_magnitude = 0.5 * STANDARD_AIR_DENSITY * BALL_AREA * lift_coef * velocity * velocity;

    let vertical_force = force_magnitude * (vertical_spin / current_spin);
    let horizontal_force = force_magnitude * (horizontal_spin / current_spin);

    vertical_force * direction_rad.cos() + horizontal_force * direction_rad.sin()
}

/// Wind speed rescaled for local air density.
///
/// Denser air carries more momentum at the same anemometer reading, so the
/// effective speed scales with the square root of the density ratio against
/// the standard atmosphere.
pub fn wind_adjusted_speed(speed: f64, weather: Option<&WeatherSample>, altitude: f64) -> f64 {
    let Some(sample) = weather else {
        return speed;
    };

    let actual = air_density(Some(sample), altitude);
    let standard = air_density(None, altitude);
    speed * (actual / standard).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reynolds_number_driver_speed() {
        // 70 m/s at sea level: Re = 1.225 * 70 * 0.0426 / 1.81e-5 ≈ 2.0e5
        let re = reynolds_number(70.0, 0.0);
        assert!(re > 1.5e5 && re < 2.5e5);
    }

    #[test]
    fn test_reynolds_number_drops_with_altitude() {
        assert!(reynolds_number(70.0, 2000.0) < reynolds_number(70.0, 0.0));
    }

    #[test]
    fn test_drag_coefficient_regimes() {
        assert_relative_eq!(drag_coefficient(1.0e4), BASE_DRAG_COEFFICIENT);
        assert_relative_eq!(drag_coefficient(1.0e6), BASE_DRAG_COEFFICIENT * 0.5);

        // Midpoint of the transition sits at 75% of base.
        let mid = (CRITICAL_REYNOLDS + TURBULENT_REYNOLDS) / 2.0;
        assert_relative_eq!(drag_coefficient(mid), BASE_DRAG_COEFFICIENT * 0.75);
    }

    #[test]
    fn test_drag_coefficient_continuous_at_boundaries() {
        let eps = 1.0;
        assert_relative_eq!(
            drag_coefficient(CRITICAL_REYNOLDS - eps),
            drag_coefficient(CRITICAL_REYNOLDS + eps),
            epsilon = 1e-4
        );
        assert_relative_eq!(
            drag_coefficient(TURBULENT_REYNOLDS - eps),
            drag_coefficient(TURBULENT_REYNOLDS + eps),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_drag_coefficient_non_increasing() {
        let mut previous = drag_coefficient(1.0e3);
        let mut re = 1.0e3;
        while re < 1.0e6 {
            let cd = drag_coefficient(re);
            assert!(cd <= previous + 1e-12);
            previous = cd;
            re *= 1.2;
        }
    }

    #[test]
    fn test_spin_decay_properties() {
        assert_relative_eq!(spin_decay(2700.0, 0.0), 2700.0);
        assert!(spin_decay(2700.0, 1.0) < 2700.0);
        assert!(spin_decay(2700.0, 2.0) < spin_decay(2700.0, 1.0));
        assert!(spin_decay(2700.0, 60.0) > 0.0);
        // Typical driver flight keeps most of its spin.
        assert!(spin_decay(2700.0, 1.0) > 2700.0 * 0.9);
    }

    #[test]
    fn test_lift_coefficient_saturates() {
        // Extreme wedge spin at low speed pins Cl to the ceiling.
        assert_relative_eq!(lift_coefficient(10_000.0, 10.0), MAX_LIFT_COEFFICIENT);
        let cl = lift_coefficient(2700.0, 70.0);
        assert!(cl > 0.0 && cl < MAX_LIFT_COEFFICIENT);
    }

    #[test]
    fn test_magnus_force_tilt_reduces_vertical_lift() {
        let backspin = SpinAxis::new(0.0, 0.0);
        let tilted = SpinAxis::new(20.0, 0.0);
        let pure = magnus_force(2700.0, 70.0, BALL_RADIUS, &backspin, 0.0);
        let canted = magnus_force(2700.0, 70.0, BALL_RADIUS, &tilted, 0.0);
        assert!(canted < pure);
        assert!(pure > 0.0);
    }

    #[test]
    fn test_magnus_force_decays_with_time() {
        let axis = SpinAxis::default();
        let early = magnus_force(2700.0, 70.0, BALL_RADIUS, &axis, 0.0);
        let late = magnus_force(2700.0, 70.0, BALL_RADIUS, &axis, 4.0);
        assert!(late < early);
    }

    #[test]
    fn test_wind_adjusted_speed_passthrough_without_weather() {
        assert_relative_eq!(wind_adjusted_speed(10.0, None, 0.0), 10.0);
    }

    #[test]
    fn test_wind_adjusted_speed_humid_air() {
        // Humid air is thinner, so the effective wind speed drops.
        let sample = WeatherSample {
            humidity: 95.0,
            ..Default::default()
        };
        assert!(wind_adjusted_speed(10.0, Some(&sample), 0.0) < 10.0);
    }
}
