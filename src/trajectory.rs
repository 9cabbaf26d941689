//! Adaptive-timestep trajectory integration.
//!
//! The integrator advances a two-dimensional state (downrange distance,
//! height) under drag, Magnus lift, and gravity, with the timestep blended
//! from velocity, acceleration, spin, height, and flight-phase factors so
//! launch and impact get fine steps while mid-flight runs coarse. Every
//! intermediate quantity is bounds-checked; any violation unwinds with a
//! typed error and no partial result.

use log::{debug, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::aerodynamics::{drag_coefficient, magnus_force, reynolds_number};
use crate::atmosphere::air_density;
use crate::constants::{BALL_AREA, BALL_MASS, BALL_RADIUS, GRAVITY, MIN_VELOCITY_THRESHOLD};
use crate::validation::{
    validate_launch_parameters, validate_physical_quantity, validate_trajectory_point,
    TrajectoryError,
};
use crate::weather::WeatherSample;
use crate::wind::{wind_gradient, WindField};

// Adaptive timestep tuning. The clamp window keeps launch and impact stable
// while the factor product opens the step up to the ceiling mid-flight.
const MIN_TIMESTEP: f64 = 0.00005;
const MAX_TIMESTEP: f64 = 0.003;
const BASE_TIMESTEP: f64 = 0.0035;
const VELOCITY_SCALE: f64 = 0.01;
const ACCEL_SCALE: f64 = 0.004;
const SPIN_SCALE: f64 = 8.0e-5;
const HEIGHT_SCALE: f64 = 0.4;
const SMOOTH_FACTOR: f64 = 0.8;
const LAUNCH_RAMP_POINTS: f64 = 12.0;
const MAX_ITERATIONS: usize = 10_000;

/// Decimation threshold: a point is stored once the ball has moved this far
/// in x or y since the last stored point (m).
const RECORD_SPACING: f64 = 0.1;

/// Orientation of the ball's spin axis.
///
/// Zero tilt is pure backspin; tilting the axis trades vertical lift for
/// side force. Direction is measured from the target line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinAxis {
    /// Tilt from vertical (degrees)
    pub tilt: f64,
    /// Direction from the target line (degrees)
    pub direction: f64,
}

impl SpinAxis {
    pub fn new(tilt: f64, direction: f64) -> Self {
        Self { tilt, direction }
    }
}

impl Default for SpinAxis {
    fn default() -> Self {
        Self {
            tilt: 0.0,
            direction: 0.0,
        }
    }
}

/// One point of the discretized flight path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Downrange distance from the tee (m)
    pub x: f64,
    /// Height above ground (m)
    pub y: f64,
}

impl TrajectoryPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Complete result of a trajectory calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryResult {
    /// Chronological, decimated flight path ending at ground level
    pub points: Vec<TrajectoryPoint>,
    /// Carry distance: downrange position where the ball returns to y = 0 (m)
    pub distance: f64,
    /// Maximum height reached during flight (m)
    pub apex: f64,
}

/// Launch parameters for a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    /// Ball speed at launch (m/s)
    pub speed: f64,
    /// Vertical launch angle (degrees)
    pub angle: f64,
    /// Initial spin rate (rpm)
    pub spin_rate: f64,
    /// Spin axis orientation
    pub spin_axis: SpinAxis,
}

impl LaunchConditions {
    pub fn new(speed: f64, angle: f64, spin_rate: f64) -> Self {
        Self {
            speed,
            angle,
            spin_rate,
            spin_axis: SpinAxis::default(),
        }
    }
}

/// Surface wind reading for a shot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindConditions {
    /// Wind speed at the 10 m reference height (m/s)
    pub speed: f64,
    /// Wind angle relative to the target line (degrees, 0 = tailwind,
    /// 180 = headwind)
    pub angle: f64,
}

/// Trajectory solver for a single shot.
///
/// Holds launch and wind conditions plus optional refinements: a local
/// weather sample for air-density correction, and a [`WindField`] strategy
/// that replaces the default power-law wind gradient without touching the
/// integration loop. Each `solve` call runs a fresh simulation; the solver
/// keeps no state between calls.
pub struct TrajectorySolver {
    launch: LaunchConditions,
    wind: WindConditions,
    weather: Option<WeatherSample>,
    wind_field: Option<Box<dyn WindField + Send + Sync>>,
}

impl TrajectorySolver {
    pub fn new(launch: LaunchConditions, wind: WindConditions) -> Self {
        Self {
            launch,
            wind,
            weather: None,
            wind_field: None,
        }
    }

    /// Correct air density for a local weather sample.
    pub fn with_weather(mut self, weather: WeatherSample) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Replace the default power-law wind gradient with a custom profile.
    pub fn with_wind_field(mut self, field: Box<dyn WindField + Send + Sync>) -> Self {
        self.wind_field = Some(field);
        self
    }

    /// Wind speed and direction at the ball's current height.
    fn wind_at_height(&self, height: f64) -> (f64, f64) {
        match &self.wind_field {
            Some(field) => (
                field.speed_at_height(height),
                field.direction_at_height(height),
            ),
            None => (wind_gradient(self.wind.speed, height), self.wind.angle),
        }
    }

    /// Run the simulation to ground impact.
    pub fn solve(&self) -> Result<TrajectoryResult, TrajectoryError> {
        validate_launch_parameters(
            self.launch.speed,
            self.launch.angle,
            self.launch.spin_rate,
            self.wind.speed,
            self.wind.angle,
        )?;

        debug!(
            "solving trajectory: speed {:.2} m/s, angle {:.1}°, spin {:.0} rpm, wind {:.1} m/s @ {:.0}°",
            self.launch.speed, self.launch.angle, self.launch.spin_rate,
            self.wind.speed, self.wind.angle,
        );

        let angle_rad = self.launch.angle.to_radians();
        let mut velocity = Vector2::new(
            self.launch.speed * angle_rad.cos(),
            self.launch.speed * angle_rad.sin(),
        );

        let mut x = 0.0_f64;
        let mut y = 0.0_f64;
        let mut prev_x = 0.0_f64;
        let mut prev_y = 0.0_f64;

        let mut result = TrajectoryResult {
            points: Vec::with_capacity(1000),
            distance: 0.0,
            apex: 0.0,
        };
        result.points.push(TrajectoryPoint::new(x, y));

        let mut prev_time_step = MIN_TIMESTEP;
        let mut prev_velocity = velocity;
        let mut iterations = 0_usize;

        while y >= 0.0 && iterations < MAX_ITERATIONS {
            iterations += 1;
            prev_x = x;
            prev_y = y;

            // Relative velocity against the height-adjusted wind.
            let (wind_speed, wind_angle) = self.wind_at_height(y);
            let wind_rad = wind_angle.to_radians();
            let relative = velocity - Vector2::new(
                wind_speed * wind_rad.cos(),
                wind_speed * wind_rad.sin(),
            );
            let rel_speed = relative.norm();
            validate_physical_quantity(rel_speed, 0.0, 200.0, "relative velocity")?;

            // Acceleration over the previous step, for timestep adaptation.
            let accel_magnitude = ((velocity - prev_velocity) / prev_time_step).norm();

            // Phase detection: ramp in over the first recorded points, ramp
            // down on the final descent toward the ground.
            let launch_progress = (result.points.len() as f64 / LAUNCH_RAMP_POINTS).min(1.0);
            let landing_factor = if velocity.y < 0.0 {
                (y / 5.0).powf(0.8).clamp(0.0, 1.0)
            } else {
                1.0
            };

            let velocity_factor = (-VELOCITY_SCALE * rel_speed.powf(0.85)).exp();
            let accel_factor = (-ACCEL_SCALE * accel_magnitude.powf(0.8)).exp();
            let spin_factor = (-SPIN_SCALE * self.launch.spin_rate.powf(0.9)).exp();
            let height_factor = (1.0 - (-HEIGHT_SCALE * y.max(0.0)).exp()).powf(0.85).min(1.0);
            let phase_factor = 0.4 + 0.6 * launch_progress * landing_factor;

            let raw_time_step = BASE_TIMESTEP
                * velocity_factor
                * accel_factor
                * spin_factor
                * height_factor
                * phase_factor;

            let time_step = (SMOOTH_FACTOR * prev_time_step
                + (1.0 - SMOOTH_FACTOR) * raw_time_step)
                .clamp(MIN_TIMESTEP, MAX_TIMESTEP);

            prev_time_step = time_step;
            prev_velocity = velocity;

            if rel_speed > MIN_VELOCITY_THRESHOLD {
                let reynolds = reynolds_number(rel_speed, y);
                let drag_coef = drag_coefficient(reynolds);
                let density = air_density(self.weather.as_ref(), y);

                validate_physical_quantity(reynolds, 0.0, 1.0e6, "Reynolds number")?;
                validate_physical_quantity(drag_coef, 0.0, 1.0, "drag coefficient")?;
                validate_physical_quantity(density, 0.5, 1.5, "air density")?;

                let drag_force = 0.5 * density * drag_coef * BALL_AREA * rel_speed * rel_speed;

                // Elapsed flight time approximated from downrange progress.
                let elapsed = if self.launch.speed > f64::EPSILON {
                    x / self.launch.speed
                } else {
                    0.0
                };
                let magnus = magnus_force(
                    self.launch.spin_rate,
                    rel_speed,
                    BALL_RADIUS,
                    &self.launch.spin_axis,
                    elapsed,
                );

                validate_physical_quantity(drag_force, 0.0, 100.0, "drag force")?;
                validate_physical_quantity(magnus, -50.0, 50.0, "Magnus force")?;

                let inv_rel = 1.0 / rel_speed;
                let drag_ax = -drag_force * relative.x * inv_rel / BALL_MASS;
                let drag_ay = -drag_force * relative.y * inv_rel / BALL_MASS;

                // Magnus acceleration acts perpendicular to the relative
                // velocity: backspin lifts, and keeps pulling forward on the
                // descent.
                let magnus_ax = -magnus * relative.y * inv_rel / BALL_MASS;
                let magnus_ay = magnus * relative.x * inv_rel / BALL_MASS;

                validate_physical_quantity(drag_ax, -1000.0, 1000.0, "drag acceleration x")?;
                validate_physical_quantity(drag_ay, -1000.0, 1000.0, "drag acceleration y")?;
                validate_physical_quantity(magnus_ax, -500.0, 500.0, "Magnus acceleration x")?;
                validate_physical_quantity(magnus_ay, -500.0, 500.0, "Magnus acceleration y")?;

                velocity.x += (drag_ax + magnus_ax) * time_step;
                velocity.y += (drag_ay + magnus_ay - GRAVITY) * time_step;
            } else {
                // Freefall in still air relative to the flow.
                velocity.y -= GRAVITY * time_step;
            }

            x += velocity.x * time_step;
            y += velocity.y * time_step;

            validate_trajectory_point(x, y)?;

            let last = result.points.last().copied().unwrap_or_default();
            if result.points.len() < 2
                || (x - last.x).abs() > RECORD_SPACING
                || (y - last.y).abs() > RECORD_SPACING
            {
                result.points.push(TrajectoryPoint::new(x, y));
            }

            if y > result.apex {
                result.apex = y;
            }
        }

        if iterations >= MAX_ITERATIONS {
            warn!(
                "trajectory did not reach the ground within {MAX_ITERATIONS} iterations \
                 (speed {:.2}, angle {:.1})",
                self.launch.speed, self.launch.angle,
            );
            return Err(TrajectoryError::ConvergenceFailure(
                "trajectory calculation failed to converge within maximum iterations".into(),
            ));
        }

        // Interpolate the ground crossing from the last two raw samples so
        // the final point lands exactly on y = 0.
        if y < 0.0 && prev_y > 0.0 {
            let t = prev_y / (prev_y - y);
            let landing_x = prev_x + t * (x - prev_x);
            result.points.push(TrajectoryPoint::new(landing_x, 0.0));
        } else if let Some(last) = result.points.last_mut() {
            last.y = last.y.max(0.0);
        }

        result.distance = result.points.last().map(|p| p.x).unwrap_or(0.0);

        debug!(
            "trajectory complete: carry {:.1} m, apex {:.1} m, {} points, {} iterations",
            result.distance,
            result.apex,
            result.points.len(),
            iterations,
        );

        Ok(result)
    }
}

/// Calculate a shot trajectory with full input validation.
///
/// This is the canonical entry point. The result carries the decimated
/// flight path, carry distance, and apex; failures come back as a typed
/// [`TrajectoryError`] with no partial trajectory.
pub fn calculate_trajectory_with_validation(
    initial_speed: f64,
    launch_angle: f64,
    spin_rate: f64,
    wind_speed: f64,
    wind_angle: f64,
    spin_axis: SpinAxis,
) -> Result<TrajectoryResult, TrajectoryError> {
    let launch = LaunchConditions {
        speed: initial_speed,
        angle: launch_angle,
        spin_rate,
        spin_axis,
    };
    let wind = WindConditions {
        speed: wind_speed,
        angle: wind_angle,
    };
    TrajectorySolver::new(launch, wind).solve()
}

/// Legacy wrapper kept for callers that predate typed errors: any failure
/// collapses to an empty result.
pub fn calculate_trajectory(
    initial_speed: f64,
    launch_angle: f64,
    spin_rate: f64,
    wind_speed: f64,
    wind_angle: f64,
    spin_axis: SpinAxis,
) -> TrajectoryResult {
    calculate_trajectory_with_validation(
        initial_speed,
        launch_angle,
        spin_rate,
        wind_speed,
        wind_angle,
        spin_axis,
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        TRACKMAN_DRIVER_LAUNCH, TRACKMAN_DRIVER_SPEED, TRACKMAN_DRIVER_SPIN,
    };

    fn driver_shot(wind_speed: f64, wind_angle: f64) -> TrajectoryResult {
        calculate_trajectory_with_validation(
            TRACKMAN_DRIVER_SPEED,
            TRACKMAN_DRIVER_LAUNCH,
            TRACKMAN_DRIVER_SPIN,
            wind_speed,
            wind_angle,
            SpinAxis::default(),
        )
        .expect("driver shot should solve")
    }

    #[test]
    fn test_trajectory_starts_at_origin_and_lands_at_zero() {
        let result = driver_shot(0.0, 0.0);
        let first = result.points.first().unwrap();
        let last = result.points.last().unwrap();
        assert_eq!((first.x, first.y), (0.0, 0.0));
        assert!(last.y.abs() < 1e-9);
        assert!((result.distance - last.x).abs() < 1e-9);
    }

    #[test]
    fn test_downrange_distance_is_monotonic() {
        let result = driver_shot(0.0, 0.0);
        for pair in result.points.windows(2) {
            assert!(pair[1].x > pair[0].x, "x must increase along the path");
        }
    }

    #[test]
    fn test_apex_matches_highest_point() {
        let result = driver_shot(0.0, 0.0);
        let highest = result
            .points
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(result.apex >= highest);
        // The true apex can fall between stored points, but never by more
        // than the decimation spacing.
        assert!(result.apex - highest < 0.2);
    }

    #[test]
    fn test_backspin_adds_carry_and_height() {
        let with_spin = driver_shot(0.0, 0.0);
        let no_spin = calculate_trajectory_with_validation(
            TRACKMAN_DRIVER_SPEED,
            TRACKMAN_DRIVER_LAUNCH,
            0.0,
            0.0,
            0.0,
            SpinAxis::default(),
        )
        .unwrap();
        assert!(with_spin.apex > no_spin.apex);
        assert!(with_spin.distance > no_spin.distance);
    }

    #[test]
    fn test_invalid_input_returns_error_not_result() {
        let err = calculate_trajectory_with_validation(
            -1.0,
            10.0,
            2000.0,
            0.0,
            0.0,
            SpinAxis::default(),
        )
        .expect_err("negative speed must be rejected");
        assert!(matches!(err, TrajectoryError::InvalidInput(_)));
    }

    #[test]
    fn test_legacy_wrapper_returns_empty_on_failure() {
        let result = calculate_trajectory(-1.0, 10.0, 2000.0, 0.0, 0.0, SpinAxis::default());
        assert!(result.points.is_empty());
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.apex, 0.0);
    }

    #[test]
    fn test_zero_speed_shot_stays_put() {
        let result =
            calculate_trajectory_with_validation(0.0, 0.0, 0.0, 0.0, 0.0, SpinAxis::default())
                .unwrap();
        assert!(result.distance.abs() < 1e-6);
        assert!(result.apex.abs() < 1e-6);
    }

    #[test]
    fn test_solver_with_custom_wind_field_matches_constant_profile() {
        use crate::wind::{TerrainParameters, Wind, WindProfile};

        let launch = LaunchConditions::new(
            TRACKMAN_DRIVER_SPEED,
            TRACKMAN_DRIVER_LAUNCH,
            TRACKMAN_DRIVER_SPIN,
        );
        // A constant-profile headwind through the strategy seam should cost
        // more carry than the same reading through the surface gradient,
        // which tapers it below 10 m.
        let gradient = TrajectorySolver::new(launch, WindConditions { speed: 8.0, angle: 180.0 })
            .solve()
            .unwrap();
        let constant = TrajectorySolver::new(launch, WindConditions { speed: 8.0, angle: 180.0 })
            .with_wind_field(Box::new(Wind::new(
                8.0,
                180.0,
                WindProfile::Constant,
                TerrainParameters::open_terrain(),
            )))
            .solve()
            .unwrap();
        assert!(constant.distance < gradient.distance + 20.0);
        assert!(constant.distance > 100.0);
    }
}
