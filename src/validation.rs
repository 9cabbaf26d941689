//! Input and physical-quantity validation.
//!
//! Every range check the integrator performs funnels through
//! [`validate_physical_quantity`], so force, acceleration, and position
//! bounds all fail the same way: a typed [`TrajectoryError`] carrying a
//! human-readable message. No partial results survive a failed check.

use thiserror::Error;

/// Terminal failure modes of a trajectory calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrajectoryError {
    /// Caller error: a launch or wind parameter was out of range. Detected
    /// before any simulation work.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An intermediate physical quantity left its plausible bounds or went
    /// non-finite mid-flight.
    #[error("calculation error: {0}")]
    CalculationError(String),

    /// The integration loop exhausted its iteration budget before the ball
    /// returned to the ground.
    #[error("convergence failure: {0}")]
    ConvergenceFailure(String),
}

/// Validate launch parameters before simulation. Fails fast on the first
/// out-of-range value with a descriptive message.
pub fn validate_launch_parameters(
    initial_speed: f64,
    launch_angle: f64,
    spin_rate: f64,
    wind_speed: f64,
    wind_angle: f64,
) -> Result<(), TrajectoryError> {
    if initial_speed < 0.0 {
        return Err(TrajectoryError::InvalidInput(
            "initial speed cannot be negative".into(),
        ));
    }
    if initial_speed > 100.0 {
        // ~225 mph, beyond physical limits for a struck golf ball
        return Err(TrajectoryError::InvalidInput(
            "initial speed exceeds maximum physical limit".into(),
        ));
    }
    if !(-90.0..=90.0).contains(&launch_angle) {
        return Err(TrajectoryError::InvalidInput(
            "launch angle must be between -90 and 90 degrees".into(),
        ));
    }
    if spin_rate < 0.0 {
        return Err(TrajectoryError::InvalidInput(
            "spin rate cannot be negative".into(),
        ));
    }
    if spin_rate > 10_000.0 {
        return Err(TrajectoryError::InvalidInput(
            "spin rate exceeds maximum physical limit".into(),
        ));
    }
    if wind_speed < 0.0 {
        return Err(TrajectoryError::InvalidInput(
            "wind speed cannot be negative".into(),
        ));
    }
    if wind_speed > 50.0 {
        return Err(TrajectoryError::InvalidInput(
            "wind speed exceeds maximum expected value".into(),
        ));
    }
    if !(0.0..=360.0).contains(&wind_angle) {
        return Err(TrajectoryError::InvalidInput(
            "wind angle must be between 0 and 360 degrees".into(),
        ));
    }
    Ok(())
}

/// Check that a mid-flight quantity is finite and inside `[min, max]`.
pub fn validate_physical_quantity(
    value: f64,
    min: f64,
    max: f64,
    name: &str,
) -> Result<(), TrajectoryError> {
    if !value.is_finite() {
        return Err(TrajectoryError::CalculationError(format!(
            "{name} calculation resulted in non-finite value"
        )));
    }
    if value < min || value > max {
        return Err(TrajectoryError::CalculationError(format!(
            "{name} out of valid range ({value:.4} not in [{min}, {max}])"
        )));
    }
    Ok(())
}

/// Check a freshly integrated trajectory point. A slightly negative height
/// is allowed so the ground-crossing step can interpolate the landing.
pub fn validate_trajectory_point(x: f64, y: f64) -> Result<(), TrajectoryError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(TrajectoryError::CalculationError(
            "non-finite values in trajectory calculation".into(),
        ));
    }
    if !(0.0..=1000.0).contains(&x) {
        return Err(TrajectoryError::CalculationError(
            "trajectory point x coordinate out of bounds".into(),
        ));
    }
    if !(-0.1..=500.0).contains(&y) {
        return Err(TrajectoryError::CalculationError(
            "trajectory point y coordinate out of bounds".into(),
        ));
    }
    Ok(())
}
