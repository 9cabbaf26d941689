/// Physical constants used in ball-flight calculations

/// Gravitational acceleration in m/s²
pub const GRAVITY: f64 = 9.81;

/// Standard air density at sea level (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Dynamic viscosity of air at 20°C (kg/(m·s))
pub const AIR_VISCOSITY: f64 = 1.81e-5;

/// Mass of a conforming golf ball (kg)
pub const BALL_MASS: f64 = 0.0459;

/// Radius of a conforming golf ball (m)
pub const BALL_RADIUS: f64 = 0.0213;

/// Cross-sectional area of the ball (m²)
pub const BALL_AREA: f64 = std::f64::consts::PI * BALL_RADIUS * BALL_RADIUS;

/// Baseline drag coefficient in the laminar regime (dimensionless)
pub const BASE_DRAG_COEFFICIENT: f64 = 0.47;

/// Lift-curve slope versus nondimensional spin factor, calibrated against
/// TrackMan driver carry data for a dimpled ball
pub const SPIN_LIFT_SLOPE: f64 = 1.7;

/// Reynolds number where the laminar-turbulent transition begins
pub const CRITICAL_REYNOLDS: f64 = 4.0e4;

/// Reynolds number for fully turbulent flow. Dimples trip the boundary
/// layer well below the smooth-sphere value, so the drag crisis completes
/// early enough to cover the whole driver speed range.
pub const TURBULENT_REYNOLDS: f64 = 8.0e4;

/// Spin decay rate per second (empirical)
pub const SPIN_DECAY_RATE: f64 = 0.045;

/// Golf ball dimple depth (m)
pub const SURFACE_ROUGHNESS: f64 = 0.0014;

/// Maximum achievable lift coefficient before saturation
pub const MAX_LIFT_COEFFICIENT: f64 = 0.35;

// TrackMan 2024 baseline driver data, used for validation and calibration.
// 167 mph ball speed, tour-average launch window. Accuracy tests compare
// simulated carry and apex against these reference launch conditions.

/// Reference driver ball speed (m/s, 167 mph)
pub const TRACKMAN_DRIVER_SPEED: f64 = 73.152;

/// Reference driver launch angle (degrees)
pub const TRACKMAN_DRIVER_LAUNCH: f64 = 10.5;

/// Reference driver backspin rate (rpm)
pub const TRACKMAN_DRIVER_SPIN: f64 = 2700.0;

/// Reference driver apex height (m, 150 ft)
pub const TRACKMAN_DRIVER_HEIGHT: f64 = 45.72;

// Numerical stability constants

/// Minimum relative velocity magnitude before drag/Magnus forces are skipped
pub const MIN_VELOCITY_THRESHOLD: f64 = 0.001;

/// Minimum height for the wind gradient power law (avoids the singularity at 0)
pub const MIN_GRADIENT_HEIGHT: f64 = 0.1;
