//! # Golf Flight Engine
//!
//! Golf ball flight physics engine: adaptive-timestep trajectory integration
//! with layered standard-atmosphere modeling, height-dependent wind profiles,
//! and empirical golf-ball aerodynamics.

// Re-export the main types and functions
pub use atmosphere::{air_density, AtmosphericLayer, AtmosphericModel, STANDARD_ATMOSPHERE};
pub use batch::{
    run_dispersion, solve_batch, DispersionParams, DispersionResults,
};
pub use trajectory::{
    calculate_trajectory, calculate_trajectory_with_validation, LaunchConditions, SpinAxis,
    TrajectoryPoint, TrajectoryResult, TrajectorySolver, WindConditions,
};
pub use validation::TrajectoryError;
pub use weather::WeatherSample;
pub use wind::{wind_gradient, GradientWind, TerrainParameters, Wind, WindField, WindProfile};

// Module declarations
pub mod aerodynamics;
pub mod atmosphere;
pub mod batch;
pub mod constants;
pub mod trajectory;
pub mod validation;
pub mod weather;
pub mod wind;
