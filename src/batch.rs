//! Batch and dispersion simulation.
//!
//! Recommendation layers scan many candidate launches at once; each
//! trajectory is an independent pure computation over read-only shared
//! tables, so the scans parallelize with no synchronization. The dispersion
//! simulation perturbs a base launch with normally distributed errors to
//! estimate carry spread, the way a fitting session reports shot groups.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::trajectory::{
    LaunchConditions, TrajectoryResult, TrajectorySolver, WindConditions,
};
use crate::validation::TrajectoryError;

/// Solve a batch of candidate launches in parallel.
///
/// Results come back in input order; each entry is the individual shot's
/// outcome, so one diverging candidate does not poison the scan.
pub fn solve_batch(
    launches: &[LaunchConditions],
    wind: WindConditions,
) -> Vec<Result<TrajectoryResult, TrajectoryError>> {
    launches
        .par_iter()
        .map(|launch| TrajectorySolver::new(*launch, wind).solve())
        .collect()
}

/// Standard deviations applied to a base launch during dispersion runs.
#[derive(Debug, Clone, Copy)]
pub struct DispersionParams {
    pub num_simulations: usize,
    /// Ball speed standard deviation (m/s)
    pub speed_std_dev: f64,
    /// Launch angle standard deviation (degrees)
    pub angle_std_dev: f64,
    /// Spin rate standard deviation (rpm)
    pub spin_std_dev: f64,
    /// Wind speed standard deviation (m/s)
    pub wind_speed_std_dev: f64,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            num_simulations: 500,
            speed_std_dev: 1.5,
            angle_std_dev: 0.75,
            spin_std_dev: 150.0,
            wind_speed_std_dev: 0.5,
        }
    }
}

/// Aggregated dispersion statistics.
#[derive(Debug, Clone)]
pub struct DispersionResults {
    /// Carry distance of every successful perturbed shot (m)
    pub distances: Vec<f64>,
    /// Apex of every successful perturbed shot (m)
    pub apexes: Vec<f64>,
    pub mean_distance: f64,
    pub std_distance: f64,
    pub mean_apex: f64,
}

/// Run a normal-perturbation dispersion simulation around a base launch.
///
/// Individual shots that fail validation after perturbation (for example a
/// sampled negative wind speed) are skipped rather than aborting the run;
/// the whole simulation only errs when every shot failed.
pub fn run_dispersion(
    base_launch: LaunchConditions,
    base_wind: WindConditions,
    params: DispersionParams,
) -> Result<DispersionResults, TrajectoryError> {
    let mut rng = rand::thread_rng();

    let speed_dist = normal(base_launch.speed, params.speed_std_dev)?;
    let angle_dist = normal(base_launch.angle, params.angle_std_dev)?;
    let spin_dist = normal(base_launch.spin_rate, params.spin_std_dev)?;
    let wind_dist = normal(base_wind.speed, params.wind_speed_std_dev)?;

    let launches: Vec<(LaunchConditions, WindConditions)> = (0..params.num_simulations)
        .map(|_| {
            let launch = LaunchConditions {
                speed: speed_dist.sample(&mut rng).clamp(0.0, 100.0),
                angle: angle_dist.sample(&mut rng).clamp(-90.0, 90.0),
                spin_rate: spin_dist.sample(&mut rng).clamp(0.0, 10_000.0),
                spin_axis: base_launch.spin_axis,
            };
            let wind = WindConditions {
                speed: wind_dist.sample(&mut rng).max(0.0).min(50.0),
                angle: base_wind.angle,
            };
            (launch, wind)
        })
        .collect();

    let outcomes: Vec<TrajectoryResult> = launches
        .par_iter()
        .filter_map(|(launch, wind)| TrajectorySolver::new(*launch, *wind).solve().ok())
        .collect();

    if outcomes.is_empty() {
        return Err(TrajectoryError::CalculationError(
            "no successful simulations in dispersion run".into(),
        ));
    }

    let distances: Vec<f64> = outcomes.iter().map(|r| r.distance).collect();
    let apexes: Vec<f64> = outcomes.iter().map(|r| r.apex).collect();

    let mean_distance = distances.iter().sum::<f64>() / distances.len() as f64;
    let variance = distances
        .iter()
        .map(|d| (d - mean_distance).powi(2))
        .sum::<f64>()
        / distances.len() as f64;
    let mean_apex = apexes.iter().sum::<f64>() / apexes.len() as f64;

    Ok(DispersionResults {
        distances,
        apexes,
        mean_distance,
        std_distance: variance.sqrt(),
        mean_apex,
    })
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, TrajectoryError> {
    Normal::new(mean, std_dev).map_err(|e| {
        TrajectoryError::InvalidInput(format!("invalid dispersion distribution: {e}"))
    })
}

/// Sample a uniformly random launch inside the validated envelope. Used by
/// stress tests to probe the solver across its whole input domain.
pub fn random_launch<R: Rng>(rng: &mut R) -> LaunchConditions {
    LaunchConditions {
        speed: rng.gen_range(5.0..90.0),
        angle: rng.gen_range(2.0..45.0),
        spin_rate: rng.gen_range(0.0..8000.0),
        spin_axis: Default::default(),
    }
}
