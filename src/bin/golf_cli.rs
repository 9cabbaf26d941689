use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;

use golf_flight_engine::{
    calculate_trajectory_with_validation, run_dispersion, DispersionParams, LaunchConditions,
    SpinAxis, WeatherSample, WindConditions,
};

#[derive(Parser)]
#[command(name = "golf")]
#[command(version = "0.1.0")]
#[command(about = "Golf ball flight trajectory calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a single shot trajectory
    Trajectory {
        /// Ball speed at launch (m/s)
        #[arg(short = 's', long)]
        speed: f64,

        /// Launch angle (degrees)
        #[arg(short = 'a', long, default_value = "10.5")]
        angle: f64,

        /// Backspin rate (rpm)
        #[arg(long, default_value = "2700.0")]
        spin: f64,

        /// Spin axis tilt from vertical (degrees)
        #[arg(long, default_value = "0.0")]
        spin_tilt: f64,

        /// Spin axis direction from the target line (degrees)
        #[arg(long, default_value = "0.0")]
        spin_direction: f64,

        /// Wind speed at 10 m (m/s)
        #[arg(long, default_value = "0.0")]
        wind_speed: f64,

        /// Wind angle (degrees, 0 = tailwind, 180 = headwind)
        #[arg(long, default_value = "0.0")]
        wind_angle: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table", value_enum)]
        output: OutputFormat,

        /// Show every stored trajectory point, not just the summary
        #[arg(long)]
        full: bool,
    },

    /// Run a launch dispersion simulation
    Dispersion {
        /// Base ball speed (m/s)
        #[arg(short = 's', long)]
        speed: f64,

        /// Base launch angle (degrees)
        #[arg(short = 'a', long, default_value = "10.5")]
        angle: f64,

        /// Base backspin rate (rpm)
        #[arg(long, default_value = "2700.0")]
        spin: f64,

        /// Wind speed at 10 m (m/s)
        #[arg(long, default_value = "0.0")]
        wind_speed: f64,

        /// Wind angle (degrees)
        #[arg(long, default_value = "0.0")]
        wind_angle: f64,

        /// Number of simulated shots
        #[arg(short = 'n', long, default_value = "500")]
        num_sims: usize,

        /// Ball speed standard deviation (m/s)
        #[arg(long, default_value = "1.5")]
        speed_std: f64,

        /// Launch angle standard deviation (degrees)
        #[arg(long, default_value = "0.75")]
        angle_std: f64,

        /// Spin rate standard deviation (rpm)
        #[arg(long, default_value = "150.0")]
        spin_std: f64,
    },

    /// Report air density for given conditions
    Density {
        /// Altitude above sea level (m)
        #[arg(long, default_value = "0.0")]
        altitude: f64,

        /// Local temperature (°C); requires --pressure
        #[arg(long)]
        temperature: Option<f64>,

        /// Local pressure (hPa); requires --temperature
        #[arg(long)]
        pressure: Option<f64>,

        /// Relative humidity (%)
        #[arg(long, default_value = "50.0")]
        humidity: f64,
    },
}

#[derive(Serialize)]
struct TrajectorySummary {
    carry_m: f64,
    apex_m: f64,
    points: usize,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Trajectory {
            speed,
            angle,
            spin,
            spin_tilt,
            spin_direction,
            wind_speed,
            wind_angle,
            output,
            full,
        } => {
            let result = calculate_trajectory_with_validation(
                speed,
                angle,
                spin,
                wind_speed,
                wind_angle,
                SpinAxis::new(spin_tilt, spin_direction),
            )?;

            match output {
                OutputFormat::Table => {
                    println!("TRAJECTORY");
                    println!("  Carry distance: {:>8.1} m", result.distance);
                    println!("  Apex height:    {:>8.1} m", result.apex);
                    println!("  Stored points:  {:>8}", result.points.len());
                    if full {
                        println!();
                        println!("  {:>10}  {:>10}", "x (m)", "y (m)");
                        for point in &result.points {
                            println!("  {:>10.2}  {:>10.2}", point.x, point.y);
                        }
                    }
                }
                OutputFormat::Json => {
                    if full {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        let summary = TrajectorySummary {
                            carry_m: result.distance,
                            apex_m: result.apex,
                            points: result.points.len(),
                        };
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    }
                }
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    for point in &result.points {
                        writer.serialize(point)?;
                    }
                    writer.flush()?;
                }
            }
        }

        Commands::Dispersion {
            speed,
            angle,
            spin,
            wind_speed,
            wind_angle,
            num_sims,
            speed_std,
            angle_std,
            spin_std,
        } => {
            let launch = LaunchConditions::new(speed, angle, spin);
            let wind = WindConditions {
                speed: wind_speed,
                angle: wind_angle,
            };
            let params = DispersionParams {
                num_simulations: num_sims,
                speed_std_dev: speed_std,
                angle_std_dev: angle_std,
                spin_std_dev: spin_std,
                ..Default::default()
            };

            let results = run_dispersion(launch, wind, params)?;

            println!("DISPERSION ({} shots)", results.distances.len());
            println!("  Mean carry:   {:>8.1} m", results.mean_distance);
            println!("  Carry stddev: {:>8.1} m", results.std_distance);
            println!("  Mean apex:    {:>8.1} m", results.mean_apex);
        }

        Commands::Density {
            altitude,
            temperature,
            pressure,
            humidity,
        } => {
            let weather = match (temperature, pressure) {
                (Some(temp), Some(press)) => Some(WeatherSample {
                    temperature: temp,
                    pressure: press,
                    humidity,
                    ..Default::default()
                }),
                (None, None) => None,
                _ => {
                    return Err("--temperature and --pressure must be given together".into());
                }
            };

            let density = golf_flight_engine::air_density(weather.as_ref(), altitude);
            println!("Air density at {altitude:.0} m: {density:.4} kg/m³");
        }
    }

    Ok(())
}
