//! Spring Animator - natural-feeling motion for UI properties.
//!
//! This is the main library crate. It provides the damped spring
//! integrator, its configuration, the frame driver that feeds it wall-clock
//! time, the offline simulation commands, and the command line used by the
//! binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod physics;

pub use cli::Cli;
pub use config::{ConfigError, SpringConfig};
pub use driver::{CurveRecorder, DriverError, DriverStatus, FrameDriver, Sample, SampleSink};
pub use physics::SpringIntegrator;

use anyhow::Context;
use commands::simulate::{simulate, simulate_to_file};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spring_animator_lib=debug,spring_animator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the command line entry point.
///
/// Simulates one motion from `cli.from` to `cli.to`. With an output path the
/// recorded curve is written there, otherwise a summary is logged.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Spring Animator v{}", env!("CARGO_PKG_VERSION"));

    match &cli.output {
        Some(output) => {
            let written = simulate_to_file(
                cli.config.as_deref(),
                output,
                cli.from,
                cli.to,
                cli.frame_interval_ms,
                cli.max_frames,
            )
            .with_context(|| format!("Failed to simulate into {}", output.display()))?;

            tracing::info!("Wrote {} samples to {}", written, output.display());
        }
        None => {
            let config = match &cli.config {
                Some(path) => SpringConfig::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => SpringConfig::default(),
            };

            let recorder = simulate(
                &config,
                cli.from,
                cli.to,
                cli.frame_interval_ms,
                cli.max_frames,
            )
            .context("Simulation failed")?;

            let (lowest, highest) = recorder
                .samples()
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                    (lo.min(s.value), hi.max(s.value))
                });

            tracing::info!(
                "Spring settled in {} frames ({}ms), range [{:.4}, {:.4}]",
                recorder.len(),
                recorder.duration_ms(),
                lowest,
                highest
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;

    #[test]
    fn test_run_writes_curve() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("spring.json");
        let output_path = dir.path().join("curve.json");
        SpringConfig::new(80.0, 9.0).save(&config_path).unwrap();

        let args: Vec<OsString> = vec![
            "spring-animator".into(),
            config_path.clone().into(),
            output_path.clone().into(),
            "--from".into(),
            "0".into(),
            "--to".into(),
            "4".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        run(cli).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let export: driver::CurveExport = serde_json::from_str(&content).unwrap();
        assert_eq!(export.end_value, 4.0);
        assert_eq!(export.samples.last().map(|s| s.value), Some(4.0));
    }

    #[test]
    fn test_run_without_arguments() {
        let cli = Cli::try_parse_from(["spring-animator"]).unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_run_reports_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let args: Vec<OsString> = vec![
            "spring-animator".into(),
            dir.path().join("missing.json").into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_run_reports_frame_limit() {
        let cli = Cli::try_parse_from(["spring-animator", "--max-frames", "2"]).unwrap();

        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("Simulation failed"));
    }
}
