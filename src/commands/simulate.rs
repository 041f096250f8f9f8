//! Offline spring simulation
//!
//! These commands run a spring motion against a synthetic frame clock, which
//! makes the output deterministic and independent of the machine's speed.

use crate::config::SpringConfig;
use crate::driver::{
    CurveRecorder, DriverError, DriverResult, DriverStatus, FrameDriver, ScaleBinding,
};
use std::path::Path;
use std::time::Duration;

/// Default frame interval (60Hz rounded down, as a frame callback would see it)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Default upper bound on simulated frames
pub const DEFAULT_MAX_FRAMES: usize = 100_000;

/// Simulate one motion from `start_value` to `end_value` at a fixed frame
/// interval and return the recorded curve.
pub fn simulate(
    config: &SpringConfig,
    start_value: f64,
    end_value: f64,
    frame_interval_ms: u64,
    max_frames: usize,
) -> DriverResult<CurveRecorder> {
    config.validate()?;
    if frame_interval_ms == 0 {
        return Err(DriverError::InvalidFrameInterval(Duration::ZERO));
    }

    let mut driver = FrameDriver::new((CurveRecorder::new(), ScaleBinding::default()));
    driver.trigger(0, config, start_value, end_value);

    let mut now_ms = 0;
    let mut frames = 0;
    loop {
        now_ms += frame_interval_ms;
        if driver.tick(now_ms) == DriverStatus::Idle {
            break;
        }

        frames += 1;
        if frames >= max_frames {
            tracing::warn!("Simulation stopped after {} frames", frames);
            return Err(DriverError::FrameLimitExceeded(frames));
        }
    }

    let (recorder, binding) = driver.into_sink();

    tracing::debug!(
        "Simulated {} -> {} in {} frames ({}ms), final scale {:?}",
        start_value,
        end_value,
        recorder.len(),
        recorder.duration_ms(),
        binding.scale()
    );

    Ok(recorder)
}

/// Simulate a motion and write the recorded curve to `output_file`.
///
/// The configuration is read from `config_file` when given, otherwise the
/// default spring is used. Returns the number of samples written.
pub fn simulate_to_file(
    config_file: Option<&Path>,
    output_file: &Path,
    start_value: f64,
    end_value: f64,
    frame_interval_ms: u64,
    max_frames: usize,
) -> DriverResult<usize> {
    let config = match config_file {
        Some(path) => SpringConfig::load(path)?,
        None => SpringConfig::default(),
    };

    tracing::info!(
        "Simulating spring {} -> {} at {}ms frames with config: tension={}, friction={}, overshoot_clamping={}",
        start_value,
        end_value,
        frame_interval_ms,
        config.tension,
        config.friction,
        config.overshoot_clamping
    );

    let recorder = simulate(
        &config,
        start_value,
        end_value,
        frame_interval_ms,
        max_frames,
    )?;
    recorder.write_json(output_file)?;

    Ok(recorder.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::driver::CurveExport;

    #[test]
    fn test_simulate_settles_on_end_value() {
        let recorder = simulate(&SpringConfig::default(), 1.0, 0.0, 16, 10_000).unwrap();

        assert!(recorder.is_finished());
        assert_eq!(recorder.end_value(), 0.0);
        assert_eq!(recorder.samples().last().map(|s| s.value), Some(0.0));
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let config = SpringConfig::new(120.0, 8.0);
        let first = simulate(&config, 0.0, 10.0, 16, 10_000).unwrap();
        let second = simulate(&config, 0.0, 10.0, 16, 10_000).unwrap();

        assert_eq!(first.samples(), second.samples());
    }

    #[test]
    fn test_stiffer_spring_settles_faster() {
        let soft = simulate(&SpringConfig::new(40.0, 6.0), 0.0, 1.0, 16, 10_000).unwrap();
        let stiff = simulate(&SpringConfig::new(400.0, 40.0), 0.0, 1.0, 16, 10_000).unwrap();

        assert!(stiff.len() < soft.len());
    }

    #[test]
    fn test_zero_tension_produces_no_samples() {
        let recorder = simulate(&SpringConfig::new(0.0, 3.0), 0.0, 1.0, 16, 10).unwrap();

        assert!(recorder.is_empty());
        assert!(recorder.is_finished());
    }

    #[test]
    fn test_simulate_rejects_bad_input() {
        let zero_interval = simulate(&SpringConfig::default(), 0.0, 1.0, 0, 10);
        assert!(matches!(
            zero_interval,
            Err(DriverError::InvalidFrameInterval(_))
        ));

        let bad_config = simulate(&SpringConfig::new(-1.0, 3.0), 0.0, 1.0, 16, 10);
        assert!(matches!(
            bad_config,
            Err(DriverError::ConfigError(ConfigError::InvalidValue { .. }))
        ));

        let undamped = simulate(&SpringConfig::new(40.0, 0.0), 0.0, 1.0, 16, 50);
        assert!(matches!(undamped, Err(DriverError::FrameLimitExceeded(50))));
    }

    #[test]
    fn test_simulate_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("spring.json");
        let output_path = dir.path().join("curve.json");
        SpringConfig::new(200.0, 20.0)
            .with_overshoot_clamping(true)
            .save(&config_path)
            .unwrap();

        let written = simulate_to_file(Some(&config_path), &output_path, 0.0, 1.0, 16, 10_000).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let export: CurveExport = serde_json::from_str(&content).unwrap();
        assert_eq!(export.samples.len(), written);
        assert!(export.finished);
        assert!(export.samples.iter().all(|s| s.value <= 1.0));
    }

    #[test]
    fn test_simulate_to_file_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("curve.json");

        let written = simulate_to_file(None, &output_path, 1.0, 0.0, 16, 10_000).unwrap();

        assert!(written > 0);
        assert!(output_path.exists());
    }
}
