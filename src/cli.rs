//! Command line interface

use crate::commands::simulate::{DEFAULT_FRAME_INTERVAL_MS, DEFAULT_MAX_FRAMES};
use clap::Parser;
use std::path::PathBuf;

/// Simulate a damped spring and record its curve.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "spring-animator", author, version, about, long_about = None)]
pub struct Cli {
    /// Spring configuration JSON (default spring when omitted).
    pub config: Option<PathBuf>,

    /// Write the recorded curve here as JSON; without it only a summary is
    /// logged.
    pub output: Option<PathBuf>,

    /// Value the motion starts from.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub from: f64,

    /// Value the motion settles on.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub to: f64,

    /// Simulated time between frames, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub frame_interval_ms: u64,

    /// Give up if the spring is still moving after this many frames.
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub max_frames: usize,
}
