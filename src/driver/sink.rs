//! Sample sink trait
//!
//! Defines the interface for consumers of spring samples (curve recorders,
//! property bindings) and the errors the driver layer can produce.

use crate::config::ConfigError;
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving a spring
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Spring still moving after {0} frames")]
    FrameLimitExceeded(usize),

    #[error("Invalid frame interval: {0:?}")]
    InvalidFrameInterval(Duration),

    #[error("Spring already running")]
    AlreadyRunning,

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// One spring value observed at a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Frame timestamp in milliseconds, on the driver's clock
    pub timestamp_ms: u64,
    /// Spring value after the frame's advance
    pub value: f64,
}

/// Trait for consumers of spring samples
///
/// A sink sees `begin` once per motion, then one `push` per frame that moved
/// the spring, then `finish` when the spring comes to rest.
pub trait SampleSink {
    /// A new motion toward `end_value` started at `start_time_ms`
    fn begin(&mut self, start_time_ms: u64, end_value: f64);

    /// Receive the value produced by one frame
    fn push(&mut self, sample: Sample);

    /// The motion finished
    fn finish(&mut self) {}
}

impl<T: SampleSink> SampleSink for Arc<ParkingMutex<T>> {
    fn begin(&mut self, start_time_ms: u64, end_value: f64) {
        self.lock().begin(start_time_ms, end_value);
    }

    fn push(&mut self, sample: Sample) {
        self.lock().push(sample);
    }

    fn finish(&mut self) {
        self.lock().finish();
    }
}

/// Fan samples out to two sinks
impl<A: SampleSink, B: SampleSink> SampleSink for (A, B) {
    fn begin(&mut self, start_time_ms: u64, end_value: f64) {
        self.0.begin(start_time_ms, end_value);
        self.1.begin(start_time_ms, end_value);
    }

    fn push(&mut self, sample: Sample) {
        self.0.push(sample);
        self.1.push(sample);
    }

    fn finish(&mut self) {
        self.0.finish();
        self.1.finish();
    }
}
