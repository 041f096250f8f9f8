//! Built-in sample sinks
//!
//! `CurveRecorder` keeps every sample of a motion so the curve can be plotted
//! or exported; `ScaleBinding` maps values onto a view scale factor.

use crate::driver::sink::{DriverResult, Sample, SampleSink};
use chrono::{DateTime, Utc};
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Recorder shared between a running driver and its observers
pub type SharedRecorder = Arc<ParkingMutex<CurveRecorder>>;

/// In-memory record of one spring motion
#[derive(Debug, Clone, Default)]
pub struct CurveRecorder {
    samples: Vec<Sample>,
    start_time_ms: u64,
    end_value: f64,
    finished: bool,
}

/// Serialized form of a recorded curve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveExport {
    pub session_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub start_time_ms: u64,
    pub end_value: f64,
    pub finished: bool,
    pub samples: Vec<Sample>,
}

impl CurveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that can be handed to a driver and read concurrently
    pub fn shared() -> SharedRecorder {
        Arc::new(ParkingMutex::new(Self::new()))
    }

    /// Clear previous samples and remember the new motion's origin
    pub fn start(&mut self, start_time_ms: u64, end_value: f64) {
        self.samples.clear();
        self.start_time_ms = start_time_ms;
        self.end_value = end_value;
        self.finished = false;
    }

    pub fn add(&mut self, timestamp_ms: u64, value: f64) {
        self.samples.push(Sample {
            timestamp_ms,
            value,
        });
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    /// Whether the recorded motion ran until the spring came to rest
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time from the motion start to the last recorded sample
    pub fn duration_ms(&self) -> u64 {
        self.samples
            .last()
            .map(|s| s.timestamp_ms.saturating_sub(self.start_time_ms))
            .unwrap_or(0)
    }

    pub fn to_export(&self) -> CurveExport {
        CurveExport {
            session_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            start_time_ms: self.start_time_ms,
            end_value: self.end_value,
            finished: self.finished,
            samples: self.samples.clone(),
        }
    }

    /// Write the recorded curve as pretty JSON
    pub fn write_json(&self, path: &Path) -> DriverResult<()> {
        let data = serde_json::to_vec_pretty(&self.to_export())?;
        std::fs::write(path, data)?;

        tracing::info!("Wrote {} samples to {:?}", self.samples.len(), path);
        Ok(())
    }
}

impl SampleSink for CurveRecorder {
    fn begin(&mut self, start_time_ms: u64, end_value: f64) {
        self.start(start_time_ms, end_value);
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

/// Maps spring values onto a view scale factor
///
/// A value of 1 shrinks the view to half size, 0 leaves it at full size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleBinding {
    scale: Option<f64>,
}

impl ScaleBinding {
    pub fn scale_for(value: f64) -> f64 {
        1.0 - value * 0.5
    }

    /// Last applied scale, if any frame has been seen
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }
}

impl SampleSink for ScaleBinding {
    fn begin(&mut self, _start_time_ms: u64, _end_value: f64) {}

    fn push(&mut self, sample: Sample) {
        self.scale = Some(Self::scale_for(sample.value));
    }
}
