//! Frame-driven animation
//!
//! Wires a spring integrator to a frame clock and to the consumers of its
//! values (curve recorders, view bindings).

pub mod frame;
pub mod recorder;
pub mod sink;

pub use frame::{run_realtime, DriverStatus, FrameDriver};
pub use recorder::{CurveExport, CurveRecorder, ScaleBinding, SharedRecorder};
pub use sink::{DriverError, DriverResult, Sample, SampleSink};
