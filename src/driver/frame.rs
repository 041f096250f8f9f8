//! Frame driver
//!
//! The integrator never schedules itself. A `FrameDriver` is the per-frame
//! callback around it: on every tick it measures the time since the last
//! frame that moved the spring, advances the integrator, and hands the new
//! value to its sink. Whoever owns the frame clock (a UI loop, a test, or
//! `run_realtime` below) calls `tick` until the driver reports `Idle`.

use crate::config::SpringConfig;
use crate::driver::sink::{DriverError, DriverResult, Sample, SampleSink};
use crate::physics::SpringIntegrator;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

/// Outcome of one driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    /// The spring moved; schedule another tick
    Running,
    /// The spring is at rest; stop ticking
    Idle,
}

/// Drives a `SpringIntegrator` from frame timestamps and feeds a sink
pub struct FrameDriver<S: SampleSink> {
    integrator: SpringIntegrator,
    sink: S,
    last_time_ms: u64,
    running: bool,
}

impl<S: SampleSink> FrameDriver<S> {
    pub fn new(sink: S) -> Self {
        Self::with_integrator(SpringIntegrator::default(), sink)
    }

    pub fn with_integrator(integrator: SpringIntegrator, sink: S) -> Self {
        Self {
            integrator,
            sink,
            last_time_ms: 0,
            running: false,
        }
    }

    /// Start a motion at `now_ms` if the spring is currently at rest.
    ///
    /// Triggers that arrive while the spring is still moving are ignored and
    /// return `false`. A motion that has come to rest but was not yet ticked
    /// to `Idle` is finished on the sink before the new one begins.
    pub fn trigger(
        &mut self,
        now_ms: u64,
        config: &SpringConfig,
        start_value: f64,
        end_value: f64,
    ) -> bool {
        if !self.integrator.is_finished() {
            tracing::debug!("Ignoring trigger at {}ms: spring still moving", now_ms);
            return false;
        }

        if self.running {
            self.sink.finish();
        }

        self.integrator.apply_config(config);
        self.integrator.start(start_value, end_value);
        self.last_time_ms = now_ms;
        self.running = true;
        self.sink.begin(now_ms, end_value);
        true
    }

    /// Advance the spring to `now_ms` and publish the new value.
    ///
    /// Timestamps earlier than the last frame count as zero elapsed time and
    /// do not move the frame clock back; their sample carries the last frame
    /// time so recorded timestamps never decrease.
    pub fn tick(&mut self, now_ms: u64) -> DriverStatus {
        if !self.running {
            return DriverStatus::Idle;
        }

        let elapsed_ms = now_ms.saturating_sub(self.last_time_ms);
        if self.integrator.advance(elapsed_ms as f64) {
            self.last_time_ms = self.last_time_ms.max(now_ms);
            self.sink.push(Sample {
                timestamp_ms: self.last_time_ms,
                value: self.integrator.current_value(),
            });
            DriverStatus::Running
        } else {
            self.running = false;
            self.sink.finish();
            tracing::debug!("Spring finished at {}ms", now_ms);
            DriverStatus::Idle
        }
    }

    /// Whether the driver still expects ticks
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn integrator(&self) -> &SpringIntegrator {
        &self.integrator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Run one motion against the wall clock, ticking every `frame_period`.
///
/// Returns the number of frames that moved the spring. Fails with
/// `FrameLimitExceeded` if the spring is still moving after `max_frames`
/// frames, leaving the driver running so the caller may keep ticking.
pub async fn run_realtime<S: SampleSink>(
    driver: &mut FrameDriver<S>,
    config: &SpringConfig,
    start_value: f64,
    end_value: f64,
    frame_period: Duration,
    max_frames: usize,
) -> DriverResult<usize> {
    if frame_period.is_zero() {
        return Err(DriverError::InvalidFrameInterval(frame_period));
    }

    let origin = Instant::now();
    if !driver.trigger(0, config, start_value, end_value) {
        return Err(DriverError::AlreadyRunning);
    }

    let mut interval = tokio::time::interval(frame_period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    interval.tick().await;

    let mut frames = 0;
    loop {
        interval.tick().await;
        let now_ms = origin.elapsed().as_millis() as u64;

        if driver.tick(now_ms) == DriverStatus::Idle {
            tracing::debug!("Realtime spring settled after {} frames", frames);
            return Ok(frames);
        }

        frames += 1;
        if frames >= max_frames {
            tracing::warn!("Spring still moving after {} frames, giving up", frames);
            return Err(DriverError::FrameLimitExceeded(frames));
        }
    }
}
