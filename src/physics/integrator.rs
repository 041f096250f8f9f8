//! Fixed-timestep spring integrator
//!
//! Drives a single scalar value from a start value toward an end value with
//! damped spring dynamics. Rendering code calls [`SpringIntegrator::advance`]
//! once per frame with the wall-clock time elapsed since the previous frame;
//! the integrator subdivides that time into fixed 1ms RK4 steps, carries the
//! leftover fraction to the next call, and interpolates the visible state
//! across the partial step.
//!
//! The integrator is either *active* or *resting*. `start` makes it active;
//! an `advance` that leaves it within the rest thresholds (or past the target
//! with overshoot clamping enabled) snaps it to the end value, after which
//! further `advance` calls are no-ops until the next `start`.

use std::time::Duration;

use crate::config::SpringConfig;
use crate::physics::state::{PhysicsState, SpringForce};

/// Maximum simulated time per `advance` call in seconds (4 frames at 60 FPS).
/// Anything above this is dropped rather than caught up.
pub const MAX_DELTA_TIME_SEC: f64 = 0.064;

/// Fixed solver timestep in seconds
pub const SOLVER_TIMESTEP_SEC: f64 = 0.001;

pub const DEFAULT_TENSION: f64 = 40.0;
pub const DEFAULT_FRICTION: f64 = 3.0;
pub const DEFAULT_REST_SPEED_THRESHOLD: f64 = 0.005;
pub const DEFAULT_DISPLACEMENT_FROM_REST_THRESHOLD: f64 = 0.005;

/// Damped spring simulation of one scalar value
#[derive(Debug, Clone)]
pub struct SpringIntegrator {
    tension: f64,
    friction: f64,

    current: PhysicsState,
    previous: PhysicsState,
    working: PhysicsState,

    start_value: f64,
    end_value: f64,
    time_accumulator: f64,

    overshoot_clamping_enabled: bool,
    rest_speed_threshold: f64,
    displacement_from_rest_threshold: f64,
}

impl Default for SpringIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_TENSION, DEFAULT_FRICTION)
    }
}

impl SpringIntegrator {
    /// Create a resting integrator with the given tension and friction
    pub fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            current: PhysicsState::default(),
            previous: PhysicsState::default(),
            working: PhysicsState::default(),
            start_value: 0.0,
            end_value: 0.0,
            time_accumulator: 0.0,
            overshoot_clamping_enabled: false,
            rest_speed_threshold: DEFAULT_REST_SPEED_THRESHOLD,
            displacement_from_rest_threshold: DEFAULT_DISPLACEMENT_FROM_REST_THRESHOLD,
        }
    }

    /// Create a resting integrator from a full configuration
    pub fn from_config(config: &SpringConfig) -> Self {
        let mut integrator = Self::new(config.tension, config.friction);
        integrator.apply_config(config);
        integrator
    }

    /// Overwrite tension and friction. Takes effect on the next solver step,
    /// including in the middle of a motion.
    pub fn set_config(&mut self, tension: f64, friction: f64) {
        self.tension = tension;
        self.friction = friction;
    }

    /// Apply physical parameters, rest thresholds and the overshoot policy
    pub fn apply_config(&mut self, config: &SpringConfig) {
        self.set_config(config.tension, config.friction);
        self.rest_speed_threshold = config.rest_speed_threshold;
        self.displacement_from_rest_threshold = config.displacement_from_rest_threshold;
        self.overshoot_clamping_enabled = config.overshoot_clamping;
    }

    /// Arm a new motion from `start_value` toward `end_value`.
    ///
    /// Velocity and the leftover solver time are cleared, so a motion started
    /// while another is in flight does not inherit its momentum.
    pub fn start(&mut self, start_value: f64, end_value: f64) {
        self.start_value = start_value;
        self.end_value = end_value;

        self.current = PhysicsState::at_rest(start_value);
        self.previous = self.current;
        self.working = self.current;
        self.time_accumulator = 0.0;

        tracing::debug!(
            "Spring started: {} -> {} (tension={}, friction={})",
            start_value,
            end_value,
            self.tension,
            self.friction
        );
    }

    /// Advance the simulation by `elapsed_millis` of wall-clock time.
    ///
    /// Returns `false` without touching any state if the spring was already at
    /// rest, `true` otherwise. A `true` return may coincide with the spring
    /// coming to rest; check [`is_finished`](Self::is_finished) afterwards.
    pub fn advance(&mut self, elapsed_millis: f64) -> bool {
        if self.is_finished() {
            return false;
        }

        // Negative and NaN deltas simulate nothing
        let mut delta = (elapsed_millis / 1000.0).max(0.0);
        if delta > MAX_DELTA_TIME_SEC {
            tracing::trace!(
                "Clamping frame delta {:.3}s to {}s",
                delta,
                MAX_DELTA_TIME_SEC
            );
            delta = MAX_DELTA_TIME_SEC;
        }

        self.time_accumulator += delta;

        let force = self.force();
        let mut state = self.current;

        while self.time_accumulator >= SOLVER_TIMESTEP_SEC {
            self.time_accumulator -= SOLVER_TIMESTEP_SEC;

            if self.time_accumulator < SOLVER_TIMESTEP_SEC {
                // Last step of this call
                self.previous = state;
            }

            state.integrate(&mut self.working, &force, SOLVER_TIMESTEP_SEC);
        }

        self.current = state;

        if self.time_accumulator > 0.0 {
            let alpha = self.time_accumulator / SOLVER_TIMESTEP_SEC;
            self.current = self.current.interpolate(&self.previous, alpha);
        }

        if self.is_finished() || (self.overshoot_clamping_enabled && self.is_overshooting()) {
            self.current = PhysicsState::at_rest(self.end_value);
            tracing::debug!("Spring at rest at {}", self.end_value);
        }

        tracing::trace!(
            position = self.current.position,
            velocity = self.current.velocity,
            accumulator = self.time_accumulator,
            "Spring advanced"
        );

        true
    }

    /// [`advance`](Self::advance) taking a `Duration`
    pub fn advance_duration(&mut self, elapsed: Duration) -> bool {
        self.advance(elapsed.as_secs_f64() * 1000.0)
    }

    /// Whether the spring is resting: slow enough, and either close enough to
    /// the end value or without any restoring force.
    pub fn is_finished(&self) -> bool {
        self.current.velocity.abs() <= self.rest_speed_threshold
            && (self.current_displacement_distance() <= self.displacement_from_rest_threshold
                || self.tension == 0.0)
    }

    /// Whether the value has crossed past the end value in the direction of travel
    pub fn is_overshooting(&self) -> bool {
        let value = self.current_value();
        self.tension > 0.0
            && ((self.start_value < self.end_value && value > self.end_value)
                || (self.start_value > self.end_value && value < self.end_value))
    }

    pub fn current_value(&self) -> f64 {
        self.current.position
    }

    pub fn current_velocity(&self) -> f64 {
        self.current.velocity
    }

    /// Absolute distance between the current value and the end value
    pub fn current_displacement_distance(&self) -> f64 {
        self.current.displacement_from(self.end_value)
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    /// Simulated seconds not yet consumed by a solver step
    pub fn time_accumulator(&self) -> f64 {
        self.time_accumulator
    }

    pub fn rest_speed_threshold(&self) -> f64 {
        self.rest_speed_threshold
    }

    pub fn set_rest_speed_threshold(&mut self, threshold: f64) {
        self.rest_speed_threshold = threshold;
    }

    pub fn displacement_from_rest_threshold(&self) -> f64 {
        self.displacement_from_rest_threshold
    }

    pub fn set_displacement_from_rest_threshold(&mut self, threshold: f64) {
        self.displacement_from_rest_threshold = threshold;
    }

    pub fn overshoot_clamping_enabled(&self) -> bool {
        self.overshoot_clamping_enabled
    }

    pub fn set_overshoot_clamping_enabled(&mut self, enabled: bool) {
        self.overshoot_clamping_enabled = enabled;
    }

    fn force(&self) -> SpringForce {
        SpringForce {
            tension: self.tension,
            friction: self.friction,
            target: self.end_value,
        }
    }
}
