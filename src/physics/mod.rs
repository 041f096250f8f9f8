//! Spring physics
//!
//! This module contains the fixed-timestep spring integrator and the
//! position/velocity state it advances.

pub mod integrator;
pub mod state;

pub use integrator::{SpringIntegrator, MAX_DELTA_TIME_SEC, SOLVER_TIMESTEP_SEC};
pub use state::{PhysicsState, SpringForce};
