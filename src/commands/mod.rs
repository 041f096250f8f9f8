//! Command handlers
//!
//! Entry points used by the binary to run spring simulations offline.

pub mod simulate;
