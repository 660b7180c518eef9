//! Simulated flight host
//!
//! A deterministic fixed-step stand-in for the robotics simulator, so the
//! SITL binary and the integration tests can exercise the full loop
//! without one installed.

pub mod host;

pub use host::*;
