//! # hoverlink-core
//!
//! Real-time attitude and altitude stabilization for a quadrotor running
//! inside a robotics simulator, with a UDP command link for an external
//! operator process.
//!
//! Each simulator tick the control loop pulls at most one pending command
//! datagram, integrates operator throttle into the altitude target, reads a
//! sensor snapshot, runs the stabilization mixer, writes the four rotor
//! velocities and two gimbal positions, and updates telemetry.
//!
//! ## Modules
//!
//! - [`host`]: the interfaces the loop consumes from the simulator host
//! - [`command`]: non-blocking UDP setpoint ingest
//! - [`control`]: altitude integration, stabilization mixer, gimbal damping
//! - [`state`]: the single owned loop record
//! - [`telemetry`]: periodic status summary and command-channel watchdog
//! - [`runtime`]: the per-tick control loop
//! - [`simulation`]: a deterministic simulated host for SITL runs and tests

pub mod command;
pub mod config;
pub mod control;
pub mod host;
pub mod runtime;
pub mod simulation;
pub mod state;
pub mod telemetry;

use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f64>;

pub use command::{CommandError, CommandLink, Setpoint};
pub use config::ControlConfig;
pub use host::{FlightHost, GimbalCommand, RotorCommand, SensorFrame, StepOutcome};
pub use runtime::ControlLoop;
pub use state::ControlState;
