//! Control algorithms for the stabilization loop
//!
//! - Altitude integrator (operator throttle as commanded vertical velocity)
//! - Stabilization mixer (attitude error, rate damping, altitude error,
//!   operator bias to four rotor velocities)
//! - Gimbal stabilizer (proportional counter-rotation of the camera)

pub mod altitude;
pub mod gimbal;
pub mod stabilizer;

pub use altitude::*;
pub use gimbal::*;
pub use stabilizer::*;
