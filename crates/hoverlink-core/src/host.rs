//! Simulator host interfaces
//!
//! The loop consumes three narrow adapters from the host: the fixed-cadence
//! stepper, a per-tick sensor snapshot, and the rotor/gimbal actuators.
//! Everything behind these interfaces (device discovery, sensor sampling,
//! motor actuation, time stepping) is owned by the host.

use crate::Vec3;

/// Result of advancing the host by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The host released the next tick
    Continue,
    /// The host initiated shutdown; the loop must terminate
    Shutdown,
}

/// Sensor snapshot for one tick
///
/// Values are consistent with each other within the tick. NaN readings are
/// not sanitized here; they propagate into the mixer.
#[derive(Debug, Clone, Copy)]
pub struct SensorFrame {
    /// Body roll angle [rad]
    pub roll: f64,
    /// Body pitch angle [rad]
    pub pitch: f64,
    /// Body yaw angle [rad]
    pub yaw: f64,
    /// Body angular rate [rad/s]
    pub angular_rate: Vec3,
    /// Altitude above ground [m]
    pub altitude: f64,
}

/// Signed rotor velocity commands, one per propeller
///
/// The rotor direction convention is already applied: `front_right` and
/// `rear_left` carry the negation of their mixer magnitude, `front_left`
/// and `rear_right` are written as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorCommand {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
}

impl RotorCommand {
    pub fn zero() -> Self {
        Self {
            front_left: 0.0,
            front_right: 0.0,
            rear_left: 0.0,
            rear_right: 0.0,
        }
    }
}

/// Camera gimbal position commands [rad]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GimbalCommand {
    pub roll: f64,
    pub pitch: f64,
}

impl GimbalCommand {
    pub fn level() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
        }
    }
}

/// The interfaces the control loop consumes from the simulator host
///
/// `step` is the only suspension point of the loop: it advances simulated
/// time by one tick and blocks until the host releases the next one. The
/// tick period is invariant after startup. Host-side cleanup runs when the
/// host is dropped after the loop returns.
pub trait FlightHost {
    /// Tick period [ms], fixed for the process lifetime
    fn basic_time_step_ms(&self) -> u64;

    /// Advance one tick, blocking until the host releases it
    fn step(&mut self) -> StepOutcome;

    /// Latest sensor snapshot, consistent within this tick
    fn read_sensors(&mut self) -> SensorFrame;

    /// Forward four signed rotor velocities to the host
    fn write_rotors(&mut self, command: &RotorCommand);

    /// Forward two gimbal positions to the host
    fn write_gimbal(&mut self, command: &GimbalCommand);
}
