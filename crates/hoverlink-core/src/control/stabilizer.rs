//! Stabilization mixer
//!
//! The central controller: produces four rotor velocities from attitude
//! error, angular-rate damping, altitude error, and the operator bias.
//! Purely proportional; no integral or derivative terms are maintained.

use serde::{Deserialize, Serialize};

use crate::command::Setpoint;
use crate::host::{RotorCommand, SensorFrame};

/// Stabilization mixer gains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilizerGains {
    /// Hover-feedforward rotor speed
    pub vertical_thrust: f64,
    /// Bias added to altitude error before cubing
    pub vertical_offset: f64,
    /// Altitude proportional gain, applied to the cubed error
    pub vertical_p: f64,
    /// Roll proportional gain
    pub roll_p: f64,
    /// Pitch proportional gain
    pub pitch_p: f64,
}

impl Default for StabilizerGains {
    fn default() -> Self {
        Self {
            vertical_thrust: 68.5,
            vertical_offset: 0.6,
            vertical_p: 3.0,
            roll_p: 50.0,
            pitch_p: 30.0,
        }
    }
}

/// Per-axis mixer inputs derived for one tick
#[derive(Debug, Clone, Copy)]
pub struct AxisInputs {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub vertical: f64,
}

/// Unsigned rotor velocity magnitudes produced by the mixer
///
/// The rotor direction convention (FR and RL spin opposite to FL and RR)
/// is applied by [`RotorMix::to_command`], not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorMix {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
}

impl RotorMix {
    /// Apply the rotor direction convention for the actuator write
    ///
    /// `front_right` and `rear_left` receive the negation of their
    /// magnitude; `front_left` and `rear_right` are written as-is. The
    /// sign pattern encodes the physical rotor directions and must be
    /// preserved exactly.
    pub fn to_command(&self) -> RotorCommand {
        RotorCommand {
            front_left: self.front_left,
            front_right: -self.front_right,
            rear_left: -self.rear_left,
            rear_right: self.rear_right,
        }
    }
}

impl StabilizerGains {
    /// Derive the per-axis mixer inputs for one tick
    ///
    /// The attitude clamp at plus/minus 1 rad keeps extreme tilts from
    /// producing destabilizing torques. The altitude error is clamped to
    /// plus/minus 1 before cubing, so the cubic gives soft response near
    /// the setpoint and the vertical input never exceeds `vertical_p` in
    /// magnitude.
    pub fn axis_inputs(
        &self,
        frame: &SensorFrame,
        setpoint: &Setpoint,
        target_altitude: f64,
    ) -> AxisInputs {
        let roll = self.roll_p * frame.roll.clamp(-1.0, 1.0) + frame.angular_rate.x + setpoint.roll;
        let pitch =
            self.pitch_p * frame.pitch.clamp(-1.0, 1.0) + frame.angular_rate.y + setpoint.pitch;
        let yaw = setpoint.yaw;

        let diff_alt = (target_altitude - frame.altitude + self.vertical_offset).clamp(-1.0, 1.0);
        let vertical = self.vertical_p * diff_alt.powi(3);

        AxisInputs {
            roll,
            pitch,
            yaw,
            vertical,
        }
    }

    /// Run the mixer for one tick
    pub fn mix(&self, frame: &SensorFrame, setpoint: &Setpoint, target_altitude: f64) -> RotorMix {
        let inputs = self.axis_inputs(frame, setpoint, target_altitude);
        let thrust = self.vertical_thrust + inputs.vertical;

        RotorMix {
            front_left: thrust - inputs.roll + inputs.pitch - inputs.yaw,
            front_right: thrust + inputs.roll + inputs.pitch + inputs.yaw,
            rear_left: thrust - inputs.roll - inputs.pitch + inputs.yaw,
            rear_right: thrust + inputs.roll - inputs.pitch - inputs.yaw,
        }
    }
}
