//! Camera gimbal stabilization
//!
//! Open-loop proportional counter-rotation of the camera to the body
//! angular rate. Stateless.

use serde::{Deserialize, Serialize};

use crate::host::GimbalCommand;
use crate::Vec3;

/// Gimbal damping gains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GimbalGains {
    /// Roll counter-rotation gain
    pub roll_gain: f64,
    /// Pitch counter-rotation gain
    pub pitch_gain: f64,
}

impl Default for GimbalGains {
    fn default() -> Self {
        Self {
            roll_gain: -0.115,
            pitch_gain: -0.1,
        }
    }
}

impl GimbalGains {
    /// Gimbal positions counter-rotating the body angular rate
    pub fn counter_rotation(&self, angular_rate: &Vec3) -> GimbalCommand {
        GimbalCommand {
            roll: self.roll_gain * angular_rate.x,
            pitch: self.pitch_gain * angular_rate.y,
        }
    }
}
