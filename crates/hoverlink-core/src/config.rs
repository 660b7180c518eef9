//! Loop configuration
//!
//! Defines configuration structures for the control loop. Defaults carry
//! the tuned constants of the production controller.

use serde::{Deserialize, Serialize};

use crate::control::{GimbalGains, StabilizerGains};

/// Top-level control loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Command link configuration
    pub command: CommandConfig,
    /// Altitude target envelope
    pub altitude: AltitudeEnvelope,
    /// Telemetry and watchdog configuration
    pub telemetry: TelemetryConfig,
    /// Stabilization mixer gains
    pub stabilizer: StabilizerGains,
    /// Camera gimbal damping gains
    pub gimbal: GimbalGains,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            command: CommandConfig::default(),
            altitude: AltitudeEnvelope::default(),
            telemetry: TelemetryConfig::default(),
            stabilizer: StabilizerGains::default(),
            gimbal: GimbalGains::default(),
        }
    }
}

/// Command link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// UDP port the command socket binds on all local addresses
    pub port: u16,
    /// Clamp incoming setpoints to the documented envelope
    /// (roll/pitch/yaw to [-2, 2], throttle to [-1, 1]).
    ///
    /// Off by default: the wire protocol does not range-check, and the
    /// mixer's internal clamps bound the effect of oversized values.
    pub clamp_setpoints: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            port: 9000,
            clamp_setpoints: false,
        }
    }
}

/// Altitude target envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AltitudeEnvelope {
    /// Lowest allowed altitude target [m]
    pub min_m: f64,
    /// Highest allowed altitude target [m]
    pub max_m: f64,
    /// Altitude target at startup [m]
    pub initial_target_m: f64,
}

impl Default for AltitudeEnvelope {
    fn default() -> Self {
        Self {
            min_m: 0.0,
            max_m: 100.0,
            initial_target_m: 1.0,
        }
    }
}

/// Telemetry and watchdog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Wall-clock interval between status summaries [s]
    pub status_period_s: f64,
    /// Silence on the command channel beyond this is reported stale [s]
    pub liveness_threshold_s: f64,
    /// Emit a received trace every this many parsed packets (0 disables)
    pub packet_trace_every: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            status_period_s: 5.0,
            liveness_threshold_s: 3.0,
            packet_trace_every: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControlConfig::default();

        assert_eq!(config.command.port, 9000);
        assert!(!config.command.clamp_setpoints);
        assert_eq!(config.altitude.min_m, 0.0);
        assert_eq!(config.altitude.max_m, 100.0);
        assert_eq!(config.altitude.initial_target_m, 1.0);
        assert_eq!(config.telemetry.status_period_s, 5.0);
        assert_eq!(config.telemetry.liveness_threshold_s, 3.0);
        assert_eq!(config.telemetry.packet_trace_every, 100);
    }
}
