//! Loop state
//!
//! The setpoint, altitude target, packet counter and wall-clock stamps are
//! process-wide by nature. They live in a single owned record held by the
//! loop and passed to components as an explicit handle, never as ambient
//! globals.

use std::time::Instant;

use crate::command::Setpoint;

/// Persistent control loop state, one instance per process
#[derive(Debug, Clone)]
pub struct ControlState {
    /// Most recent successfully parsed setpoint
    pub setpoint: Setpoint,
    /// Altitude the vertical controller steers toward [m]
    pub target_altitude: f64,
    /// Total successfully parsed command packets
    pub packets_received: u64,
    /// Wall time of the last successful parse (start time before any packet)
    pub last_packet_time: Instant,
    /// Wall time of the last status emission
    pub last_status_time: Instant,
}

impl ControlState {
    pub fn new(initial_target_altitude: f64) -> Self {
        let now = Instant::now();
        Self {
            setpoint: Setpoint::neutral(),
            target_altitude: initial_target_altitude,
            packets_received: 0,
            last_packet_time: now,
            last_status_time: now,
        }
    }

    /// Replace the setpoint with a freshly parsed one
    ///
    /// Counters and the packet stamp move only on successful parses, so a
    /// malformed datagram leaves this record untouched.
    pub fn record_packet(&mut self, setpoint: Setpoint) {
        self.setpoint = setpoint;
        self.packets_received += 1;
        self.last_packet_time = Instant::now();
    }
}
