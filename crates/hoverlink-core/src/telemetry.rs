//! Telemetry and command-channel watchdog
//!
//! Periodic human-readable status lines plus a liveness check on the
//! command channel. Strictly observational: a stale channel is reported
//! every tick it remains stale, but control output is never altered and
//! the setpoints are never zeroed.

use std::time::{Duration, Instant};

use crate::config::TelemetryConfig;
use crate::host::SensorFrame;
use crate::state::ControlState;

/// Status reporter and watchdog
pub struct Telemetry {
    status_period: Duration,
    liveness_threshold: Duration,
    packet_trace_every: u64,
}

impl Telemetry {
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            status_period: Duration::from_secs_f64(config.status_period_s),
            liveness_threshold: Duration::from_secs_f64(config.liveness_threshold_s),
            packet_trace_every: config.packet_trace_every,
        }
    }

    /// Whether the command channel counts as stale
    ///
    /// Only meaningful once at least one packet has arrived; before that
    /// the operator may simply not have started yet.
    pub fn channel_stale(&self, state: &ControlState, now: Instant) -> bool {
        state.packets_received > 0
            && now.duration_since(state.last_packet_time) > self.liveness_threshold
    }

    /// Trace every Nth successfully parsed packet
    pub fn record_packet(&self, state: &ControlState) {
        if self.packet_trace_every > 0 && state.packets_received % self.packet_trace_every == 0 {
            let sp = &state.setpoint;
            log::info!(
                "received {} packets, latest r={:.2} p={:.2} y={:.2} t={:.2}",
                state.packets_received,
                sp.roll,
                sp.pitch,
                sp.yaw,
                sp.throttle
            );
        }
    }

    /// Emit the periodic status summary and the staleness warning
    pub fn update(&self, state: &mut ControlState, frame: &SensorFrame, now: Instant) {
        if now.duration_since(state.last_status_time) >= self.status_period {
            let sp = &state.setpoint;
            log::info!(
                "altitude {:.2} m (target {:.2} m) | roll {:.2} deg pitch {:.2} deg | \
                 setpoint r={:.2} p={:.2} y={:.2} t={:.2} | {} packets, last {:.1} s ago",
                frame.altitude,
                state.target_altitude,
                frame.roll.to_degrees(),
                frame.pitch.to_degrees(),
                sp.roll,
                sp.pitch,
                sp.yaw,
                sp.throttle,
                state.packets_received,
                now.duration_since(state.last_packet_time).as_secs_f64()
            );
            state.last_status_time = now;
        }

        if self.channel_stale(state, now) {
            log::warn!(
                "no command packets for {:.1} s (threshold {:.1} s)",
                now.duration_since(state.last_packet_time).as_secs_f64(),
                self.liveness_threshold.as_secs_f64()
            );
        }
    }
}
