//! The per-tick control loop
//!
//! Single-threaded and cooperative, paced by the host's tick. Each
//! iteration suspends exactly once inside `step`; the only other I/O is
//! the non-blocking command poll. Per-tick order is fixed: receive one or
//! skip, integrate the altitude target, sample sensors, run the mixer,
//! write actuators, update telemetry. The mixer therefore always observes
//! the setpoint as of the start of the current tick.

use std::time::Instant;

use crate::command::CommandLink;
use crate::config::{AltitudeEnvelope, ControlConfig};
use crate::control::{integrate_target, GimbalGains, StabilizerGains};
use crate::host::{FlightHost, StepOutcome};
use crate::state::ControlState;
use crate::telemetry::Telemetry;

/// The stabilization loop, generic over the simulator host
pub struct ControlLoop<H: FlightHost> {
    host: H,
    link: CommandLink,
    stabilizer: StabilizerGains,
    gimbal: GimbalGains,
    envelope: AltitudeEnvelope,
    telemetry: Telemetry,
    state: ControlState,
}

impl<H: FlightHost> ControlLoop<H> {
    pub fn new(host: H, link: CommandLink, config: &ControlConfig) -> Self {
        Self {
            host,
            link,
            stabilizer: config.stabilizer.clone(),
            gimbal: config.gimbal.clone(),
            envelope: config.altitude.clone(),
            telemetry: Telemetry::new(&config.telemetry),
            state: ControlState::new(config.altitude.initial_target_m),
        }
    }

    /// Current loop state
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Mutable loop state, for scenario setup
    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    /// The underlying host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run one control tick
    ///
    /// The host must already have released the tick; `run` pairs every
    /// call with one `step`.
    pub fn tick(&mut self) {
        let dt = self.host.basic_time_step_ms() as f64 / 1000.0;

        if let Some(setpoint) = self.link.poll() {
            self.state.record_packet(setpoint);
            self.telemetry.record_packet(&self.state);
        }

        self.state.target_altitude = integrate_target(
            self.state.target_altitude,
            self.state.setpoint.throttle,
            dt,
            &self.envelope,
        );

        let frame = self.host.read_sensors();

        let mix = self
            .stabilizer
            .mix(&frame, &self.state.setpoint, self.state.target_altitude);
        self.host.write_rotors(&mix.to_command());
        self.host
            .write_gimbal(&self.gimbal.counter_rotation(&frame.angular_rate));

        self.telemetry.update(&mut self.state, &frame, Instant::now());
    }

    /// Run until the host signals shutdown
    ///
    /// The command socket is released when the loop is dropped.
    pub fn run(&mut self) {
        while self.host.step() == StepOutcome::Continue {
            self.tick();
        }
        log::info!(
            "host signaled shutdown after {} command packets",
            self.state.packets_received
        );
    }
}
