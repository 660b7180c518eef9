//! Deterministic simulated host
//!
//! First-order vertical and attitude response to the rotor commands of the
//! previous tick. The model is intentionally coarse: it exists to close the
//! loop, not to validate aerodynamics.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::host::{FlightHost, GimbalCommand, RotorCommand, SensorFrame, StepOutcome};
use crate::Vec3;

/// Simulated host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimHostConfig {
    /// Tick period [ms]
    pub time_step_ms: u64,
    /// Simulated duration before the host signals shutdown [s]
    pub duration_s: f64,
    /// Real-time factor (1.0 = real time, 0 = as fast as possible)
    pub real_time_factor: f64,
    /// Altitude at startup [m]
    pub initial_altitude_m: f64,
    /// Rotor magnitude at which the vehicle neither climbs nor sinks
    pub hover_thrust: f64,
    /// Climb rate per unit of thrust excess [m/s]
    pub climb_gain: f64,
    /// Angular acceleration per unit of differential thrust [rad/s^2]
    pub tilt_gain: f64,
    /// First-order angular rate damping [1/s]
    pub rate_damping: f64,
}

impl Default for SimHostConfig {
    fn default() -> Self {
        Self {
            time_step_ms: 32,
            duration_s: 60.0,
            real_time_factor: 1.0,
            initial_altitude_m: 0.0,
            hover_thrust: 68.5,
            climb_gain: 0.08,
            tilt_gain: 0.004,
            rate_damping: 2.0,
        }
    }
}

/// Handle to a simulated device that is acquired but never driven
///
/// The real device list carries two LEDs the controller acquires for
/// host-side effects without ever writing them; the simulated host keeps
/// the same contract.
#[derive(Debug, Clone)]
pub struct LedHandle {
    pub name: &'static str,
}

/// Simulated flight host
pub struct SimHost {
    config: SimHostConfig,
    ticks: u64,
    roll: f64,
    pitch: f64,
    yaw: f64,
    altitude: f64,
    angular_rate: Vec3,
    rotors: RotorCommand,
    gimbal: GimbalCommand,
    leds: [LedHandle; 2],
}

impl SimHost {
    pub fn new(config: SimHostConfig) -> Self {
        let altitude = config.initial_altitude_m;
        Self {
            config,
            ticks: 0,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            altitude,
            angular_rate: Vec3::zeros(),
            rotors: RotorCommand::zero(),
            gimbal: GimbalCommand::level(),
            leds: [
                LedHandle {
                    name: "front left led",
                },
                LedHandle {
                    name: "front right led",
                },
            ],
        }
    }

    /// Simulated time since startup [s]
    pub fn elapsed_s(&self) -> f64 {
        self.ticks as f64 * self.config.time_step_ms as f64 / 1000.0
    }

    /// Current simulated altitude [m]
    pub fn last_altitude(&self) -> f64 {
        self.altitude
    }

    /// Last rotor command written by the loop
    pub fn last_rotors(&self) -> &RotorCommand {
        &self.rotors
    }

    /// Last gimbal command written by the loop
    pub fn last_gimbal(&self) -> &GimbalCommand {
        &self.gimbal
    }

    /// The acquired-but-unwritten LED handles
    pub fn leds(&self) -> &[LedHandle; 2] {
        &self.leds
    }

    fn advance(&mut self, dt: f64) {
        let fl = self.rotors.front_left.abs();
        let fr = self.rotors.front_right.abs();
        let rl = self.rotors.rear_left.abs();
        let rr = self.rotors.rear_right.abs();

        // Vertical: climb rate follows mean thrust excess, bounded to keep
        // the coarse model from overshooting wildly on a single tick.
        let mean = (fl + fr + rl + rr) / 4.0;
        let climb_rate = (self.config.climb_gain * (mean - self.config.hover_thrust))
            .clamp(-3.0, 3.0);
        self.altitude = (self.altitude + climb_rate * dt).max(0.0);

        // Attitude: differential thrust accelerates the body, damped first
        // order. Higher right pair pushes roll negative, higher front pair
        // pushes pitch negative, matching the mixer's corrective signs.
        let roll_diff = (fr + rr) - (fl + rl);
        let pitch_diff = (fl + fr) - (rl + rr);
        let yaw_diff = (fr + rl) - (fl + rr);

        self.angular_rate.x +=
            (-self.config.tilt_gain * roll_diff - self.config.rate_damping * self.angular_rate.x)
                * dt;
        self.angular_rate.y +=
            (-self.config.tilt_gain * pitch_diff - self.config.rate_damping * self.angular_rate.y)
                * dt;
        self.angular_rate.z +=
            (self.config.tilt_gain * yaw_diff - self.config.rate_damping * self.angular_rate.z)
                * dt;

        self.roll += self.angular_rate.x * dt;
        self.pitch += self.angular_rate.y * dt;
        self.yaw += self.angular_rate.z * dt;
    }
}

impl FlightHost for SimHost {
    fn basic_time_step_ms(&self) -> u64 {
        self.config.time_step_ms
    }

    fn step(&mut self) -> StepOutcome {
        if self.elapsed_s() >= self.config.duration_s {
            return StepOutcome::Shutdown;
        }

        let dt = self.config.time_step_ms as f64 / 1000.0;
        self.advance(dt);
        self.ticks += 1;

        if self.config.real_time_factor > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(dt / self.config.real_time_factor));
        }

        StepOutcome::Continue
    }

    fn read_sensors(&mut self) -> SensorFrame {
        SensorFrame {
            roll: self.roll,
            pitch: self.pitch,
            yaw: self.yaw,
            angular_rate: self.angular_rate,
            altitude: self.altitude,
        }
    }

    fn write_rotors(&mut self, command: &RotorCommand) {
        self.rotors = *command;
    }

    fn write_gimbal(&mut self, command: &GimbalCommand) {
        self.gimbal = *command;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(duration_s: f64) -> SimHostConfig {
        SimHostConfig {
            duration_s,
            real_time_factor: 0.0,
            ..SimHostConfig::default()
        }
    }

    #[test]
    fn test_idle_rotors_keep_vehicle_grounded() {
        let mut host = SimHost::new(fast_config(1.0));
        while host.step() == StepOutcome::Continue {}

        assert_eq!(host.read_sensors().altitude, 0.0);
    }

    #[test]
    fn test_shutdown_after_duration() {
        let mut host = SimHost::new(fast_config(1.0));
        let mut steps = 0;
        while host.step() == StepOutcome::Continue {
            steps += 1;
        }

        // 1 s of 32 ms ticks
        assert_eq!(steps, 32);
        assert_eq!(host.step(), StepOutcome::Shutdown);
    }

    #[test]
    fn test_excess_thrust_climbs() {
        let mut host = SimHost::new(fast_config(2.0));
        let command = RotorCommand {
            front_left: 71.5,
            front_right: -71.5,
            rear_left: -71.5,
            rear_right: 71.5,
        };

        host.write_rotors(&command);
        for _ in 0..30 {
            host.step();
        }

        assert!(host.read_sensors().altitude > 0.0);
    }

    #[test]
    fn test_led_handles_present() {
        let host = SimHost::new(fast_config(1.0));
        let leds = host.leds();

        assert_eq!(leds[0].name, "front left led");
        assert_eq!(leds[1].name, "front right led");
    }
}
