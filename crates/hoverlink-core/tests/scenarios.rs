//! End-to-end loop scenarios
//!
//! Drives the full control loop through a scripted host and a loopback
//! command socket, checking the documented behaviors: hover output, climb
//! integration, altitude saturation, malformed-packet handling, roll
//! commands, and command-channel staleness.

use std::net::UdpSocket;
use std::thread::sleep;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;

use hoverlink_core::command::CommandLink;
use hoverlink_core::config::ControlConfig;
use hoverlink_core::host::{FlightHost, GimbalCommand, RotorCommand, SensorFrame, StepOutcome};
use hoverlink_core::runtime::ControlLoop;
use hoverlink_core::simulation::{SimHost, SimHostConfig};
use hoverlink_core::telemetry::Telemetry;
use hoverlink_core::Vec3;

/// Host double with test-controlled sensors and recorded actuator writes
struct ScriptedHost {
    time_step_ms: u64,
    frame: SensorFrame,
    rotors: Option<RotorCommand>,
    gimbal: Option<GimbalCommand>,
}

impl ScriptedHost {
    fn new(frame: SensorFrame) -> Self {
        Self {
            time_step_ms: 32,
            frame,
            rotors: None,
            gimbal: None,
        }
    }
}

impl FlightHost for ScriptedHost {
    fn basic_time_step_ms(&self) -> u64 {
        self.time_step_ms
    }

    fn step(&mut self) -> StepOutcome {
        StepOutcome::Continue
    }

    fn read_sensors(&mut self) -> SensorFrame {
        self.frame
    }

    fn write_rotors(&mut self, command: &RotorCommand) {
        self.rotors = Some(*command);
    }

    fn write_gimbal(&mut self, command: &GimbalCommand) {
        self.gimbal = Some(*command);
    }
}

fn level_frame(altitude: f64) -> SensorFrame {
    SensorFrame {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
        angular_rate: Vec3::zeros(),
        altitude,
    }
}

/// Control loop on a scripted host with an ephemeral loopback link
fn scripted_loop(
    frame: SensorFrame,
    mut config: ControlConfig,
) -> (ControlLoop<ScriptedHost>, u16) {
    config.command.port = 0;
    let link = CommandLink::bind(&config.command).expect("ephemeral bind");
    let port = link.local_addr().unwrap().port();
    let control = ControlLoop::new(ScriptedHost::new(frame), link, &config);
    (control, port)
}

fn send(port: u16, payload: &str) {
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender
        .send_to(payload.as_bytes(), ("127.0.0.1", port))
        .unwrap();
}

/// Tick until the loop has parsed `expected` packets in total
fn tick_until_packets(control: &mut ControlLoop<ScriptedHost>, expected: u64) {
    for _ in 0..500 {
        control.tick();
        if control.state().packets_received == expected {
            return;
        }
        sleep(Duration::from_millis(2));
    }
    panic!("packet {} never arrived over loopback", expected);
}

#[test]
fn test_hover_tick_writes_baseline_velocities() {
    // S1: zero setpoints, level vehicle at 0.4 m, target 1.0 m
    let (mut control, _port) = scripted_loop(level_frame(0.4), ControlConfig::default());

    control.tick();

    let rotors = control.host().rotors.expect("rotors written every tick");
    assert_relative_eq!(rotors.front_left, 71.5, epsilon = 1e-12);
    assert_relative_eq!(rotors.front_right, -71.5, epsilon = 1e-12);
    assert_relative_eq!(rotors.rear_left, -71.5, epsilon = 1e-12);
    assert_relative_eq!(rotors.rear_right, 71.5, epsilon = 1e-12);

    let gimbal = control.host().gimbal.expect("gimbal written every tick");
    assert_eq!(gimbal, GimbalCommand::level());
}

#[test]
fn test_climb_command_integrates_target() {
    // S2: throttle 0.5 m/s sustained for about two seconds
    let (mut control, port) = scripted_loop(level_frame(0.4), ControlConfig::default());

    send(port, "0 0 0 0.5");
    tick_until_packets(&mut control, 1);
    for _ in 0..62 {
        control.tick();
    }

    // 63 integrating ticks of 32 ms at 0.5 m/s
    assert_relative_eq!(
        control.state().target_altitude,
        1.0 + 0.5 * 0.032 * 63.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_altitude_target_saturates_and_recovers() {
    // S3: full throttle from 99.9 m pins the target at 100 m; descending
    // afterwards takes effect immediately.
    let (mut control, port) = scripted_loop(level_frame(99.0), ControlConfig::default());
    control.state_mut().target_altitude = 99.9;

    send(port, "0 0 0 1.0");
    tick_until_packets(&mut control, 1);
    for _ in 0..31 {
        control.tick();
    }
    assert_eq!(control.state().target_altitude, 100.0);

    send(port, "0 0 0 -0.5");
    tick_until_packets(&mut control, 2);
    for _ in 0..62 {
        control.tick();
    }
    assert_relative_eq!(
        control.state().target_altitude,
        100.0 - 0.5 * 0.032 * 63.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_malformed_packet_changes_nothing() {
    // S4: a payload with a non-numeric token is discarded silently
    let (mut control, port) = scripted_loop(level_frame(0.4), ControlConfig::default());

    send(port, "1.0 2.0 three 4.0");
    sleep(Duration::from_millis(100));
    for _ in 0..5 {
        control.tick();
    }

    assert_eq!(control.state().packets_received, 0);
    assert_eq!(control.state().setpoint.roll, 0.0);
    assert_eq!(control.state().setpoint.throttle, 0.0);
    assert_eq!(control.state().target_altitude, 1.0);
}

#[test]
fn test_roll_command_shifts_rotor_pairs() {
    // S5: operator roll 1.0 with the vehicle tilted 0.1 rad
    let mut frame = level_frame(0.4);
    frame.roll = 0.1;
    let (mut control, port) = scripted_loop(frame, ControlConfig::default());

    send(port, "1.0 0 0 0");
    tick_until_packets(&mut control, 1);

    // roll_input = 50 * 0.1 + 0 + 1.0 = 6.0 against the 71.5 baseline
    let rotors = control.host().rotors.unwrap();
    assert_relative_eq!(rotors.front_left, 65.5, epsilon = 1e-12);
    assert_relative_eq!(rotors.front_right, -77.5, epsilon = 1e-12);
    assert_relative_eq!(rotors.rear_left, -65.5, epsilon = 1e-12);
    assert_relative_eq!(rotors.rear_right, 77.5, epsilon = 1e-12);
}

#[test]
fn test_stale_channel_warns_but_keeps_setpoint() {
    // S6 with a shortened threshold: after the channel goes silent the
    // watchdog reports staleness while control keeps using the last
    // setpoint unchanged.
    let mut config = ControlConfig::default();
    config.telemetry.liveness_threshold_s = 0.05;
    let (mut control, port) = scripted_loop(level_frame(0.4), config.clone());

    send(port, "1.0 0 0 0");
    tick_until_packets(&mut control, 1);
    let rotors_before = control.host().rotors.unwrap();

    sleep(Duration::from_millis(120));
    control.tick();

    let watchdog = Telemetry::new(&config.telemetry);
    assert!(watchdog.channel_stale(control.state(), Instant::now()));

    // Observational only: same setpoint, same control output
    assert_eq!(control.state().setpoint.roll, 1.0);
    assert_eq!(control.host().rotors.unwrap(), rotors_before);
}

#[test]
fn test_simulated_host_climbs_toward_target() {
    // Full SITL pass: the loop flown against the simulated host converges
    // toward the altitude where the vertical term vanishes (the target
    // plus the vertical offset).
    let mut config = ControlConfig::default();
    config.command.port = 0;
    let link = CommandLink::bind(&config.command).unwrap();

    let host = SimHost::new(SimHostConfig {
        duration_s: 20.0,
        real_time_factor: 0.0,
        ..SimHostConfig::default()
    });
    let mut control = ControlLoop::new(host, link, &config);
    control.run();

    let altitude = control.host().last_altitude();
    assert!(
        altitude > 1.0 && altitude < 1.6,
        "expected convergence toward 1.6 m, got {altitude}"
    );

    // Rotor direction convention held throughout
    let rotors = control.host().last_rotors();
    assert!(rotors.front_left > 0.0);
    assert!(rotors.front_right < 0.0);
    assert!(rotors.rear_left < 0.0);
    assert!(rotors.rear_right > 0.0);
}
