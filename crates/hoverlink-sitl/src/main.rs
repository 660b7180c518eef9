//! Software-in-the-loop runner
//!
//! Flies the stabilization loop against the simulated host. An operator
//! process (see `examples/operator.rs`) can steer it over UDP exactly as it
//! would steer the controller inside a real simulator.
//!
//! Exits 0 on host-initiated shutdown, non-zero if the command socket
//! cannot be created or bound.

use env_logger::{Env, Target};

use hoverlink_core::command::CommandLink;
use hoverlink_core::config::ControlConfig;
use hoverlink_core::host::FlightHost;
use hoverlink_core::runtime::ControlLoop;
use hoverlink_core::simulation::{SimHost, SimHostConfig};

fn main() {
    // Telemetry is line-oriented text on stdout
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let config = ControlConfig::default();

    let link = match CommandLink::bind(&config.command) {
        Ok(link) => link,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("command link listening on UDP port {}", config.command.port);

    let host = SimHost::new(SimHostConfig::default());
    log::info!(
        "simulated host ready, T_step = {} ms",
        host.basic_time_step_ms()
    );
    log::info!("waiting for operator setpoints (roll pitch yaw throttle)");

    let mut control = ControlLoop::new(host, link, &config);
    control.run();

    log::info!("shutting down");
}
