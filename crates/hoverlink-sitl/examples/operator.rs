//! Scripted operator
//!
//! Sends setpoint datagrams at 30 Hz through a short climb, hover, roll
//! nudge, descend sequence. A stand-in for a real operator process driving
//! the command port.

use std::net::UdpSocket;
use std::thread::sleep;
use std::time::Duration;

use hoverlink_core::command::Setpoint;

const COMMAND_ADDR: &str = "127.0.0.1:9000";
const RATE_HZ: f64 = 30.0;

fn main() -> std::io::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0")?;
    socket.connect(COMMAND_ADDR)?;
    println!("sending setpoints to {} at {} Hz", COMMAND_ADDR, RATE_HZ);

    let phases: [(&str, f64, Setpoint); 4] = [
        (
            "climb",
            4.0,
            Setpoint {
                throttle: 0.5,
                ..Setpoint::neutral()
            },
        ),
        ("hover", 3.0, Setpoint::neutral()),
        (
            "roll nudge",
            2.0,
            Setpoint {
                roll: 0.5,
                ..Setpoint::neutral()
            },
        ),
        (
            "descend",
            4.0,
            Setpoint {
                throttle: -0.3,
                ..Setpoint::neutral()
            },
        ),
    ];

    let interval = Duration::from_secs_f64(1.0 / RATE_HZ);
    for (label, duration_s, setpoint) in phases {
        println!("phase: {}", label);
        let packet = setpoint.to_packet();
        for _ in 0..((duration_s * RATE_HZ) as u32) {
            socket.send(packet.as_bytes())?;
            sleep(interval);
        }
    }

    println!("done");
    Ok(())
}
