//! UDP command ingest
//!
//! An external operator process issues `roll pitch yaw throttle` setpoints
//! as ASCII datagrams at a rate independent of the simulator step. The link
//! is non-blocking and unqueued: each tick consumes at most one datagram,
//! and the newest successfully parsed setpoint wins.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::str::FromStr;

use thiserror::Error;

use crate::config::CommandConfig;

/// Longest accepted payload [bytes]; longer datagrams are truncated
const MAX_DATAGRAM: usize = 127;

/// Command link errors
///
/// Socket creation and binding failures are fatal at startup. Runtime
/// receive errors never surface here; other than "would block" they are
/// logged and the datagram skipped.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to bind command socket on UDP port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("failed to configure command socket: {0}")]
    Configure(#[source] io::Error),
}

/// Operator-supplied setpoint tuple
///
/// Roll, pitch and yaw are biases added into the mixer; throttle is a
/// commanded vertical velocity [m/s], not a direct thrust command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub throttle: f64,
}

impl Setpoint {
    /// All-zero setpoint, the state before any packet arrives
    pub fn neutral() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            throttle: 0.0,
        }
    }

    /// Copy clamped to the documented envelope:
    /// roll/pitch/yaw to [-2, 2], throttle to [-1, 1]
    pub fn clamped(&self) -> Self {
        Self {
            roll: self.roll.clamp(-2.0, 2.0),
            pitch: self.pitch.clamp(-2.0, 2.0),
            yaw: self.yaw.clamp(-2.0, 2.0),
            throttle: self.throttle.clamp(-1.0, 1.0),
        }
    }

    /// Wire encoding: four decimal numbers separated by single spaces
    pub fn to_packet(&self) -> String {
        format!(
            "{:.6} {:.6} {:.6} {:.6}",
            self.roll, self.pitch, self.yaw, self.throttle
        )
    }
}

impl Default for Setpoint {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Parse a command payload
///
/// The grammar is deliberately lax: any whitespace run (including newlines)
/// separates tokens, and exactly four numeric tokens are required. Extra
/// trailing data fails the parse. Returns `None` on any malformed payload.
pub fn parse_setpoint(text: &str) -> Option<Setpoint> {
    let mut fields = [0.0f64; 4];
    let mut count = 0;

    for token in text.split_whitespace() {
        if count == fields.len() {
            return None;
        }
        fields[count] = f64::from_str(token).ok()?;
        count += 1;
    }

    if count != fields.len() {
        return None;
    }

    Some(Setpoint {
        roll: fields[0],
        pitch: fields[1],
        yaw: fields[2],
        throttle: fields[3],
    })
}

/// Non-blocking UDP receiver for operator setpoints
///
/// Bound to the command port on all local addresses. The socket is closed
/// when the link is dropped.
pub struct CommandLink {
    socket: UdpSocket,
    clamp_setpoints: bool,
}

impl CommandLink {
    /// Bind the command socket
    ///
    /// Fails only at startup; a refused bind is fatal to the process.
    pub fn bind(config: &CommandConfig) -> Result<Self, CommandError> {
        let socket = UdpSocket::bind(("0.0.0.0", config.port)).map_err(|source| {
            CommandError::Bind {
                port: config.port,
                source,
            }
        })?;
        socket
            .set_nonblocking(true)
            .map_err(CommandError::Configure)?;

        Ok(Self {
            socket,
            clamp_setpoints: config.clamp_setpoints,
        })
    }

    /// Local address of the bound socket
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Read at most one pending datagram without blocking
    ///
    /// Returns the parsed setpoint, or `None` when no datagram is pending
    /// or the payload is malformed. Malformed payloads are discarded
    /// silently; receive errors other than "would block" are logged and
    /// skipped.
    pub fn poll(&mut self) -> Option<Setpoint> {
        let mut buf = [0u8; MAX_DATAGRAM];

        match self.socket.recv_from(&mut buf) {
            Ok((len, _peer)) => {
                let text = std::str::from_utf8(&buf[..len]).ok()?;
                let setpoint = parse_setpoint(text)?;
                if self.clamp_setpoints {
                    Some(setpoint.clamped())
                } else {
                    Some(setpoint)
                }
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => None,
            Err(e) => {
                log::warn!("command receive error: {}", e);
                None
            }
        }
    }
}
