//! Altitude target integration
//!
//! Operator throttle is a commanded vertical velocity [m/s]: zero holds the
//! current target, negative descends. The target is clamped to a safe
//! envelope; while the clamp engages, further throttle of the same sign is
//! silently absorbed.

use crate::config::AltitudeEnvelope;

/// Integrate throttle into the altitude target across one tick
///
/// # Arguments
/// * `target` - Current altitude target [m]
/// * `throttle` - Commanded vertical velocity [m/s]
/// * `dt` - Elapsed tick period [s]
/// * `envelope` - Safe altitude envelope
///
/// # Returns
/// The new, clamped altitude target [m]
pub fn integrate_target(target: f64, throttle: f64, dt: f64, envelope: &AltitudeEnvelope) -> f64 {
    (target + throttle * dt).clamp(envelope.min_m, envelope.max_m)
}
