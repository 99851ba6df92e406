//! Token coercers: one text token in, an optional typed value out.
//!
//! These never fail. A malformed or empty token is simply absent; whether that
//! deserves a log line is up to the caller.

use crate::types::GeoPosition;

/// Parse a 16-bit signed integer (squawk, vertical rate, subtype).
pub fn as_short(token: &str) -> Option<i16> {
    token.parse().ok()
}

/// Parse a single-precision float (altitude, ground speed, track).
pub fn as_float(token: &str) -> Option<f32> {
    token.parse().ok()
}

/// Parse a flag. The feed encodes flags as integers: zero is false, anything
/// else (dump1090 emits `-1`) is true.
pub fn as_boolean(token: &str) -> Option<bool> {
    token.parse::<i32>().ok().map(|v| v != 0)
}

/// Parse a WGS84 position. Both coordinates must parse, there is no partial
/// position.
pub fn as_position(lon: &str, lat: &str) -> Option<GeoPosition> {
    let lon: f64 = lon.parse().ok()?;
    let lat: f64 = lat.parse().ok()?;
    Some(GeoPosition::wgs84(lon, lat))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
