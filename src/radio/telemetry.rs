//! Peer telemetry extracted from exterior-node uplinks.
//!
//! The exterior node's body is an ampersand-joined `key=value` list. The
//! cabin cares about two fields: the `current=` value and the numerator
//! of the first ratio-shaped value (`gas=123.51/150`). Extraction is
//! all-or-nothing: a payload missing either field, or carrying an
//! unparsable value, leaves the stored telemetry untouched.

/// Last good readings relayed by the exterior node. Zero until the first
/// well-formed uplink arrives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeerTelemetry {
    /// Generator current draw, amperes.
    pub current: f32,
    /// Fuel-tank ratio numerator, litres.
    pub gas: f32,
}

/// Extract both fields, or nothing.
pub fn parse_exterior(payload: &str) -> Option<PeerTelemetry> {
    let mut current: Option<f32> = None;
    let mut gas: Option<f32> = None;

    for field in payload.split('&') {
        let (key, value) = field.split_once('=').unwrap_or(("", field));
        if key == "current" {
            if current.is_none() {
                // First occurrence decides; a bad value rejects the payload.
                current = Some(value.parse().ok()?);
            }
        } else if gas.is_none() {
            if let Some((numerator, _denominator)) = value.split_once('/') {
                gas = Some(numerator.parse().ok()?);
            }
        }
        if current.is_some() && gas.is_some() {
            break;
        }
    }

    Some(PeerTelemetry {
        current: current?,
        gas: gas?,
    })
}
