//! Role payload grammars for the uplink body.
//!
//! A node's role fixes its body grammar at compile time: the cabin node
//! reports mains voltage, interior temperature, and an operator status
//! letter; the exterior node reports generator current and a fuel-tank
//! ratio. Both grammars format scalar means with exactly two decimals.
//! The framer and router never look inside a body, so everything
//! role-specific lives here.

use core::fmt;

/// Operator status token relayed from the host link.
///
/// The wire letters are the protocol; the node treats them as opaque and
/// only ever substitutes `F` while the emergency input is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    S,
    L,
    #[default]
    F,
}

impl StatusCode {
    pub fn from_char(token: char) -> Option<Self> {
        match token {
            'S' => Some(Self::S),
            'L' => Some(Self::L),
            'F' => Some(Self::F),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::S => 'S',
            Self::L => 'L',
            Self::F => 'F',
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::S => "S",
            Self::L => "L",
            Self::F => "F",
        })
    }
}

/// One transmit cycle's reduced readings, cabin role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CabinReadings {
    pub voltage: f32,
    pub temperature: f32,
    pub status: StatusCode,
    pub emergency: bool,
}

/// One transmit cycle's reduced readings, exterior role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExteriorReadings {
    pub current: f32,
    pub gas: f32,
    pub capacity: u32,
}

/// Compile-time role selection for the uplink body.
pub trait UplinkGrammar {
    type Readings;

    fn compose_body(readings: &Self::Readings, out: &mut impl fmt::Write) -> fmt::Result;
}

/// `voltage={:.2}&temperature={:.2}&status={S|L|F}`
pub struct CabinGrammar;

impl UplinkGrammar for CabinGrammar {
    type Readings = CabinReadings;

    fn compose_body(readings: &CabinReadings, out: &mut impl fmt::Write) -> fmt::Result {
        // An active emergency overrides whatever the host last submitted.
        let status = if readings.emergency {
            StatusCode::F
        } else {
            readings.status
        };
        write!(
            out,
            "voltage={:.2}&temperature={:.2}&status={}",
            readings.voltage, readings.temperature, status
        )
    }
}

/// `current={:.2}&gas={:.2}/{capacity}`
pub struct ExteriorGrammar;

impl UplinkGrammar for ExteriorGrammar {
    type Readings = ExteriorReadings;

    fn compose_body(readings: &ExteriorReadings, out: &mut impl fmt::Write) -> fmt::Result {
        write!(
            out,
            "current={:.2}&gas={:.2}/{}",
            readings.current, readings.gas, readings.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cabin(readings: &CabinReadings) -> String {
        let mut out = String::new();
        CabinGrammar::compose_body(readings, &mut out).unwrap();
        out
    }

    #[test]
    fn cabin_body_formats_two_decimals() {
        let body = cabin(&CabinReadings {
            voltage: 225.0,
            temperature: 24.5,
            status: StatusCode::S,
            emergency: false,
        });
        assert_eq!(body, "voltage=225.00&temperature=24.50&status=S");
    }

    #[test]
    fn emergency_forces_fault_status() {
        let body = cabin(&CabinReadings {
            voltage: 225.0,
            temperature: 24.5,
            status: StatusCode::S,
            emergency: true,
        });
        assert_eq!(body, "voltage=225.00&temperature=24.50&status=F");
    }

    #[test]
    fn exterior_body_carries_capacity_denominator() {
        let mut out = String::new();
        ExteriorGrammar::compose_body(
            &ExteriorReadings {
                current: (0.6f32 + 0.7) / 2.0,
                gas: (120.0f32 + 127.02) / 2.0,
                capacity: 150,
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(out, "current=0.65&gas=123.51/150");
    }

    #[test]
    fn status_round_trips_through_wire_letter() {
        for code in [StatusCode::S, StatusCode::L, StatusCode::F] {
            assert_eq!(StatusCode::from_char(code.as_char()), Some(code));
        }
        assert_eq!(StatusCode::from_char('X'), None);
        assert_eq!(StatusCode::default(), StatusCode::F);
    }
}
