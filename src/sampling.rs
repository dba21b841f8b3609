//! Sensor sample windows and the telemetry role seam.
//!
//! Raw analog reads are noisy, so each measured quantity accumulates into
//! a bounded window between transmits and the uplink carries the window
//! mean. A full window silently drops further samples; scheduling keeps
//! one transmit cycle's worth of samples inside the bound, so overflow
//! here means the intervals are misconfigured, not that data is at risk.

use core::fmt;

use log::warn;

use crate::app::ports::SensorPort;
use crate::config::SAMPLE_WINDOW_CAPACITY;
use crate::radio::grammar::{
    CabinGrammar, CabinReadings, ExteriorGrammar, ExteriorReadings, StatusCode, UplinkGrammar,
};
use crate::radio::telemetry::PeerTelemetry;

/// Bounded mean-aggregator for one measured quantity.
#[derive(Debug, Default)]
pub struct SampleWindow<const N: usize> {
    samples: heapless::Vec<f32, N>,
    overflowed: bool,
}

impl<const N: usize> SampleWindow<N> {
    pub const fn new() -> Self {
        Self {
            samples: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Append one sample; a full window drops it silently.
    pub fn record(&mut self, value: f32) {
        if self.samples.push(value).is_err() && !self.overflowed {
            // Latched so a misconfigured interval warns once per cycle.
            self.overflowed = true;
            warn!("SAMPLE | window full, further samples dropped this cycle");
        }
    }

    /// Arithmetic mean of the window; an empty window reduces to `0.0`.
    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.overflowed = false;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Compile-time node role: what gets sampled each tick and how the
/// accumulated readings turn into wire and report text.
pub trait TelemetryRole {
    /// Take one sample of every quantity this role measures.
    fn sample(&mut self, sensors: &mut impl SensorPort);

    /// Compose the uplink body from the current window means.
    fn compose_body(
        &self,
        status: StatusCode,
        emergency: bool,
        out: &mut impl fmt::Write,
    ) -> fmt::Result;

    /// Compose the per-cycle host report line.
    fn compose_report(
        &self,
        emergency: bool,
        peer: PeerTelemetry,
        out: &mut impl fmt::Write,
    ) -> fmt::Result;

    /// Clear all windows after a successful transmit.
    fn reset(&mut self);
}

/// Cabin role: mains voltage and interior temperature.
#[derive(Debug, Default)]
pub struct CabinTelemetry {
    voltage: SampleWindow<SAMPLE_WINDOW_CAPACITY>,
    temperature: SampleWindow<SAMPLE_WINDOW_CAPACITY>,
}

impl CabinTelemetry {
    pub const fn new() -> Self {
        Self {
            voltage: SampleWindow::new(),
            temperature: SampleWindow::new(),
        }
    }

    pub fn samples_buffered(&self) -> usize {
        self.voltage.len()
    }
}

impl TelemetryRole for CabinTelemetry {
    fn sample(&mut self, sensors: &mut impl SensorPort) {
        self.voltage.record(sensors.read_voltage());
        self.temperature.record(sensors.read_temperature());
    }

    fn compose_body(
        &self,
        status: StatusCode,
        emergency: bool,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let readings = CabinReadings {
            voltage: self.voltage.mean(),
            temperature: self.temperature.mean(),
            status,
            emergency,
        };
        CabinGrammar::compose_body(&readings, out)
    }

    fn compose_report(
        &self,
        emergency: bool,
        peer: PeerTelemetry,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        write!(
            out,
            "voltage={:.2}, temperature={:.2}, emergency={}, current={:.2}, gas={:.2}",
            self.voltage.mean(),
            self.temperature.mean(),
            u8::from(emergency),
            peer.current,
            peer.gas
        )
    }

    fn reset(&mut self) {
        self.voltage.reset();
        self.temperature.reset();
    }
}

/// Exterior role: generator branch current and fuel-tank level.
///
/// The exterior payload carries no status letter, and door, emergency,
/// and the peer buffer are cabin hardware, so the report mirrors the
/// uplink quantities.
#[derive(Debug)]
pub struct ExteriorTelemetry {
    current: SampleWindow<SAMPLE_WINDOW_CAPACITY>,
    gas: SampleWindow<SAMPLE_WINDOW_CAPACITY>,
    tank_capacity: u32,
}

impl ExteriorTelemetry {
    pub const fn new(tank_capacity: u32) -> Self {
        Self {
            current: SampleWindow::new(),
            gas: SampleWindow::new(),
            tank_capacity,
        }
    }

    pub fn samples_buffered(&self) -> usize {
        self.current.len()
    }
}

impl TelemetryRole for ExteriorTelemetry {
    fn sample(&mut self, sensors: &mut impl SensorPort) {
        self.current.record(sensors.read_current());
        self.gas.record(sensors.read_gas_level());
    }

    fn compose_body(
        &self,
        _status: StatusCode,
        _emergency: bool,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let readings = ExteriorReadings {
            current: self.current.mean(),
            gas: self.gas.mean(),
            capacity: self.tank_capacity,
        };
        ExteriorGrammar::compose_body(&readings, out)
    }

    fn compose_report(
        &self,
        _emergency: bool,
        _peer: PeerTelemetry,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        write!(
            out,
            "current={:.2}, gas={:.2}",
            self.current.mean(),
            self.gas.mean()
        )
    }

    fn reset(&mut self) {
        self.current.reset();
        self.gas.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FixedSensors {
        voltage: f32,
        temperature: f32,
        current: f32,
        gas: f32,
    }

    impl SensorPort for FixedSensors {
        fn read_voltage(&mut self) -> f32 {
            self.voltage
        }
        fn read_temperature(&mut self) -> f32 {
            self.temperature
        }
        fn read_current(&mut self) -> f32 {
            self.current
        }
        fn read_gas_level(&mut self) -> f32 {
            self.gas
        }
        fn read_door_state(&mut self) -> bool {
            false
        }
        fn read_emergency_button(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn mean_of_two_samples() {
        let mut window: SampleWindow<8> = SampleWindow::new();
        window.record(220.0);
        window.record(230.0);
        assert_eq!(window.mean(), 225.0);
    }

    #[test]
    fn empty_window_reduces_to_zero() {
        let window: SampleWindow<8> = SampleWindow::new();
        assert_eq!(window.mean(), 0.0);
    }

    #[test]
    fn full_window_drops_silently() {
        let mut window: SampleWindow<2> = SampleWindow::new();
        window.record(1.0);
        window.record(3.0);
        window.record(100.0);
        assert_eq!(window.len(), 2);
        assert_eq!(window.mean(), 2.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut window: SampleWindow<4> = SampleWindow::new();
        window.record(5.0);
        window.reset();
        assert!(window.is_empty());
        window.reset();
        assert!(window.is_empty());
        assert_eq!(window.mean(), 0.0);
    }

    #[test]
    fn cabin_role_composes_wire_body() {
        let mut telemetry = CabinTelemetry::new();
        let mut sensors = FixedSensors {
            voltage: 220.0,
            temperature: 24.0,
            ..FixedSensors::default()
        };
        telemetry.sample(&mut sensors);
        sensors.voltage = 230.0;
        sensors.temperature = 25.0;
        telemetry.sample(&mut sensors);

        let mut body = String::new();
        telemetry
            .compose_body(StatusCode::S, false, &mut body)
            .unwrap();
        assert_eq!(body, "voltage=225.00&temperature=24.50&status=S");
    }

    #[test]
    fn cabin_report_line_layout() {
        let mut telemetry = CabinTelemetry::new();
        let mut sensors = FixedSensors {
            voltage: 225.0,
            temperature: 24.5,
            ..FixedSensors::default()
        };
        telemetry.sample(&mut sensors);

        let mut line = String::new();
        telemetry
            .compose_report(
                false,
                PeerTelemetry {
                    current: 0.65,
                    gas: 123.51,
                },
                &mut line,
            )
            .unwrap();
        assert_eq!(
            line,
            "voltage=225.00, temperature=24.50, emergency=0, current=0.65, gas=123.51"
        );
    }

    #[test]
    fn report_flags_active_emergency() {
        let telemetry = CabinTelemetry::new();
        let mut line = String::new();
        telemetry
            .compose_report(true, PeerTelemetry::default(), &mut line)
            .unwrap();
        assert_eq!(
            line,
            "voltage=0.00, temperature=0.00, emergency=1, current=0.00, gas=0.00"
        );
    }

    #[test]
    fn reset_clears_both_windows() {
        let mut telemetry = CabinTelemetry::new();
        let mut sensors = FixedSensors {
            voltage: 220.0,
            temperature: 24.0,
            ..FixedSensors::default()
        };
        telemetry.sample(&mut sensors);
        assert_eq!(telemetry.samples_buffered(), 1);
        telemetry.reset();
        assert_eq!(telemetry.samples_buffered(), 0);

        let mut body = String::new();
        telemetry
            .compose_body(StatusCode::S, false, &mut body)
            .unwrap();
        assert_eq!(body, "voltage=0.00&temperature=0.00&status=S");
    }

    #[test]
    fn exterior_role_composes_wire_body() {
        let mut telemetry = ExteriorTelemetry::new(150);
        let mut sensors = FixedSensors {
            current: 0.6,
            gas: 120.0,
            ..FixedSensors::default()
        };
        telemetry.sample(&mut sensors);
        sensors.current = 0.7;
        sensors.gas = 127.02;
        telemetry.sample(&mut sensors);

        let mut body = String::new();
        telemetry
            .compose_body(StatusCode::S, false, &mut body)
            .unwrap();
        assert_eq!(body, "current=0.65&gas=123.51/150");
    }

    #[test]
    fn exterior_body_ignores_status_and_emergency() {
        let telemetry = ExteriorTelemetry::new(150);
        let mut body = String::new();
        telemetry
            .compose_body(StatusCode::L, true, &mut body)
            .unwrap();
        assert_eq!(body, "current=0.00&gas=0.00/150");
    }

    #[test]
    fn exterior_report_mirrors_uplink_quantities() {
        let mut telemetry = ExteriorTelemetry::new(150);
        let mut sensors = FixedSensors {
            current: 0.65,
            gas: 123.51,
            ..FixedSensors::default()
        };
        telemetry.sample(&mut sensors);

        let mut line = String::new();
        telemetry
            .compose_report(false, PeerTelemetry::default(), &mut line)
            .unwrap();
        assert_eq!(line, "current=0.65, gas=123.51");
    }

    #[test]
    fn exterior_reset_clears_both_windows() {
        let mut telemetry = ExteriorTelemetry::new(150);
        let mut sensors = FixedSensors {
            current: 0.6,
            gas: 120.0,
            ..FixedSensors::default()
        };
        telemetry.sample(&mut sensors);
        assert_eq!(telemetry.samples_buffered(), 1);
        telemetry.reset();
        assert_eq!(telemetry.samples_buffered(), 0);
    }
}
