//! Simulation adapters for running the node on a host.
//!
//! These back all four hardware ports with in-memory stand-ins: a seeded
//! jitter source for the analog channels, a loopback radio fed through
//! the same SPSC handoff an interrupt build uses, a scriptable console
//! UART, and level-recording actuators. Deterministic given the seed, so
//! scenario runs are reproducible.

use std::collections::VecDeque;

use embedded_hal::digital::PinState;
use log::{debug, info};
use rand_core::{RngCore, SeedableRng};
use rand_wyrand::WyRand;

use crate::app::ports::{ActuatorPort, HostLinkPort, RadioPort, SensorPort};
use crate::radio::rx::{self, RxConsumer, RxProducer, RxQueue};

/// Nominal mains voltage the simulated feed hovers around.
const VOLTAGE_BASE: f32 = 223.11;
/// Nominal interior temperature.
const TEMPERATURE_BASE: f32 = 23.11;
/// Nominal generator branch current.
const CURRENT_BASE: f32 = 0.58;
/// Nominal fuel level, litres.
const GAS_BASE: f32 = 121.30;
/// Jitter span in hundredths for the wide analog channels.
const JITTER_HUNDREDTHS: u32 = 300;
/// Jitter span for the current clamp; its full scale is a few amperes.
const CURRENT_JITTER_HUNDREDTHS: u32 = 12;

// ───────────────────────────────────────────────────────────────
// Sensors
// ───────────────────────────────────────────────────────────────

/// Jittered analog channels plus settable digital inputs.
pub struct SimSensors {
    rng: WyRand,
    door_open: bool,
    emergency: bool,
}

impl SimSensors {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: WyRand::seed_from_u64(seed),
            door_open: false,
            emergency: false,
        }
    }

    /// Script hook: open or close the door contact.
    pub fn set_door_open(&mut self, open: bool) {
        self.door_open = open;
    }

    /// Script hook: press or release the emergency button.
    pub fn set_emergency(&mut self, active: bool) {
        self.emergency = active;
    }

    fn jitter(&mut self, span_hundredths: u32) -> f32 {
        (self.rng.next_u32() % span_hundredths) as f32 / 100.0
    }
}

impl SensorPort for SimSensors {
    fn read_voltage(&mut self) -> f32 {
        VOLTAGE_BASE + self.jitter(JITTER_HUNDREDTHS)
    }

    fn read_temperature(&mut self) -> f32 {
        TEMPERATURE_BASE + self.jitter(JITTER_HUNDREDTHS)
    }

    fn read_current(&mut self) -> f32 {
        CURRENT_BASE + self.jitter(CURRENT_JITTER_HUNDREDTHS)
    }

    fn read_gas_level(&mut self) -> f32 {
        GAS_BASE + self.jitter(JITTER_HUNDREDTHS)
    }

    fn read_door_state(&mut self) -> bool {
        self.door_open
    }

    fn read_emergency_button(&mut self) -> bool {
        self.emergency
    }
}

// ───────────────────────────────────────────────────────────────
// Radio
// ───────────────────────────────────────────────────────────────

/// Loopback radio. Downlinks injected by the script travel through the
/// same SPSC byte handoff the interrupt build uses, so delivery
/// boundaries and overflow drops behave identically.
pub struct SimRadio {
    ingress: RxProducer<'static>,
    egress: RxConsumer<'static>,
    sent: Vec<Vec<u8>>,
}

impl SimRadio {
    pub fn new() -> Self {
        // Leaked once at bring-up, mirroring the static queue an
        // interrupt build places in .bss.
        let queue: &'static mut RxQueue = Box::leak(Box::new(RxQueue::new()));
        let (ingress, egress) = rx::split(queue);
        Self {
            ingress,
            egress,
            sent: Vec::new(),
        }
    }

    /// Inject one downlink the way the receive interrupt would.
    pub fn deliver(&mut self, frame: &[u8]) -> bool {
        self.ingress.deliver(frame)
    }

    /// Every frame the node has transmitted, oldest first.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    pub fn dropped_deliveries(&self) -> u32 {
        self.ingress.dropped_deliveries()
    }
}

impl Default for SimRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioPort for SimRadio {
    fn send(&mut self, frame: &[u8]) {
        debug!("SIM | radio TX {} bytes", frame.len());
        self.sent.push(frame.to_vec());
    }

    fn receive_byte(&mut self) -> Option<u8> {
        self.egress.poll()
    }
}

// ───────────────────────────────────────────────────────────────
// Host console
// ───────────────────────────────────────────────────────────────

/// Scriptable console UART; report lines go to the log and a recording.
#[derive(Default)]
pub struct SimHost {
    inbound: VecDeque<u8>,
    reports: Vec<String>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one inbound line, terminator included.
    pub fn push_line(&mut self, line: &str) {
        self.inbound.extend(line.as_bytes());
        self.inbound.push_back(b'\n');
    }

    /// Every report line the node has emitted, oldest first.
    pub fn reports(&self) -> &[String] {
        &self.reports
    }
}

impl HostLinkPort for SimHost {
    fn read_byte(&mut self) -> Option<u8> {
        self.inbound.pop_front()
    }

    fn send_line(&mut self, line: &str) {
        info!("REPORT | {line}");
        self.reports.push(line.to_string());
    }
}

// ───────────────────────────────────────────────────────────────
// Actuators
// ───────────────────────────────────────────────────────────────

/// Records the relay level and every buzzer edge.
#[derive(Debug, Default)]
pub struct SimActuators {
    relay: Option<PinState>,
    buzzer_edges: Vec<PinState>,
}

impl SimActuators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded relay level, if any.
    pub fn relay(&self) -> Option<PinState> {
        self.relay
    }

    pub fn buzzer_edges(&self) -> &[PinState] {
        &self.buzzer_edges
    }
}

impl ActuatorPort for SimActuators {
    fn drive_relay(&mut self, level: PinState) {
        if self.relay != Some(level) {
            debug!("SIM | relay -> {level:?}");
        }
        self.relay = Some(level);
    }

    fn drive_buzzer(&mut self, level: PinState) {
        debug!("SIM | buzzer -> {level:?}");
        self.buzzer_edges.push(level);
    }
}

// ───────────────────────────────────────────────────────────────
// Composite
// ───────────────────────────────────────────────────────────────

/// All four ports in one value, matching the service's `hw` parameter.
pub struct SimHw {
    pub sensors: SimSensors,
    pub radio: SimRadio,
    pub host: SimHost,
    pub actuators: SimActuators,
}

impl SimHw {
    pub fn new(seed: u64) -> Self {
        Self {
            sensors: SimSensors::new(seed),
            radio: SimRadio::new(),
            host: SimHost::new(),
            actuators: SimActuators::new(),
        }
    }
}

impl SensorPort for SimHw {
    fn read_voltage(&mut self) -> f32 {
        self.sensors.read_voltage()
    }
    fn read_temperature(&mut self) -> f32 {
        self.sensors.read_temperature()
    }
    fn read_current(&mut self) -> f32 {
        self.sensors.read_current()
    }
    fn read_gas_level(&mut self) -> f32 {
        self.sensors.read_gas_level()
    }
    fn read_door_state(&mut self) -> bool {
        self.sensors.read_door_state()
    }
    fn read_emergency_button(&mut self) -> bool {
        self.sensors.read_emergency_button()
    }
}

impl ActuatorPort for SimHw {
    fn drive_relay(&mut self, level: PinState) {
        self.actuators.drive_relay(level);
    }
    fn drive_buzzer(&mut self, level: PinState) {
        self.actuators.drive_buzzer(level);
    }
}

impl RadioPort for SimHw {
    fn send(&mut self, frame: &[u8]) {
        self.radio.send(frame);
    }
    fn receive_byte(&mut self) -> Option<u8> {
        self.radio.receive_byte()
    }
}

impl HostLinkPort for SimHw {
    fn read_byte(&mut self) -> Option<u8> {
        self.host.read_byte()
    }
    fn send_line(&mut self, line: &str) {
        self.host.send_line(line);
    }
}
