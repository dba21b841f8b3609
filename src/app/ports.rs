//! Port traits: the boundary between node logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (GPIO, the LoRa radio, the host UART, event sinks)
//! implement these traits. The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the control core never touches hardware
//! directly and runs unchanged under simulation.

use embedded_hal::digital::PinState;

use super::events::NodeEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: raw analog and digital inputs.
///
/// Reads are instantaneous samples; smoothing happens in the domain's
/// sample windows, not here. A telemetry role samples only the channels
/// it reports, so a board without some channel returns its resting
/// value.
pub trait SensorPort {
    /// Mains voltage at the cabin feed, volts.
    fn read_voltage(&mut self) -> f32;

    /// Interior temperature, degrees Celsius.
    fn read_temperature(&mut self) -> f32;

    /// Generator branch current through the clamp, amperes.
    fn read_current(&mut self) -> f32;

    /// Fuel tank level, litres.
    fn read_gas_level(&mut self) -> f32;

    /// Door contact: `true` while the door is open.
    fn read_door_state(&mut self) -> bool;

    /// Emergency button: `true` while pressed or latched.
    fn read_emergency_button(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the two outputs the node drives.
///
/// Levels are electrical, not logical; polarity is already resolved by
/// the domain (see [`LightingResolver`](crate::lights::LightingResolver)).
pub trait ActuatorPort {
    /// Drive the light relay coil.
    fn drive_relay(&mut self, level: PinState);

    /// Drive the alert buzzer.
    fn drive_buzzer(&mut self, level: PinState);
}

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: domain ↔ LoRa modem)
// ───────────────────────────────────────────────────────────────

/// Packet radio access.
///
/// Receive is packetized: the driver exposes one complete delivery's
/// bytes in order, and returns `None` after one or more bytes to mark the
/// end of that delivery. A `None` with nothing buffered simply means no
/// traffic. Drivers must never interleave bytes of two deliveries.
pub trait RadioPort {
    /// Transmit one complete frame.
    fn send(&mut self, frame: &[u8]);

    /// Next byte of the delivery in progress, or `None` at a boundary.
    fn receive_byte(&mut self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Host link port (driven adapter: domain ↔ attendant console)
// ───────────────────────────────────────────────────────────────

/// Line-oriented serial link to the host console.
pub trait HostLinkPort {
    /// Next raw byte from the host, or `None` when the UART is drained.
    fn read_byte(&mut self) -> Option<u8>;

    /// Emit one report line (no terminator included).
    fn send_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`NodeEvent`]s through this port.
/// Adapters decide where they go (serial log, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: NodeEvent);
}
