//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements                     | Connects to            |
//! |------------|--------------------------------|------------------------|
//! | `sim`      | SensorPort, ActuatorPort,      | Seeded jitter source,  |
//! |            | RadioPort, HostLinkPort        | in-memory radio/UART   |
//! | `log_sink` | EventSink                      | Serial log output      |
//!
//! The hardware build swaps `sim` for GPIO/LoRa/UART adapters behind the
//! same traits; the control core in [`crate::app`] does not change.

pub mod log_sink;
pub mod sim;
