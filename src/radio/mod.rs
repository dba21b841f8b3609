//! LoRa-side wire handling: framing, role payload grammars, inbound
//! routing, and the receive-path byte plumbing.

pub mod frame;
pub mod grammar;
pub mod router;
pub mod rx;
pub mod telemetry;
