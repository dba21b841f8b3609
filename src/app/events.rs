//! Outbound node events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them: log to serial, or record in a
//! test harness.

use crate::app::commands::NodeCommand;
use crate::radio::grammar::StatusCode;
use crate::radio::telemetry::PeerTelemetry;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeEvent {
    /// The service completed bring-up.
    Started { device_id: u32 },

    /// One uplink frame left the radio.
    UplinkSent { priority: bool },

    /// A downlink command matched the table and was applied.
    CommandApplied(NodeCommand),

    /// The exterior peer's telemetry buffer was updated.
    PeerUpdated(PeerTelemetry),

    /// The host submitted a new status letter.
    StatusSubmitted(StatusCode),

    /// A military message was staged for the next uplink.
    PriorityStaged,

    /// The alert sequencer left idle.
    AlertStarted { pulses: u16 },

    /// Daylight flag edge, from a downlink command.
    DayNightChanged { day_time: bool },

    /// Door contact edge.
    DoorChanged { open: bool },

    /// Emergency input edge.
    EmergencyChanged { active: bool },
}
