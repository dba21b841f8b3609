//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured node events to the
//! logger (UART in production, stderr under simulation). A base-station
//! uplink adapter would implement the same trait.

use log::info;

use crate::app::events::NodeEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`NodeEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: NodeEvent) {
        match event {
            NodeEvent::Started { device_id } => {
                info!("EVENT | started, device={device_id}");
            }
            NodeEvent::UplinkSent { priority } => {
                info!(
                    "EVENT | uplink sent ({})",
                    if priority { "priority" } else { "telemetry" }
                );
            }
            NodeEvent::CommandApplied(cmd) => {
                info!("EVENT | command applied: {cmd:?}");
            }
            NodeEvent::PeerUpdated(peer) => {
                info!(
                    "EVENT | peer telemetry current={:.2}A gas={:.2}L",
                    peer.current, peer.gas
                );
            }
            NodeEvent::StatusSubmitted(code) => {
                info!("EVENT | status submitted: {code}");
            }
            NodeEvent::PriorityStaged => {
                info!("EVENT | military message staged");
            }
            NodeEvent::AlertStarted { pulses } => {
                info!("EVENT | alert started, {pulses} pulses");
            }
            NodeEvent::DayNightChanged { day_time } => {
                info!(
                    "EVENT | {}",
                    if day_time { "daytime declared" } else { "nightfall declared" }
                );
            }
            NodeEvent::DoorChanged { open } => {
                info!("EVENT | door {}", if open { "open" } else { "closed" });
            }
            NodeEvent::EmergencyChanged { active } => {
                info!(
                    "EVENT | emergency {}",
                    if active { "ACTIVE" } else { "cleared" }
                );
            }
        }
    }
}
