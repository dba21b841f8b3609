//! Shared node state, passed by reference to each component call.
//!
//! One writer per field, enforced by convention and documented here,
//! which is what makes the lock-free single-context model of the service
//! sound. The staged priority payload is kept private so its one-shot
//! discipline can only go through [`NodeFlags::stage_priority`] and
//! [`NodeFlags::take_priority`].

use log::warn;

use crate::config::HOST_LINE_MAX;
use crate::radio::grammar::StatusCode;

/// Staged priority payload, bounded by the host line size.
pub type PriorityPayload = heapless::String<HOST_LINE_MAX>;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeFlags {
    /// Daylight flag. Writer: the command dispatcher (`daytime`/`nighttime`).
    pub day_time: bool,
    /// Door contact state. Writer: the per-cycle sensor scan.
    pub door_open: bool,
    /// Emergency input state. Writer: the per-cycle sensor scan.
    pub emergency_active: bool,
    /// Status letter for the next uplink. Writer: the host line handler.
    pub status: StatusCode,
    /// One-shot payload that preempts the next telemetry body.
    /// Writer: the host line handler; consumed by the transmit path.
    priority: Option<PriorityPayload>,
}

impl NodeFlags {
    pub const fn new() -> Self {
        Self {
            day_time: true,
            door_open: false,
            emergency_active: false,
            status: StatusCode::F,
            priority: None,
        }
    }

    /// Stage a payload for the next transmit cycle.
    ///
    /// A payload staged before the previous one went out replaces it; the
    /// node forwards the latest message, it does not queue history.
    /// Returns `false` (nothing staged) if the text exceeds the bound.
    pub fn stage_priority(&mut self, text: &str) -> bool {
        match PriorityPayload::try_from(text) {
            Ok(payload) => {
                self.priority = Some(payload);
                true
            }
            Err(()) => {
                warn!("HOST | priority payload over {HOST_LINE_MAX} bytes refused");
                false
            }
        }
    }

    /// Consume the staged payload, clearing the one-shot flag.
    pub fn take_priority(&mut self) -> Option<PriorityPayload> {
        self.priority.take()
    }

    pub fn has_priority(&self) -> bool {
        self.priority.is_some()
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_defaults_match_power_on_state() {
        let flags = NodeFlags::new();
        assert!(flags.day_time);
        assert!(!flags.door_open);
        assert!(!flags.emergency_active);
        assert_eq!(flags.status, StatusCode::F);
        assert!(!flags.has_priority());
    }

    #[test]
    fn priority_is_one_shot() {
        let mut flags = NodeFlags::new();
        assert!(flags.stage_priority("nro_mm=17&texto=relevo"));
        assert!(flags.has_priority());
        assert_eq!(
            flags.take_priority().as_deref(),
            Some("nro_mm=17&texto=relevo")
        );
        assert!(!flags.has_priority());
        assert_eq!(flags.take_priority(), None);
    }

    #[test]
    fn restaging_replaces_not_queues() {
        let mut flags = NodeFlags::new();
        flags.stage_priority("nro_mm=1");
        flags.stage_priority("nro_mm=2");
        assert_eq!(flags.take_priority().as_deref(), Some("nro_mm=2"));
        assert_eq!(flags.take_priority(), None);
    }

    #[test]
    fn overlong_payload_is_refused_whole() {
        let mut flags = NodeFlags::new();
        let long = "m".repeat(HOST_LINE_MAX + 1);
        assert!(!flags.stage_priority(&long));
        assert!(!flags.has_priority());
    }
}
