//! Inbound frame routing by receiver id.
//!
//! Evaluation order is fixed: a frame addressed to this node or to the
//! zone broadcast id becomes command input; a frame from the exterior
//! peer id is mined for telemetry; anything else is dropped. The router
//! owns the peer telemetry buffer so a malformed exterior payload can
//! never half-update it.

use log::debug;

use crate::config::NodeConfig;
use crate::radio::frame::InboundFrame;
use crate::radio::telemetry::{self, PeerTelemetry};

/// Where a completed frame went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Routed<'a> {
    /// Addressed to us (directly or by broadcast); payload is command input.
    Command(&'a str),
    /// Exterior uplink accepted; the buffer now holds these readings.
    PeerUpdated(PeerTelemetry),
    /// Wrong recipient or malformed peer payload; no state changed.
    Discarded,
}

#[derive(Debug)]
pub struct Router {
    device_id: u32,
    broadcast_id: u32,
    exterior_peer_id: u32,
    peer: PeerTelemetry,
}

impl Router {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            device_id: config.device_id,
            broadcast_id: config.broadcast_id(),
            exterior_peer_id: config.exterior_peer_id(),
            peer: PeerTelemetry::default(),
        }
    }

    pub fn route<'a>(&mut self, frame: InboundFrame<'a>) -> Routed<'a> {
        if frame.receiver_id == self.device_id || frame.receiver_id == self.broadcast_id {
            return Routed::Command(frame.payload);
        }
        if frame.receiver_id == self.exterior_peer_id {
            return match telemetry::parse_exterior(frame.payload) {
                Some(peer) => {
                    self.peer = peer;
                    debug!(
                        "RX | peer telemetry current={:.2} gas={:.2}",
                        peer.current, peer.gas
                    );
                    Routed::PeerUpdated(peer)
                }
                None => {
                    debug!("RX | malformed peer telemetry dropped");
                    Routed::Discarded
                }
            };
        }
        debug!("RX | frame for {} ignored", frame.receiver_id);
        Routed::Discarded
    }

    /// Last accepted exterior readings.
    pub fn peer(&self) -> PeerTelemetry {
        self.peer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::frame::parse_inbound;

    fn router() -> Router {
        Router::new(&NodeConfig::default())
    }

    fn route<'a>(r: &mut Router, raw: &'a [u8]) -> Routed<'a> {
        r.route(parse_inbound(raw).unwrap())
    }

    #[test]
    fn own_id_yields_command_input() {
        let mut r = router();
        assert_eq!(route(&mut r, b"<10009>startAlert"), Routed::Command("startAlert"));
    }

    #[test]
    fn broadcast_id_yields_command_input() {
        let mut r = router();
        assert_eq!(route(&mut r, b"<19999>daytime"), Routed::Command("daytime"));
    }

    #[test]
    fn exterior_uplink_updates_peer_buffer() {
        let mut r = router();
        let routed = route(&mut r, b"<20009>current=0.65&raindrops=1&gas=123.51/150");
        assert_eq!(
            routed,
            Routed::PeerUpdated(PeerTelemetry {
                current: 0.65,
                gas: 123.51
            })
        );
        assert_eq!(r.peer().current, 0.65);
        assert_eq!(r.peer().gas, 123.51);
    }

    #[test]
    fn malformed_exterior_leaves_buffer_unchanged() {
        let mut r = router();
        route(&mut r, b"<20009>current=0.65&gas=123.51/150");
        let before = r.peer();
        assert_eq!(route(&mut r, b"<20009>current=zz&gas=1/150"), Routed::Discarded);
        assert_eq!(route(&mut r, b"<20009>gas=1.00/150"), Routed::Discarded);
        assert_eq!(r.peer(), before);
    }

    #[test]
    fn foreign_frames_are_ignored() {
        let mut r = router();
        assert_eq!(route(&mut r, b"<10008>startAlert"), Routed::Discarded);
        assert_eq!(route(&mut r, b"<777>current=1.0&gas=1.0/2"), Routed::Discarded);
        assert_eq!(r.peer(), PeerTelemetry::default());
    }

    #[test]
    fn command_check_wins_over_telemetry_shape() {
        // A telemetry-shaped payload addressed to us is still command input.
        let mut r = router();
        let routed = route(&mut r, b"<10009>current=1.00&gas=2.00/3");
        assert_eq!(routed, Routed::Command("current=1.00&gas=2.00/3"));
        assert_eq!(r.peer(), PeerTelemetry::default());
    }
}
