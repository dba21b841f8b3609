//! Fuzz target: inbound frame parsing and routing.
//!
//! Drives arbitrary byte sequences through `parse_inbound` and, when a
//! frame decodes, on through the router with the shipped configuration.
//! Asserts the documented bounds hold and nothing panics.
//!
//! cargo fuzz run fuzz_frame_parse

#![no_main]

use cabinwatch::config::{INBOUND_PAYLOAD_MAX, NodeConfig};
use cabinwatch::radio::frame;
use cabinwatch::radio::router::Router;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = frame::parse_inbound(data) else {
        return;
    };
    assert!(parsed.receiver_id <= 999_999, "id exceeds six wire digits");
    assert!(
        !parsed.payload.is_empty() && parsed.payload.len() <= INBOUND_PAYLOAD_MAX,
        "payload outside documented bounds"
    );

    // Routing arbitrary decoded frames must never panic, whatever the
    // payload pretends to be.
    let mut router = Router::new(&NodeConfig::default());
    let _ = router.route(parsed);
});
