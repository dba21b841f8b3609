//! Downlink command table.
//!
//! The base station addresses the node (directly or by zone broadcast)
//! with a bare command word as the frame payload. The table is fixed and
//! ordered; lookup is exact-match and case-sensitive. Anything not in
//! the table is discarded silently; commands are fire-and-forget, never
//! acknowledged.

use log::debug;

/// Actions the base station can request over the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCommand {
    /// Sound the operator alert sequence.
    StartAlert,
    /// Declare daylight; lighting follows.
    DayTime,
    /// Declare nightfall; lighting follows the door.
    NightTime,
}

/// Known command words, in dispatch order.
pub const COMMAND_TABLE: [(&str, NodeCommand); 3] = [
    ("startAlert", NodeCommand::StartAlert),
    ("daytime", NodeCommand::DayTime),
    ("nighttime", NodeCommand::NightTime),
];

/// Look up one decoded payload; `None` means drop it.
pub fn dispatch(input: &str) -> Option<NodeCommand> {
    let found = COMMAND_TABLE
        .iter()
        .find(|(word, _)| *word == input)
        .map(|&(_, command)| command);
    if found.is_none() {
        debug!("CMD | unknown command {input:?} dropped");
    }
    found
}
