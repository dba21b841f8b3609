//! Wire framing: `<receiver_id>payload`.
//!
//! Every message on the air is one frame: a `<` , up to six decimal id
//! digits, a `>`, then the payload. Inbound parsing is total and
//! allocation-free; anything malformed comes back as a [`FrameError`]
//! and the caller drops the frame without touching node state.

use core::fmt::Write as _;
use core::str;

use crate::config::{DEVICE_ID_DIGITS_MAX, INBOUND_PAYLOAD_MAX, OUTBOUND_FRAME_MAX};
use crate::error::{ComposeError, FrameError};

/// A decoded inbound frame, borrowing the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundFrame<'a> {
    pub receiver_id: u32,
    pub payload: &'a str,
}

/// Outbound scratch sized for the largest frame the node ever sends.
pub type OutboundFrame = heapless::String<OUTBOUND_FRAME_MAX>;

/// Split a completed delivery into receiver id and payload.
pub fn parse_inbound(bytes: &[u8]) -> Result<InboundFrame<'_>, FrameError> {
    if bytes.is_empty() {
        return Err(FrameError::Empty);
    }
    let Some(rest) = bytes.strip_prefix(b"<") else {
        return Err(FrameError::Delimiter);
    };
    let Some(close) = rest.iter().position(|&b| b == b'>') else {
        return Err(FrameError::Delimiter);
    };
    let (id_digits, after) = rest.split_at(close);
    let payload = &after[1..];

    if id_digits.is_empty()
        || id_digits.len() > DEVICE_ID_DIGITS_MAX
        || !id_digits.iter().all(u8::is_ascii_digit)
    {
        return Err(FrameError::ReceiverId);
    }
    // At most six ASCII digits, so the view and the parse cannot fail.
    let receiver_id = str::from_utf8(id_digits)
        .ok()
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or(FrameError::ReceiverId)?;

    if payload.is_empty() {
        return Err(FrameError::Empty);
    }
    if payload.len() > INBOUND_PAYLOAD_MAX {
        return Err(FrameError::Oversize);
    }
    let payload = str::from_utf8(payload).map_err(|_| FrameError::Encoding)?;

    Ok(InboundFrame {
        receiver_id,
        payload,
    })
}

/// Wrap a composed body in the address prefix.
pub fn compose(device_id: u32, body: &str) -> Result<OutboundFrame, ComposeError> {
    let mut frame = OutboundFrame::new();
    write!(frame, "<{device_id}>{body}").map_err(|_| ComposeError::CapacityExceeded)?;
    Ok(frame)
}
