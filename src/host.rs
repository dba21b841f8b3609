//! Host console line handling.
//!
//! The attendant console speaks line-terminated text over the UART. Two
//! line shapes matter inbound: `status=X` carries the operator status
//! letter for the next uplink, and `nro_mm=...` is a military message
//! whose whole line is forwarded upstream verbatim as a one-shot
//! priority payload. Everything else is dropped. Accumulation is
//! bounded; an overlong line is discarded up to its terminator rather
//! than truncated.

use core::str;

use log::warn;

use crate::config::HOST_LINE_MAX;
use crate::radio::grammar::StatusCode;

/// One completed host line.
pub type HostLineBuf = heapless::String<HOST_LINE_MAX>;

/// What a completed host line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput<'a> {
    /// Operator status for subsequent uplinks.
    Status(StatusCode),
    /// Military message; the whole line becomes the priority payload.
    Priority(&'a str),
}

/// Interpret one completed line. `None` means drop it.
pub fn parse_line(line: &str) -> Option<HostInput<'_>> {
    if let Some(token) = line.strip_prefix("status=") {
        let mut chars = token.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        return StatusCode::from_char(letter).map(HostInput::Status);
    }
    if line.starts_with("nro_mm=") {
        return Some(HostInput::Priority(line));
    }
    None
}

/// Byte-at-a-time line accumulator with whole-line discard on overflow.
#[derive(Debug, Default)]
pub struct HostLineAssembler {
    buf: heapless::Vec<u8, HOST_LINE_MAX>,
    discarding: bool,
}

impl HostLineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            discarding: false,
        }
    }

    /// Feed one byte; returns a completed line on CR or LF.
    ///
    /// Empty lines (and the LF of a CRLF pair) complete to nothing. A
    /// line that overruns the buffer is dropped in full and accumulation
    /// resumes after the next terminator.
    pub fn push(&mut self, byte: u8) -> Option<HostLineBuf> {
        match byte {
            b'\r' | b'\n' => {
                let skip = core::mem::take(&mut self.discarding);
                let line = if skip {
                    None
                } else {
                    str::from_utf8(&self.buf)
                        .ok()
                        .filter(|line| !line.is_empty())
                        .and_then(|line| HostLineBuf::try_from(line).ok())
                };
                self.buf.clear();
                line
            }
            _ => {
                if self.buf.push(byte).is_err() && !self.discarding {
                    self.discarding = true;
                    self.buf.clear();
                    warn!("HOST | line over {HOST_LINE_MAX} bytes discarded");
                }
                None
            }
        }
    }
}
