//! Unified error types for the node core.
//!
//! The wire-facing error taxonomy is deliberately small: almost every bad
//! input (truncated frame, unknown command, malformed peer telemetry) is
//! dropped where it is detected, with at most a diagnostic log. The typed
//! variants below exist for the few seams where the caller has to react,
//! and for the fatal compose path that ends in a fail-stop halt. All
//! variants are `Copy` so they pass through the poll loop without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level node error
// ---------------------------------------------------------------------------

/// Every fallible operation in the node funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An inbound frame failed structural validation.
    Frame(FrameError),
    /// An outbound frame or report exceeded its fixed buffer.
    Compose(ComposeError),
    /// Configuration failed validation at startup.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Compose(e) => write!(f, "compose: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Inbound framing errors
// ---------------------------------------------------------------------------

/// Why an inbound delivery was rejected. Rejection never corrupts state:
/// the frame is dropped whole and the scratch buffer cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Zero-length delivery.
    Empty,
    /// Delivery exceeds the fixed frame bound.
    Oversize,
    /// Missing `<` opener or `>` delimiter.
    Delimiter,
    /// Receiver id is not a decimal number within the digit bound.
    ReceiverId,
    /// Payload is not valid UTF-8.
    Encoding,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty delivery"),
            Self::Oversize => write!(f, "delivery exceeds frame bound"),
            Self::Delimiter => write!(f, "missing address delimiter"),
            Self::ReceiverId => write!(f, "bad receiver id"),
            Self::Encoding => write!(f, "payload is not UTF-8"),
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Outbound compose errors
// ---------------------------------------------------------------------------

/// Outbound buffers are sized so that every well-formed body fits; hitting
/// this means the configuration or staged payload is corrupt, and the node
/// has no safe degraded mode. The runner answers with the fail-stop alert
/// pattern and halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeError {
    /// The composed text did not fit its fixed-capacity buffer.
    CapacityExceeded,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "fixed buffer capacity exceeded"),
        }
    }
}

impl From<ComposeError> for Error {
    fn from(e: ComposeError) -> Self {
        Self::Compose(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// An interval is zero.
    ZeroInterval,
    /// Sampling slower than the uplink period would transmit empty windows.
    SamplePeriodExceedsUplink,
    /// More samples per uplink cycle than the window can hold.
    WindowOverflow,
    /// Device id out of range, or its derived broadcast id collides with it.
    BadDeviceId,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "interval must be non-zero"),
            Self::SamplePeriodExceedsUplink => {
                write!(f, "sample interval exceeds uplink interval")
            }
            Self::WindowOverflow => write!(f, "sample window too small for uplink interval"),
            Self::BadDeviceId => write!(f, "device id out of range or collides with broadcast"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Node-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
