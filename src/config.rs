//! Node configuration parameters.
//!
//! All tunable parameters for a deployed node. The defaults are the shipped
//! cabin-node values; the simulation binary can override them from a JSON
//! file. Buffer capacities are compile-time constants here because every
//! buffer in the core is fixed-size.

use serde::{Deserialize, Serialize};

use crate::alert::AlertProfile;
use crate::error::ConfigError;
use crate::lights::RelayConfig;

// --- Fixed buffer bounds ---

/// Maximum payload text carried by one inbound frame.
pub const INBOUND_PAYLOAD_MAX: usize = 100;
/// Maximum decimal digits in a device id on the wire.
pub const DEVICE_ID_DIGITS_MAX: usize = 6;
/// Maximum encoded inbound frame: `<` + id + `>` + payload.
pub const INBOUND_FRAME_MAX: usize = INBOUND_PAYLOAD_MAX + DEVICE_ID_DIGITS_MAX + 2;
/// Maximum encoded outbound frame.
pub const OUTBOUND_FRAME_MAX: usize = 200;
/// Maximum host serial line (inbound and report).
pub const HOST_LINE_MAX: usize = 100;

/// Extra window slots beyond the nominal samples-per-uplink ratio, covering
/// scheduler jitter around the uplink boundary.
const WINDOW_MARGIN: usize = 3;

const DEFAULT_UPLINK_INTERVAL_MS: u32 = 20_000;
const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 2_000;

/// Capacity of one sample window: samples per uplink cycle plus margin.
pub const SAMPLE_WINDOW_CAPACITY: usize =
    (DEFAULT_UPLINK_INTERVAL_MS / DEFAULT_SAMPLE_INTERVAL_MS) as usize + WINDOW_MARGIN;

/// Core node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Identity ---
    /// Numeric device id carried in every frame address.
    pub device_id: u32,

    // --- Timing ---
    /// Interval between telemetry uplinks (milliseconds).
    pub uplink_interval_ms: u32,
    /// Interval between sensor samples (milliseconds).
    pub sample_interval_ms: u32,

    // --- Alert profiles ---
    /// Operator-commanded alert (the `startAlert` downlink).
    pub command_alert: AlertProfile,
    /// Short liveness chirp at boot and after each transmit.
    pub chirp_alert: AlertProfile,
    /// Repeating fail-stop pattern driven when the node halts.
    pub fatal_alert: AlertProfile,

    // --- Relay wiring ---
    /// Relay drive polarity and contact wiring.
    pub relay: RelayConfig,

    // --- Exterior peer ---
    /// Fuel tank capacity, the denominator in the exterior gas ratio.
    pub tank_capacity: u16,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Identity
            device_id: 10_009,

            // Timing
            uplink_interval_ms: DEFAULT_UPLINK_INTERVAL_MS,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,

            // Alerts
            command_alert: AlertProfile::COMMAND,
            chirp_alert: AlertProfile::CHIRP,
            fatal_alert: AlertProfile::FATAL,

            // Relay
            relay: RelayConfig::default(),

            // Exterior peer
            tank_capacity: 150,
        }
    }
}

impl NodeConfig {
    /// Id of the paired exterior node.
    pub fn exterior_peer_id(&self) -> u32 {
        self.device_id + 10_000
    }

    /// Broadcast id for this node family: same ten-thousands block, 9999.
    pub fn broadcast_id(&self) -> u32 {
        self.device_id - self.device_id % 10_000 + 9_999
    }

    /// Validate invariants the rest of the core relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uplink_interval_ms == 0 || self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.sample_interval_ms > self.uplink_interval_ms {
            return Err(ConfigError::SamplePeriodExceedsUplink);
        }
        let samples_per_cycle =
            self.uplink_interval_ms.div_ceil(self.sample_interval_ms) as usize;
        if samples_per_cycle > SAMPLE_WINDOW_CAPACITY {
            return Err(ConfigError::WindowOverflow);
        }
        // The exterior id must still fit the wire digit bound, and the
        // broadcast id must not collide with the device id itself.
        if self.device_id == 0
            || self.exterior_peer_id() > 999_999
            || self.device_id % 10_000 == 9_999
        {
            return Err(ConfigError::BadDeviceId);
        }
        Ok(())
    }
}
