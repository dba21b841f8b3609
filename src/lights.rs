//! Day/night lighting resolver.
//!
//! Pure decision logic for the cabin light relay. The logical rule never
//! changes: lights ON during daytime, ON at night while the door is
//! closed, OFF only at night with the door open. The physical wiring
//! (relay drive polarity, contact mode) is folded into two concrete
//! electrical levels exactly once at construction, so the day/door logic
//! stays free of wiring concerns.
//!
//! The resolver is the only component that drives the relay; everything
//! else (commands, host input) mutates the day/door flags and leaves the
//! electrical decision here.

use embedded_hal::digital::PinState;
use serde::{Deserialize, Serialize};

/// Relay wiring description, from the board jumper and contact hookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// The relay coil energises on a low drive level.
    pub active_low: bool,
    /// The light is wired through the normally-closed contact.
    pub normally_closed: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        // Shipped board: active-low relay module, normally-closed contact.
        Self {
            active_low: true,
            normally_closed: true,
        }
    }
}

/// What the lights should logically be doing, before wiring is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    On,
    Off,
}

/// Maps `(day_time, door_open)` to the relay drive level.
#[derive(Debug, Clone, Copy)]
pub struct LightingResolver {
    on_level: PinState,
    off_level: PinState,
}

impl LightingResolver {
    /// Resolve the wiring into concrete on/off drive levels.
    ///
    /// The drive level for "light on" is high exactly when
    /// `active_low XOR normally_closed` is false: an active-low coil behind
    /// a normally-closed contact needs a high (de-energised) drive to light,
    /// as does an active-high coil behind a normally-open contact.
    pub fn new(relay: RelayConfig) -> Self {
        let on_high = !(relay.active_low ^ relay.normally_closed);
        let (on_level, off_level) = if on_high {
            (PinState::High, PinState::Low)
        } else {
            (PinState::Low, PinState::High)
        };
        Self {
            on_level,
            off_level,
        }
    }

    /// The wiring-independent day/door decision.
    pub fn resolve(day_time: bool, door_open: bool) -> LightCommand {
        if day_time || !door_open {
            LightCommand::On
        } else {
            LightCommand::Off
        }
    }

    /// Drive level for the resolved decision.
    pub fn level(&self, day_time: bool, door_open: bool) -> PinState {
        match Self::resolve(day_time, door_open) {
            LightCommand::On => self.on_level,
            LightCommand::Off => self.off_level,
        }
    }

    /// Drive level meaning "light on" under the configured wiring.
    pub fn on_level(&self) -> PinState {
        self.on_level
    }

    /// Drive level meaning "light off" under the configured wiring.
    pub fn off_level(&self) -> PinState {
        self.off_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daytime_is_always_on() {
        assert_eq!(LightingResolver::resolve(true, false), LightCommand::On);
        assert_eq!(LightingResolver::resolve(true, true), LightCommand::On);
    }

    #[test]
    fn night_depends_on_door() {
        assert_eq!(LightingResolver::resolve(false, false), LightCommand::On);
        assert_eq!(LightingResolver::resolve(false, true), LightCommand::Off);
    }

    #[test]
    fn shipped_wiring_lights_on_high() {
        // active-low + normally-closed => XOR false => on is high.
        let r = LightingResolver::new(RelayConfig::default());
        assert_eq!(r.on_level(), PinState::High);
        assert_eq!(r.off_level(), PinState::Low);
    }

    #[test]
    fn polarity_flips_levels_not_logic() {
        let shipped = LightingResolver::new(RelayConfig::default());
        let flipped = LightingResolver::new(RelayConfig {
            active_low: false,
            normally_closed: true,
        });

        // Same logical decision...
        for (day, door) in [(true, true), (true, false), (false, true), (false, false)] {
            let decision = LightingResolver::resolve(day, door);
            let a = shipped.level(day, door);
            let b = flipped.level(day, door);
            // ...opposite electrical levels.
            assert_ne!(a, b, "levels must flip with polarity for {decision:?}");
        }
    }

    #[test]
    fn all_four_wirings_resolve_consistently() {
        for active_low in [false, true] {
            for normally_closed in [false, true] {
                let r = LightingResolver::new(RelayConfig {
                    active_low,
                    normally_closed,
                });
                let expect_on_high = !(active_low ^ normally_closed);
                assert_eq!(r.on_level() == PinState::High, expect_on_high);
                assert_ne!(r.on_level(), r.off_level());
                // Night + open door is the only off case.
                assert_eq!(r.level(false, true), r.off_level());
                assert_eq!(r.level(false, false), r.on_level());
                assert_eq!(r.level(true, true), r.on_level());
            }
        }
    }
}
