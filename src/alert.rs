//! Non-blocking buzzer alert sequencer.
//!
//! Classic two-phase beep counter: the sequencer toggles the buzzer once
//! per half-period and counts a pulse each time the toggle lands on the
//! off phase, so every beep gets a full, even on/off cycle without any
//! blocking delay. `tick` reports a level only when it changes; the
//! caller forwards that single edge to the actuator port.
//!
//! A `start` arriving mid-sequence is queued and applied once the running
//! sequence drains. Repeated starts while active overwrite the queued
//! profile rather than stacking.

use embedded_hal::digital::PinState;
use serde::{Deserialize, Serialize};

use crate::scheduler::TaskSlot;

/// Timing and length of one alert sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertProfile {
    /// Time the buzzer spends in each on or off phase.
    pub half_period_ms: u32,
    /// Number of full on/off beeps in the sequence.
    pub pulses: u16,
}

impl AlertProfile {
    /// Operator-triggered alert, loud and long.
    pub const COMMAND: Self = Self {
        half_period_ms: 750,
        pulses: 10,
    };

    /// Short liveness chirp, played at boot and after each uplink.
    pub const CHIRP: Self = Self {
        half_period_ms: 133,
        pulses: 3,
    };

    /// Slow distress pattern played while halting on an internal fault.
    pub const FATAL: Self = Self {
        half_period_ms: 2_000,
        pulses: 10,
    };
}

/// Beep-count state machine. Idle when `remaining == 0` with nothing queued.
#[derive(Debug)]
pub struct AlertSequencer {
    profile: AlertProfile,
    remaining: u16,
    pending: Option<AlertProfile>,
    output_on: bool,
    slot: TaskSlot,
}

impl AlertSequencer {
    pub const fn new() -> Self {
        Self {
            // Placeholder until the first start; never ticked while idle.
            profile: AlertProfile::COMMAND,
            remaining: 0,
            pending: None,
            output_on: false,
            slot: TaskSlot::new(),
        }
    }

    /// Begin a sequence, or queue it if one is already running.
    pub fn start(&mut self, profile: AlertProfile, now_ms: u32) {
        if self.is_active() {
            self.pending = Some(profile);
            return;
        }
        self.load(profile, now_ms);
    }

    /// Advance the sequence. Returns the new buzzer level on a toggle,
    /// `None` when nothing changed this call.
    pub fn tick(&mut self, now_ms: u32) -> Option<PinState> {
        if self.remaining == 0 {
            let queued = self.pending.take()?;
            // Queued restart begins a clean half-period after the drain.
            self.load(queued, now_ms);
            return None;
        }
        if !self.slot.due(self.profile.half_period_ms, now_ms) {
            return None;
        }
        self.output_on = !self.output_on;
        if !self.output_on {
            // Falling edge closes one full beep.
            self.remaining -= 1;
        }
        Some(if self.output_on {
            PinState::High
        } else {
            PinState::Low
        })
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0 || self.pending.is_some()
    }

    pub fn remaining_pulses(&self) -> u16 {
        self.remaining
    }

    fn load(&mut self, profile: AlertProfile, now_ms: u32) {
        self.profile = profile;
        self.remaining = profile.pulses;
        self.output_on = false;
        self.slot.rearm(now_ms);
    }
}

impl Default for AlertSequencer {
    fn default() -> Self {
        Self::new()
    }
}
