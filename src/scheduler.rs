//! Cooperative timer slots.
//!
//! The main loop never blocks; every periodic activity instead owns a
//! [`TaskSlot`] and asks it `due()` on each iteration. A slot fires at most
//! once per interval no matter how often it is polled, and the interval
//! arithmetic is wrapping, so a `u32` millisecond clock rolling over
//! (about every 49.7 days) is transparent.
//!
//! ```text
//!  loop {                         // one cooperative iteration
//!      if uplink_slot.due(20_000, now) { transmit(); }
//!      if sample_slot.due(2_000, now)  { sample(); }
//!      alert_slot ...              // each activity owns its slot
//!  }
//! ```
//!
//! Slot identity is ownership: two activities can only share a slot by
//! sharing the same `TaskSlot` value, which the borrow checker makes a
//! deliberate act instead of an accidental index collision.

/// One independent periodic timer slot.
///
/// A fresh slot has "never fired": its first `due()` becomes true one full
/// interval after time zero, so windows accumulate before the first fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSlot {
    last_fire_ms: u32,
}

impl TaskSlot {
    pub const fn new() -> Self {
        Self { last_fire_ms: 0 }
    }

    /// True at most once per `interval_ms` of elapsed monotonic time.
    ///
    /// Records the firing time on a true result. Uses wrapping subtraction,
    /// so timestamp wraparound does not produce a stall or a double fire.
    /// An interval of zero fires on every poll.
    pub fn due(&mut self, interval_ms: u32, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_fire_ms) >= interval_ms {
            self.last_fire_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Reset the phase: the next fire happens one full interval from `now_ms`.
    pub fn rearm(&mut self, now_ms: u32) {
        self.last_fire_ms = now_ms;
    }

    /// Milliseconds since the last fire (or since the last rearm).
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_fire_ms)
    }
}

impl Default for TaskSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fire_after_one_full_interval() {
        let mut slot = TaskSlot::new();
        assert!(!slot.due(1_000, 0));
        assert!(!slot.due(1_000, 500));
        assert!(!slot.due(1_000, 999));
        assert!(slot.due(1_000, 1_000));
    }

    #[test]
    fn fires_at_most_once_per_interval() {
        let mut slot = TaskSlot::new();
        assert!(slot.due(1_000, 1_000));
        // Polled many times inside the interval; must stay quiet.
        for t in 1_001..2_000 {
            assert!(!slot.due(1_000, t));
        }
        assert!(slot.due(1_000, 2_000));
    }

    #[test]
    fn sparse_polling_still_fires() {
        let mut slot = TaskSlot::new();
        // Poll long after the interval elapsed: exactly one fire.
        assert!(slot.due(1_000, 5_500));
        assert!(!slot.due(1_000, 5_600));
        // Next fire measured from the late fire time.
        assert!(!slot.due(1_000, 6_400));
        assert!(slot.due(1_000, 6_500));
    }

    #[test]
    fn survives_timestamp_wraparound() {
        let mut slot = TaskSlot::new();
        let near_max = u32::MAX - 100;
        assert!(slot.due(1_000, near_max));
        assert!(!slot.due(1_000, near_max + 50));
        // 899 ms after the fire, counted across the wrap: not yet.
        assert!(!slot.due(1_000, 798)); // near_max + 899 wraps to 798
        // 1001 ms after the fire: due.
        assert!(slot.due(1_000, 900));
    }

    #[test]
    fn rearm_postpones_next_fire() {
        let mut slot = TaskSlot::new();
        assert!(slot.due(1_000, 1_000));
        slot.rearm(1_900);
        assert!(!slot.due(1_000, 2_000));
        assert!(slot.due(1_000, 2_900));
    }

    #[test]
    fn elapsed_tracks_since_fire() {
        let mut slot = TaskSlot::new();
        assert!(slot.due(1_000, 1_000));
        assert_eq!(slot.elapsed(1_250), 250);
        assert_eq!(slot.elapsed(1_000), 0);
    }

    #[test]
    fn independent_slots_do_not_interfere() {
        let mut a = TaskSlot::new();
        let mut b = TaskSlot::new();
        assert!(a.due(100, 100));
        assert!(b.due(300, 300));
        assert!(a.due(100, 300));
        assert!(!b.due(300, 400));
    }

    #[test]
    fn zero_interval_fires_every_poll() {
        let mut slot = TaskSlot::new();
        assert!(slot.due(0, 0));
        assert!(slot.due(0, 0));
        assert!(slot.due(0, 1));
    }
}
