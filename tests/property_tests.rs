//! Property tests for the wire codecs and timing primitives.
//!
//! These exercise the pure core with arbitrary inputs: parsers must be
//! total over raw bytes, composed bodies must survive re-extraction, and
//! the timer arithmetic must hold across counter wraparound.

use proptest::prelude::*;

use cabinwatch::app::commands;
use cabinwatch::config::{HOST_LINE_MAX, INBOUND_PAYLOAD_MAX, SAMPLE_WINDOW_CAPACITY};
use cabinwatch::host::{self, HostInput, HostLineAssembler};
use cabinwatch::radio::frame;
use cabinwatch::radio::grammar::{ExteriorGrammar, ExteriorReadings, UplinkGrammar};
use cabinwatch::radio::telemetry;
use cabinwatch::sampling::SampleWindow;
use cabinwatch::scheduler::TaskSlot;

// ── Inbound framing is total over raw bytes ───────────────────

proptest! {
    /// Any delivery either parses or yields a typed error; a successful
    /// parse always stays inside the documented bounds.
    #[test]
    fn inbound_parse_is_total(
        bytes in proptest::collection::vec(any::<u8>(), 0..=160),
    ) {
        if let Ok(parsed) = frame::parse_inbound(&bytes) {
            prop_assert!(parsed.receiver_id <= 999_999);
            prop_assert!(parsed.payload.len() <= INBOUND_PAYLOAD_MAX);
        }
    }

    /// Canonically formatted frames always parse back to their parts,
    /// whatever printable payload they carry.
    #[test]
    fn canonical_frames_round_trip(
        id in 1u32..=999_999,
        payload in "[ -~]{1,100}",
    ) {
        let text = format!("<{id}>{payload}");
        let parsed = frame::parse_inbound(text.as_bytes()).unwrap();
        prop_assert_eq!(parsed.receiver_id, id);
        prop_assert_eq!(parsed.payload, payload.as_str());
    }
}

// ── Scheduler firings never bunch up ──────────────────────────

proptest! {
    /// Whatever the poll cadence, two firings of one slot are never
    /// closer than the interval, including across u32 wraparound.
    #[test]
    fn slot_firings_spaced_by_interval(
        start in any::<u32>(),
        interval in 1u32..=100_000,
        steps in proptest::collection::vec(0u32..=5_000, 1..=200),
    ) {
        let mut slot = TaskSlot::new();
        slot.rearm(start);

        let mut now = start;
        let mut last_fire: Option<u32> = None;
        for step in steps {
            now = now.wrapping_add(step);
            if slot.due(interval, now) {
                if let Some(prev) = last_fire {
                    prop_assert!(
                        now.wrapping_sub(prev) >= interval,
                        "fired {} ms after the previous firing",
                        now.wrapping_sub(prev)
                    );
                }
                last_fire = Some(now);
            }
        }
    }
}

// ── Window mean stays inside the recorded range ───────────────

proptest! {
    #[test]
    fn window_mean_bounded_by_extremes(
        samples in proptest::collection::vec(-1_000.0f32..1_000.0, 1..=13),
    ) {
        let mut window: SampleWindow<SAMPLE_WINDOW_CAPACITY> = SampleWindow::new();
        for &sample in &samples {
            window.record(sample);
        }
        let mean = window.mean();
        let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        prop_assert!(
            mean >= min - 1e-3 && mean <= max + 1e-3,
            "mean {mean} escaped [{min}, {max}]"
        );
    }
}

// ── Exterior body survives re-extraction ──────────────────────

proptest! {
    /// Composing an exterior body and running the peer extractor over it
    /// recovers both readings to wire precision (two decimals).
    #[test]
    fn exterior_body_round_trips(
        current in 0.0f32..100.0,
        gas in 0.0f32..10_000.0,
        capacity in 1u32..=100_000,
    ) {
        let readings = ExteriorReadings { current, gas, capacity };
        let mut body = String::new();
        ExteriorGrammar::compose_body(&readings, &mut body).unwrap();

        let peer = telemetry::parse_exterior(&body).unwrap();
        prop_assert!((peer.current - current).abs() < 0.006);
        prop_assert!((peer.gas - gas).abs() < 0.006);
    }
}

// ── Command table is closed ───────────────────────────────────

proptest! {
    #[test]
    fn dispatch_rejects_words_outside_the_table(word in "[a-zA-Z]{0,20}") {
        prop_assume!(word != "startAlert" && word != "daytime" && word != "nighttime");
        prop_assert_eq!(commands::dispatch(&word), None);
    }
}

// ── Host line handling is total and bounded ───────────────────

proptest! {
    /// The assembler never emits an empty, overlong, or terminator-bearing
    /// line, whatever bytes arrive on the UART.
    #[test]
    fn assembled_lines_respect_the_bound(
        bytes in proptest::collection::vec(any::<u8>(), 0..=600),
    ) {
        let mut asm = HostLineAssembler::new();
        for byte in bytes {
            if let Some(line) = asm.push(byte) {
                prop_assert!(!line.is_empty());
                prop_assert!(line.len() <= HOST_LINE_MAX);
                prop_assert!(!line.contains('\n') && !line.contains('\r'));
            }
        }
    }

    /// `status=` accepts exactly the three wire letters.
    #[test]
    fn status_lines_accept_only_known_letters(letter in any::<char>()) {
        let line = format!("status={letter}");
        let parsed = host::parse_line(&line);
        match letter {
            'S' | 'L' | 'F' => prop_assert!(matches!(parsed, Some(HostInput::Status(_)))),
            _ => prop_assert!(parsed.is_none()),
        }
    }

    /// A military message always stages its whole line, untouched.
    #[test]
    fn priority_lines_stage_verbatim(suffix in "[ -~]{0,80}") {
        let line = format!("nro_mm={suffix}");
        match host::parse_line(&line) {
            Some(HostInput::Priority(text)) => prop_assert_eq!(text, line.as_str()),
            other => prop_assert!(false, "expected a priority line, got {other:?}"),
        }
    }
}
