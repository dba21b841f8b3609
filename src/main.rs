//! Cabin node host simulator entry point.
//!
//! Runs the control core against the simulation adapters with a scripted
//! scenario, pacing the cooperative loop off the wall clock:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SimSensors   SimRadio    SimHost      LogEventSink      │
//! │  SimActuators (loopback)  (console)    (EventSink)       │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ────────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           NodeService (pure logic)             │      │
//! │  │  windows · router · alert · lighting           │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The hardware build replaces the adapters and this runner; the core is
//! untouched.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, error, info};

use cabinwatch::adapters::log_sink::LogEventSink;
use cabinwatch::adapters::sim::SimHw;
use cabinwatch::alert::{AlertProfile, AlertSequencer};
use cabinwatch::app::ports::ActuatorPort;
use cabinwatch::app::service::NodeService;
use cabinwatch::config::NodeConfig;
use cabinwatch::sampling::CabinTelemetry;

/// Wall-clock pace of one cooperative iteration.
const POLL_PERIOD: Duration = Duration::from_millis(25);

/// Seed for the simulated analog channels; fixed so runs are comparable.
const SIM_SEED: u64 = 0x00C4_B1_2026;

// ── Demo scenario ─────────────────────────────────────────────
//
// Scripted traffic so every node path shows up in one run: host status,
// a peer uplink, day/night and door changes, an operator alert, a
// military message, and an emergency window.

enum ScriptStep {
    Downlink(&'static [u8]),
    HostLine(&'static str),
    Door(bool),
    Emergency(bool),
}

const SCRIPT: &[(u32, ScriptStep)] = &[
    (3_000, ScriptStep::HostLine("status=S")),
    (
        12_000,
        ScriptStep::Downlink(b"<20009>current=0.65&raindrops=1&gas=123.51/150"),
    ),
    (26_000, ScriptStep::Downlink(b"<10009>nighttime")),
    (31_000, ScriptStep::Door(true)),
    (44_000, ScriptStep::Downlink(b"<10009>startAlert")),
    (52_000, ScriptStep::HostLine("nro_mm=17&texto=relevo a las 0600")),
    (62_000, ScriptStep::Emergency(true)),
    (71_000, ScriptStep::Emergency(false)),
    (75_000, ScriptStep::Door(false)),
    (82_000, ScriptStep::Downlink(b"<19999>daytime")),
];

fn apply_step(hw: &mut SimHw, step: &ScriptStep) {
    match step {
        ScriptStep::Downlink(frame) => {
            hw.radio.deliver(frame);
        }
        ScriptStep::HostLine(line) => hw.host.push_line(line),
        ScriptStep::Door(open) => hw.sensors.set_door_open(*open),
        ScriptStep::Emergency(active) => hw.sensors.set_emergency(*active),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  CabinWatch node sim v{}          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 1. Configuration: JSON override or shipped defaults ───
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config: NodeConfig =
                serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))?;
            info!("Config loaded from {path}");
            config
        }
        None => {
            info!("No config path given, using defaults");
            NodeConfig::default()
        }
    };

    // ── 2. Adapters and service ───────────────────────────────
    let mut hw = SimHw::new(SIM_SEED);
    let mut sink = LogEventSink::new();
    let mut service = NodeService::new(config, CabinTelemetry::new())
        .context("configuration rejected at bring-up")?;

    // ── 3. Cooperative loop ───────────────────────────────────
    let epoch = Instant::now();
    let mut next_step = 0;
    service.start(0, &mut sink);

    loop {
        let now_ms = epoch.elapsed().as_millis() as u32;

        while let Some((at_ms, step)) = SCRIPT.get(next_step) {
            if now_ms < *at_ms {
                break;
            }
            debug!("SIM | script step at {at_ms} ms");
            apply_step(&mut hw, step);
            next_step += 1;
        }

        if let Err(err) = service.poll(now_ms, &mut hw, &mut sink) {
            error!("FATAL | {err}");
            fail_stop(&mut hw, epoch);
        }

        thread::sleep(POLL_PERIOD);
    }
}

/// Terminal failure: signal the distinguishable repeating pattern and go
/// unresponsive, leaving recovery to the external watchdog (here: the
/// operator's ctrl-C).
fn fail_stop(hw: &mut SimHw, epoch: Instant) -> ! {
    let mut alert = AlertSequencer::new();
    loop {
        let now_ms = epoch.elapsed().as_millis() as u32;
        if !alert.is_active() {
            alert.start(AlertProfile::FATAL, now_ms);
        }
        if let Some(level) = alert.tick(now_ms) {
            hw.drive_buzzer(level);
        }
        thread::sleep(POLL_PERIOD);
    }
}
