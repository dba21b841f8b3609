//! Node service, the control core.
//!
//! [`NodeService`] owns the timer slots, sample windows, router, alert
//! sequencer, and shared flags. It exposes a clean, hardware-agnostic
//! API. All I/O flows through port traits injected at call sites, making
//! the entire service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌───────────────────────────┐ ──▶ RadioPort
//!   RadioPort  ──▶ │        NodeService        │ ──▶ HostLinkPort
//!   HostLink   ──▶ │ windows · router · alert  │ ──▶ ActuatorPort
//!                  └───────────────────────────┘ ──▶ EventSink
//! ```
//!
//! One [`poll`](NodeService::poll) call is one iteration of the
//! cooperative loop: it never blocks and never loops beyond a fixed
//! budget, so the external watchdog contract holds by construction.

use log::{debug, info};

use crate::alert::AlertSequencer;
use crate::config::{HOST_LINE_MAX, NodeConfig, OUTBOUND_FRAME_MAX};
use crate::error::{ComposeError, Result};
use crate::host::{self, HostInput, HostLineAssembler};
use crate::lights::LightingResolver;
use crate::radio::frame;
use crate::radio::router::{Routed, Router};
use crate::radio::rx::FrameAssembler;
use crate::radio::telemetry::PeerTelemetry;
use crate::sampling::TelemetryRole;
use crate::scheduler::TaskSlot;

use super::commands::{self, NodeCommand};
use super::events::NodeEvent;
use super::flags::NodeFlags;
use super::ports::{ActuatorPort, EventSink, HostLinkPort, RadioPort, SensorPort};

/// Bytes drained from the host UART per poll.
const HOST_DRAIN_BUDGET: usize = 256;

/// Routing outcome with the receive buffer already let go.
enum InboundAction {
    Command(NodeCommand),
    Peer(PeerTelemetry),
}

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The node service orchestrates all control logic for one role.
pub struct NodeService<R: TelemetryRole> {
    config: NodeConfig,
    flags: NodeFlags,
    telemetry: R,
    router: Router,
    frames: FrameAssembler,
    host_rx: HostLineAssembler,
    alert: AlertSequencer,
    lights: LightingResolver,
    sample_slot: TaskSlot,
    uplink_slot: TaskSlot,
}

impl<R: TelemetryRole> NodeService<R> {
    /// Construct the service, rejecting configurations whose intervals
    /// or ids cannot work on the wire.
    pub fn new(config: NodeConfig, telemetry: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            router: Router::new(&config),
            lights: LightingResolver::new(config.relay),
            config,
            flags: NodeFlags::new(),
            telemetry,
            frames: FrameAssembler::new(),
            host_rx: HostLineAssembler::new(),
            alert: AlertSequencer::new(),
            sample_slot: TaskSlot::new(),
            uplink_slot: TaskSlot::new(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce bring-up and sound the liveness chirp.
    pub fn start(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        info!(
            "NODE | device {} up, uplink every {} ms, sampling every {} ms",
            self.config.device_id, self.config.uplink_interval_ms, self.config.sample_interval_ms
        );
        self.alert.start(self.config.chirp_alert, now_ms);
        sink.emit(NodeEvent::Started {
            device_id: self.config.device_id,
        });
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cooperative iteration.
    ///
    /// The `hw` parameter satisfies **all four** hardware ports, which
    /// keeps the port boundary explicit without a tangle of mutable
    /// borrows. An `Err` is fatal: the outbound framing path failed and
    /// the runner must fail-stop.
    pub fn poll(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort + RadioPort + HostLinkPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        // 1. Door and emergency are level inputs, scanned every cycle.
        self.scan_inputs(hw, sink);

        // 2. Timed sampling into the windows.
        if self
            .sample_slot
            .due(self.config.sample_interval_ms, now_ms)
        {
            self.telemetry.sample(hw);
        }

        // 3. Timed uplink: body, frame, host report, chirp, window reset.
        if self
            .uplink_slot
            .due(self.config.uplink_interval_ms, now_ms)
        {
            self.transmit(now_ms, hw, sink)?;
        }

        // 4. At most one completed radio delivery per cycle. The routing
        //    outcome is made owned before any flag or alert mutation.
        let action = match self.frames.pump(hw) {
            Some(bytes) => match frame::parse_inbound(bytes) {
                Ok(parsed) => match self.router.route(parsed) {
                    Routed::Command(payload) => {
                        commands::dispatch(payload).map(InboundAction::Command)
                    }
                    Routed::PeerUpdated(peer) => Some(InboundAction::Peer(peer)),
                    Routed::Discarded => None,
                },
                Err(err) => {
                    debug!("RX | undecodable delivery dropped: {err}");
                    None
                }
            },
            None => None,
        };
        match action {
            Some(InboundAction::Command(cmd)) => self.apply_command(cmd, now_ms, sink),
            Some(InboundAction::Peer(peer)) => sink.emit(NodeEvent::PeerUpdated(peer)),
            None => {}
        }

        // 5. Host console input, one bounded drain per cycle.
        for _ in 0..HOST_DRAIN_BUDGET {
            let Some(byte) = hw.read_byte() else { break };
            if let Some(line) = self.host_rx.push(byte) {
                self.handle_host_line(&line, sink);
            }
        }

        // 6. Alert sequencer; forward only actual edges to the buzzer.
        if let Some(level) = self.alert.tick(now_ms) {
            hw.drive_buzzer(level);
        }

        // 7. Lighting rule, re-applied every cycle.
        hw.drive_relay(self.lights.level(self.flags.day_time, self.flags.door_open));

        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn flags(&self) -> &NodeFlags {
        &self.flags
    }

    pub fn alert(&self) -> &AlertSequencer {
        &self.alert
    }

    /// Last accepted exterior-node readings.
    pub fn peer(&self) -> PeerTelemetry {
        self.router.peer()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn scan_inputs(&mut self, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        let door = hw.read_door_state();
        if door != self.flags.door_open {
            self.flags.door_open = door;
            info!("INPUT | door {}", if door { "open" } else { "closed" });
            sink.emit(NodeEvent::DoorChanged { open: door });
        }

        let emergency = hw.read_emergency_button();
        if emergency != self.flags.emergency_active {
            self.flags.emergency_active = emergency;
            info!(
                "INPUT | emergency {}",
                if emergency { "active" } else { "cleared" }
            );
            sink.emit(NodeEvent::EmergencyChanged { active: emergency });
        }
    }

    /// Compose and send one uplink, then the host report line.
    fn transmit(
        &mut self,
        now_ms: u32,
        hw: &mut (impl RadioPort + HostLinkPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let mut body: heapless::String<OUTBOUND_FRAME_MAX> = heapless::String::new();
        let priority = match self.flags.take_priority() {
            Some(staged) => {
                body.push_str(&staged)
                    .map_err(|()| ComposeError::CapacityExceeded)?;
                true
            }
            None => {
                self.telemetry
                    .compose_body(self.flags.status, self.flags.emergency_active, &mut body)
                    .map_err(|_| ComposeError::CapacityExceeded)?;
                false
            }
        };

        let frame = frame::compose(self.config.device_id, &body)?;
        hw.send(frame.as_bytes());
        info!("TX | {frame}");
        sink.emit(NodeEvent::UplinkSent { priority });

        let mut report: heapless::String<HOST_LINE_MAX> = heapless::String::new();
        self.telemetry
            .compose_report(self.flags.emergency_active, self.router.peer(), &mut report)
            .map_err(|_| ComposeError::CapacityExceeded)?;
        hw.send_line(&report);

        // Confirmation chirp; an alert already sounding takes precedence.
        if !self.alert.is_active() {
            self.alert.start(self.config.chirp_alert, now_ms);
        }

        self.telemetry.reset();
        Ok(())
    }

    fn apply_command(&mut self, cmd: NodeCommand, now_ms: u32, sink: &mut impl EventSink) {
        match cmd {
            NodeCommand::StartAlert => {
                let was_idle = !self.alert.is_active();
                self.alert.start(self.config.command_alert, now_ms);
                if was_idle {
                    sink.emit(NodeEvent::AlertStarted {
                        pulses: self.config.command_alert.pulses,
                    });
                }
                info!(
                    "CMD | startAlert, {} pulses",
                    self.config.command_alert.pulses
                );
            }
            NodeCommand::DayTime => self.set_day_time(true, sink),
            NodeCommand::NightTime => self.set_day_time(false, sink),
        }
        sink.emit(NodeEvent::CommandApplied(cmd));
    }

    fn set_day_time(&mut self, day_time: bool, sink: &mut impl EventSink) {
        if self.flags.day_time != day_time {
            sink.emit(NodeEvent::DayNightChanged { day_time });
        }
        self.flags.day_time = day_time;
        info!("CMD | {}", if day_time { "daytime" } else { "nighttime" });
    }

    fn handle_host_line(&mut self, line: &str, sink: &mut impl EventSink) {
        match host::parse_line(line) {
            Some(HostInput::Status(code)) => {
                self.flags.status = code;
                info!("HOST | status {code}");
                sink.emit(NodeEvent::StatusSubmitted(code));
            }
            Some(HostInput::Priority(text)) => {
                if self.flags.stage_priority(text) {
                    info!("HOST | military message staged for next uplink");
                    sink.emit(NodeEvent::PriorityStaged);
                }
            }
            None => debug!("HOST | unrecognized line {line:?} dropped"),
        }
    }
}
