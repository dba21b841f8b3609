//! Application core: pure control logic, zero I/O.
//!
//! This module contains the business rules for the cabin node: per-cycle
//! orchestration, the downlink command table, shared flags, and the
//! event vocabulary. All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod flags;
pub mod ports;
pub mod service;
