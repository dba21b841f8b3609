//! Cabin monitoring node, control library.
//!
//! Exposes the control core for integration testing and for the host
//! simulator binary. All hardware access is confined to the port traits
//! in [`app::ports`]; everything else is pure logic and runs identically
//! on the target and on a host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alert;
pub mod app;
pub mod config;
pub mod error;
pub mod host;
pub mod lights;
pub mod radio;
pub mod sampling;
pub mod scheduler;
