//! ClimaBox firmware library.
//!
//! Exposes the sampling loops, decision logic, and shared state store for
//! integration testing and for the web layer that serves the dashboard.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod samplers;
pub mod state;

pub mod error;
pub mod pins;

// Hardware-facing modules; the actual register access inside is gated on
// the target, so these compile (with simulation stubs) everywhere.
pub mod adapters;
pub mod drivers;
