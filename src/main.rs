//! ClimaBox firmware entry point.
//!
//! Boots the ESP-IDF runtime, configures the pins, then spawns the three
//! perpetual sampling threads against one shared state store:
//!
//! ```text
//!   climate thread ──┐
//!   distance thread ─┼──▶ StateStore (one mutex: state + pins) ◀── web layer
//!   touch thread ────┘                                             (external)
//! ```
//!
//! The main thread stays behind as a telemetry reporter, logging a full
//! state snapshot at a fixed interval.

#![deny(unused_must_use)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::info;

use climabox::adapters::hardware::BoardHardware;
use climabox::config::SystemConfig;
use climabox::drivers::hw_init;
use climabox::samplers;
use climabox::state::StateStore;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ClimaBox v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Pin configuration ──────────────────────────────────
    hw_init::init_peripherals().map_err(|e| anyhow!("peripheral init failed: {e}"))?;

    // ── 3. Shared store + sampling threads ────────────────────
    let config = SystemConfig::default();
    let store = Arc::new(StateStore::new(BoardHardware::new()));

    let handles = samplers::spawn_all(&store, &config)?;
    info!("System ready. {} sampler threads running.", handles.len());

    // The web layer (served outside this crate) owns an ApiHandler
    // against the same store. The main thread settles into periodic
    // telemetry; the sampler threads never return.
    let interval = Duration::from_secs(u64::from(config.telemetry_interval_secs));
    loop {
        thread::sleep(interval);
        let snap = store.snapshot();
        info!(
            "TELEM | T={} RH={} dist={} | mode={} | actuators={:?}",
            fmt_reading(snap.temperature_c, "\u{00b0}C"),
            fmt_reading(snap.humidity_pct, "%"),
            fmt_reading(snap.distance_cm, "cm"),
            snap.mode.label(),
            snap.actuators.bits(),
        );
    }
}

/// "--" until the first successful read, then the value with its unit.
fn fmt_reading(value: Option<f32>, unit: &str) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v:.1}{unit}"))
}
