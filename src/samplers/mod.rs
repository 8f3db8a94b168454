//! Sampling loops: one perpetual, independently scheduled loop per input.
//!
//! Each sampler exposes a single-cycle entry point (`run_cycle` /
//! `poll_cycle`) that integration tests drive directly, and a `run`
//! method that loops it forever at the configured cadence. `main()`
//! spawns one thread per sampler; the threads are daemon-like and only
//! stop when the process exits.
//!
//! No ordering is guaranteed across the loops; each owns exactly one
//! field of the state store with last-write-wins semantics, and all
//! cross-loop coordination happens through the store's single lock.

pub mod climate;
pub mod distance;
pub mod touch;

use std::io;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::app::ports::HardwarePort;
use crate::config::SystemConfig;
use crate::state::StateStore;

/// Thread stack size for the sampling loops. The climate loop formats
/// log lines and runs the DHT transaction; 8 KiB is comfortable on
/// ESP-IDF where the default task stack is tight.
const SAMPLER_STACK_BYTES: usize = 8 * 1024;

/// Spawn the three sampling threads against a shared store.
pub fn spawn_all<D>(
    store: &Arc<StateStore<D>>,
    config: &SystemConfig,
) -> io::Result<Vec<JoinHandle<()>>>
where
    D: HardwarePort + Send + 'static,
{
    let mut handles = Vec::with_capacity(3);

    let climate = climate::ClimateSampler::new(config);
    let climate_store = Arc::clone(store);
    handles.push(
        std::thread::Builder::new()
            .name("climate".into())
            .stack_size(SAMPLER_STACK_BYTES)
            .spawn(move || climate.run(&climate_store))?,
    );

    let distance = distance::DistanceSampler::new(config);
    let distance_store = Arc::clone(store);
    handles.push(
        std::thread::Builder::new()
            .name("distance".into())
            .stack_size(SAMPLER_STACK_BYTES)
            .spawn(move || distance.run(&distance_store))?,
    );

    let touch = touch::TouchMonitor::new(config);
    let touch_store = Arc::clone(store);
    handles.push(
        std::thread::Builder::new()
            .name("touch".into())
            .stack_size(SAMPLER_STACK_BYTES)
            .spawn(move || touch.run(&touch_store))?,
    );

    Ok(handles)
}
