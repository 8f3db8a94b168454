//! Climate sampler: periodic temperature/humidity acquisition plus the
//! automatic actuation that follows from it.
//!
//! One cycle, all inside the store's critical section: check the mode
//! (work happens only in Auto), run a DHT transaction, store the reading,
//! run the decision function, and write the resulting actuator bits both
//! to the store and to the output pins. A failed read changes nothing;
//! stale actuator state is preferred over guessing, and the next cycle
//! retries automatically. The loop sleeps for its full cadence regardless
//! of outcome; sensor misses are frequent and transient, so there is no
//! backoff.

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::adapters::time::MonotonicTime;
use crate::app::ports::HardwarePort;
use crate::config::SystemConfig;
use crate::control::decision::decide;
use crate::state::{write_actuators, ActuatorState, ControlMode, SensorReading, StateStore};

/// Outcome of one sampling cycle, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateCycle {
    /// A reading was stored and the decision applied to the actuators.
    Applied(ActuatorState),
    /// Mode is Manual; the sampler idles without touching hardware.
    SkippedManual,
    /// The sensor transaction failed; reading and actuators unchanged.
    ReadFailed,
}

pub struct ClimateSampler {
    interval: Duration,
    config: SystemConfig,
    clock: MonotonicTime,
}

impl ClimateSampler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(config.climate_interval_ms)),
            config: config.clone(),
            clock: MonotonicTime::new(),
        }
    }

    /// Perpetual sampling loop.
    pub fn run<D: HardwarePort>(self, store: &StateStore<D>) -> ! {
        loop {
            self.run_cycle(store);
            thread::sleep(self.interval);
        }
    }

    /// One acquisition/actuation cycle.
    pub fn run_cycle<D: HardwarePort>(&self, store: &StateStore<D>) -> ClimateCycle {
        let outcome = store.with_hardware(|hw, state| {
            if state.mode != ControlMode::Auto {
                return ClimateCycle::SkippedManual;
            }

            match hw.read_climate() {
                Some(sample) => {
                    state.reading = Some(SensorReading {
                        temperature_c: sample.temperature_c,
                        humidity_pct: sample.humidity_pct,
                        captured_at_ms: self.clock.uptime_ms(),
                    });
                    let next = decide(&self.config, sample.temperature_c, sample.humidity_pct);
                    state.actuators = next;
                    write_actuators(hw, next);
                    ClimateCycle::Applied(next)
                }
                None => ClimateCycle::ReadFailed,
            }
        });

        match outcome {
            ClimateCycle::Applied(bits) => {
                debug!("CLIM | decision applied, actuators={:?}", bits.bits());
            }
            ClimateCycle::SkippedManual => {}
            ClimateCycle::ReadFailed => warn!("CLIM | sensor read failed; skipping cycle"),
        }
        outcome
    }
}
