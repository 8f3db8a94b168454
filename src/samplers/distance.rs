//! Ultrasonic distance sampler (HC-SR04).
//!
//! One cycle: emit a 10 µs trigger pulse, wait for the echo line to rise
//! and fall again, convert the high-pulse width to centimetres. The whole
//! cycle (trigger, wait, state update) runs inside the store's critical
//! section so it can never interleave with an on-demand measurement.
//!
//! The echo wait is bounded: a dead or disconnected ranger yields
//! [`SensorError::EchoTimeout`] for the cycle instead of stalling the
//! thread, and the previous measurement is retained until overwritten.

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::adapters::time::MonotonicTime;
use crate::app::ports::HardwarePort;
use crate::config::SystemConfig;
use crate::error::{Result, SensorError};
use crate::pins;
use crate::state::{Distance, StateStore};

/// Speed of sound at room temperature, in cm/s.
const SPEED_OF_SOUND_CM_PER_S: f32 = 34_300.0;
/// HC-SR04 datasheet trigger pulse width.
const TRIGGER_PULSE_US: u64 = 10;

pub struct DistanceSampler {
    interval: Duration,
    timeout_us: u64,
    clock: MonotonicTime,
}

impl DistanceSampler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(config.distance_interval_ms)),
            timeout_us: config.echo_timeout_us,
            clock: MonotonicTime::new(),
        }
    }

    /// Perpetual sampling loop; one measurement per cadence interval.
    /// Timeouts are recovered locally; nothing escapes this loop.
    pub fn run<D: HardwarePort>(self, store: &StateStore<D>) -> ! {
        loop {
            let _ = self.run_cycle(store);
            thread::sleep(self.interval);
        }
    }

    /// One measurement cycle. On success the store's distance field is
    /// replaced; on timeout it is left untouched.
    pub fn run_cycle<D: HardwarePort>(&self, store: &StateStore<D>) -> Result<f32> {
        let result = store.with_hardware(|hw, state| {
            let value_cm = measure(hw, &self.clock, self.timeout_us)?;
            state.distance = Some(Distance {
                value_cm,
                captured_at_ms: self.clock.uptime_ms(),
            });
            Ok(value_cm)
        });

        match &result {
            Ok(cm) => debug!("DIST | {:.1} cm", cm),
            Err(e) => warn!("DIST | {e}; keeping previous measurement"),
        }
        result
    }
}

/// Trigger one ranging cycle and time the echo pulse.
///
/// Also used by the on-demand refresh path, which runs it inside the
/// same critical section as its climate read.
pub(crate) fn measure<D: HardwarePort>(
    hw: &mut D,
    clock: &MonotonicTime,
    timeout_us: u64,
) -> core::result::Result<f32, SensorError> {
    // Trigger pulse.
    hw.write_digital(pins::ULTRASONIC_TRIG_GPIO, true);
    let pulse_start = clock.uptime_us();
    while clock.uptime_us() - pulse_start < TRIGGER_PULSE_US {}
    hw.write_digital(pins::ULTRASONIC_TRIG_GPIO, false);

    // Echo rise, then fall, each under its own bounded window.
    let rise = wait_for_echo(hw, clock, true, timeout_us)?;
    let fall = wait_for_echo(hw, clock, false, timeout_us)?;

    let elapsed_secs = (fall - rise) as f32 / 1_000_000.0;
    Ok(elapsed_secs * SPEED_OF_SOUND_CM_PER_S / 2.0)
}

/// Busy-wait until the echo line reads `level`; returns the µs timestamp
/// of the transition, or times out.
fn wait_for_echo<D: HardwarePort>(
    hw: &mut D,
    clock: &MonotonicTime,
    level: bool,
    timeout_us: u64,
) -> core::result::Result<u64, SensorError> {
    let deadline = clock.uptime_us() + timeout_us;
    loop {
        if hw.read_digital(pins::ULTRASONIC_ECHO_GPIO) == level {
            return Ok(clock.uptime_us());
        }
        if clock.uptime_us() > deadline {
            return Err(SensorError::EchoTimeout);
        }
    }
}
