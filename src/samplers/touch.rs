//! Touch-input mode monitor.
//!
//! Polls the touch line at a short cadence and flips the control mode on
//! every inactive-to-active transition, exactly once per rising edge, no
//! matter how long the touch is held.
//!
//! Known limitation: there is no debounce filtering beyond the 200 ms
//! poll cadence itself. A very bouncy sensor whose bounce spans two poll
//! samples would register as two touches.

use std::thread;
use std::time::Duration;

use log::info;

use crate::app::ports::HardwarePort;
use crate::config::SystemConfig;
use crate::pins;
use crate::state::{ControlMode, StateStore};

pub struct TouchMonitor {
    interval: Duration,
    /// Level observed on the previous poll; edge = !last && current.
    last_level: bool,
}

impl TouchMonitor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(config.touch_interval_ms)),
            last_level: false,
        }
    }

    /// Perpetual polling loop.
    pub fn run<D: HardwarePort>(mut self, store: &StateStore<D>) -> ! {
        loop {
            self.poll_cycle(store);
            thread::sleep(self.interval);
        }
    }

    /// One poll. Returns the new mode when a rising edge toggled it.
    pub fn poll_cycle<D: HardwarePort>(&mut self, store: &StateStore<D>) -> Option<ControlMode> {
        let last = self.last_level;
        let toggled_to = store.with_hardware(|hw, state| {
            let level = hw.read_digital(pins::TOUCH_GPIO);
            let rising = level && !last;
            if rising {
                state.mode = state.mode.toggled();
            }
            (level, rising.then_some(state.mode))
        });

        let (level, toggled_to) = toggled_to;
        self.last_level = level;

        if let Some(mode) = toggled_to {
            info!("MODE | touch toggle -> {}", mode.label());
        }
        toggled_to
    }
}
