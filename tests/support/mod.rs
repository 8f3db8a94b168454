//! Recording mock hardware for integration tests.
//!
//! Records every pin write so tests can assert on the full output
//! history, and replays scripted input levels / sensor transactions so
//! whole sampling cycles run without real GPIO.

#![allow(dead_code)] // each test binary uses a subset of the helpers

use std::collections::{HashMap, VecDeque};

use climabox::app::ports::{ClimateSample, HardwarePort};
use climabox::pins;

pub struct MockHardware {
    /// Last written level per output pin.
    pub levels: HashMap<i32, bool>,
    /// Full write history (pin, level).
    pub writes: Vec<(i32, bool)>,
    /// Successive levels returned for the echo pin; when exhausted, reads low.
    pub echo_script: VecDeque<bool>,
    /// Successive levels returned for the touch pin; when exhausted, reads low.
    pub touch_script: VecDeque<bool>,
    /// Successive climate transaction results; when exhausted, reads fail.
    pub climate_script: VecDeque<Option<ClimateSample>>,
    /// Number of climate transactions attempted.
    pub climate_calls: usize,
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            levels: HashMap::new(),
            writes: Vec::new(),
            echo_script: VecDeque::new(),
            touch_script: VecDeque::new(),
            climate_script: VecDeque::new(),
            climate_calls: 0,
        }
    }

    /// Queue one successful climate transaction.
    pub fn push_climate(&mut self, temperature_c: f32, humidity_pct: f32) {
        self.climate_script.push_back(Some(ClimateSample {
            temperature_c,
            humidity_pct,
        }));
    }

    /// Queue one failed climate transaction.
    pub fn push_climate_failure(&mut self) {
        self.climate_script.push_back(None);
    }

    /// Queue a plausible echo pulse: one low poll, `high_polls` high
    /// polls, then low again.
    pub fn push_echo_pulse(&mut self, high_polls: usize) {
        self.echo_script.push_back(false);
        for _ in 0..high_polls {
            self.echo_script.push_back(true);
        }
        self.echo_script.push_back(false);
    }

    /// Current levels of the three actuator output pins.
    pub fn actuator_levels(&self) -> [bool; 3] {
        let mut out = [false; 3];
        for (i, gpio) in pins::ACTUATOR_GPIOS.iter().enumerate() {
            out[i] = self.levels.get(gpio).copied().unwrap_or(false);
        }
        out
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwarePort for MockHardware {
    fn read_digital(&mut self, pin: i32) -> bool {
        if pin == pins::ULTRASONIC_ECHO_GPIO {
            self.echo_script.pop_front().unwrap_or(false)
        } else if pin == pins::TOUCH_GPIO {
            self.touch_script.pop_front().unwrap_or(false)
        } else {
            self.levels.get(&pin).copied().unwrap_or(false)
        }
    }

    fn write_digital(&mut self, pin: i32, high: bool) {
        self.levels.insert(pin, high);
        self.writes.push((pin, high));
    }

    fn read_climate(&mut self) -> Option<ClimateSample> {
        self.climate_calls += 1;
        self.climate_script.pop_front().unwrap_or(None)
    }
}
