//! Hardware adapter: bridges real pins to the [`HardwarePort`] trait.
//!
//! This is the only `HardwarePort` implementation that touches actual
//! hardware. On non-espidf targets the underlying drivers use cfg-gated
//! simulation stubs, so the adapter itself is target-agnostic.

use crate::app::ports::{ClimateSample, HardwarePort};
use crate::drivers::{dht, hw_init};
use crate::pins;

/// Concrete adapter over the board's GPIO and the DHT11 sensor.
pub struct BoardHardware;

impl BoardHardware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BoardHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwarePort for BoardHardware {
    fn read_digital(&mut self, pin: i32) -> bool {
        hw_init::gpio_read(pin)
    }

    fn write_digital(&mut self, pin: i32, high: bool) {
        hw_init::gpio_write(pin, high);
    }

    fn read_climate(&mut self) -> Option<ClimateSample> {
        dht::read(pins::DHT_DATA_GPIO)
    }
}
