//! DHT11 temperature/humidity sensor (single-wire, bit-banged).
//!
//! One transaction: the host holds the data line low for ~18 ms, releases
//! it, the sensor answers with an 80 µs low + 80 µs high preamble and then
//! 40 bits (50 µs low, then ~27 µs high = 0 / ~70 µs high = 1), followed by
//! a one-byte checksum. Any timing or checksum miss aborts the transaction;
//! the protocol is lossy and callers simply skip the cycle.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the GPIO with `esp_timer_get_time` timing.
//! On host/test: reads from static atomics for injection.

use crate::app::ports::ClimateSample;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

// ── Host simulation hooks ─────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_MILLI_C: AtomicI32 = AtomicI32::new(25_000);
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_MILLI_PCT: AtomicI32 = AtomicI32::new(50_000);
#[cfg(not(target_os = "espidf"))]
static SIM_FAILING: AtomicBool = AtomicBool::new(false);

/// Inject the values the simulated sensor reports.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_MILLI_C.store((temperature_c * 1000.0) as i32, Ordering::Relaxed);
    SIM_HUM_MILLI_PCT.store((humidity_pct * 1000.0) as i32, Ordering::Relaxed);
}

/// Make the simulated sensor fail every transaction.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failing(failing: bool) {
    SIM_FAILING.store(failing, Ordering::Relaxed);
}

// ── Public entry point ────────────────────────────────────────

/// Run one DHT11 transaction on `pin`. `None` on any failure.
#[cfg(not(target_os = "espidf"))]
pub fn read(_pin: i32) -> Option<ClimateSample> {
    if SIM_FAILING.load(Ordering::Relaxed) {
        return None;
    }
    Some(ClimateSample {
        temperature_c: SIM_TEMP_MILLI_C.load(Ordering::Relaxed) as f32 / 1000.0,
        humidity_pct: SIM_HUM_MILLI_PCT.load(Ordering::Relaxed) as f32 / 1000.0,
    })
}

/// Run one DHT11 transaction on `pin`. `None` on any failure.
#[cfg(target_os = "espidf")]
pub fn read(pin: i32) -> Option<ClimateSample> {
    let bytes = transaction(pin)?;
    decode(bytes)
}

// ── Wire protocol (ESP-IDF only) ──────────────────────────────

#[cfg(target_os = "espidf")]
mod wire {
    use esp_idf_svc::sys::*;

    /// Wait until the line reads `level`, up to `timeout_us`.
    /// Returns the wait duration in µs, or `None` on timeout.
    pub fn wait_for_level(pin: i32, level: bool, timeout_us: u64) -> Option<u64> {
        // SAFETY: esp_timer_get_time and gpio_get_level are read-only
        // register accesses, safe from any task context.
        let start = unsafe { esp_timer_get_time() } as u64;
        loop {
            let now = unsafe { esp_timer_get_time() } as u64;
            if (unsafe { gpio_get_level(pin) } != 0) == level {
                return Some(now - start);
            }
            if now - start > timeout_us {
                return None;
            }
        }
    }

    pub fn set_output_low(pin: i32) {
        // SAFETY: direction/level writes on a pin this driver owns for
        // the duration of the transaction (store lock held by caller).
        unsafe {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT);
            gpio_set_level(pin, 0);
        }
    }

    pub fn release_to_input(pin: i32) {
        // SAFETY: as above; pull-up keeps the released line high.
        unsafe {
            gpio_set_level(pin, 1);
            esp_rom_delay_us(30);
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
            gpio_set_pull_mode(pin, gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        }
    }
}

/// Clock one full 40-bit frame off the wire.
#[cfg(target_os = "espidf")]
fn transaction(pin: i32) -> Option<[u8; 5]> {
    // Start signal: >18 ms low, then release.
    wire::set_output_low(pin);
    std::thread::sleep(std::time::Duration::from_millis(20));
    wire::release_to_input(pin);

    // Sensor preamble: 80 µs low, 80 µs high, then the first bit's low.
    wire::wait_for_level(pin, false, 90)?;
    wire::wait_for_level(pin, true, 90)?;
    wire::wait_for_level(pin, false, 90)?;

    let mut bytes = [0u8; 5];
    for bit in 0..40 {
        // 50 µs low gap, then a high pulse whose width encodes the bit.
        wire::wait_for_level(pin, true, 70)?;
        let high_us = wire::wait_for_level(pin, false, 100)?;
        if high_us > 48 {
            bytes[bit / 8] |= 1 << (7 - bit % 8);
        }
    }
    Some(bytes)
}

/// Validate the checksum and convert to engineering units.
#[cfg(target_os = "espidf")]
fn decode(bytes: [u8; 5]) -> Option<ClimateSample> {
    let [hum_int, hum_dec, temp_int, temp_dec, checksum] = bytes;
    let sum = hum_int
        .wrapping_add(hum_dec)
        .wrapping_add(temp_int)
        .wrapping_add(temp_dec);
    if sum != checksum {
        return None;
    }
    // DHT11 reports integer degrees/percent; the decimal bytes are zero
    // on most units but are honoured when present.
    Some(ClimateSample {
        temperature_c: f32::from(temp_int) + f32::from(temp_dec) / 10.0,
        humidity_pct: f32::from(hum_int) + f32::from(hum_dec) / 10.0,
    })
}
