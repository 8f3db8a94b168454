//! Port traits: the hexagonal boundary between the control core and
//! the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ samplers / state store (domain)
//! ```
//!
//! [`HardwarePort`] is the single driver abstraction: digital pin
//! read/write plus one climate-sensor transaction. The samplers and the
//! [`StateStore`](crate::state::StateStore) consume it via generics, so
//! the entire control core runs against mock hardware in tests.

/// One successful climate-sensor transaction.
///
/// Timestamps are applied by the caller; the driver does not know about
/// clocks, only about the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Hardware access port. The only side effects in the system flow
/// through this trait; implementations retain no state beyond the pin
/// configuration done once at init.
pub trait HardwarePort {
    /// Read the current level of a digital input pin.
    fn read_digital(&mut self, pin: i32) -> bool;

    /// Drive a digital output pin.
    fn write_digital(&mut self, pin: i32, high: bool);

    /// Run one climate-sensor transaction.
    ///
    /// Returns `None` on any protocol or checksum failure. The single-wire
    /// sensor is inherently lossy; callers treat a miss as "skip this
    /// cycle" and must not retry in a tight loop.
    fn read_climate(&mut self) -> Option<ClimateSample>;
}
