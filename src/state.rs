//! Shared state store, the single source of truth for sensor readings,
//! control mode, and actuator bits.
//!
//! Three sampling threads, plus the request path driven by the external
//! web layer, all operate on one [`StateStore`]. The store owns both the
//! [`ControllerState`] *and* the hardware driver behind a single mutex:
//! every actuator-bit mutation writes through to the output pin inside
//! the same critical section, so store and hardware can diverge for at
//! most the duration of one lock hold. The same lock is what serialises
//! hardware access between background sampling and on-demand reads.
//!
//! No component keeps a private copy of any field across a scheduling
//! boundary; a reader always observes a per-field-consistent snapshot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::app::ports::HardwarePort;
use crate::error::{ActuatorError, Result};
use crate::pins;

// ───────────────────────────────────────────────────────────────
// Control mode
// ───────────────────────────────────────────────────────────────

/// Whether actuation follows the climate reading or manual toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Actuator bits are recomputed from the latest climate reading.
    #[default]
    #[serde(rename = "AUTO")]
    Auto,
    /// Actuator bits change only via explicit toggle requests.
    #[serde(rename = "MANU")]
    Manual,
}

impl ControlMode {
    /// Parse the wire label used by the web layer. Anything other than
    /// the two recognised labels is rejected, not stored.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AUTO" => Some(Self::Auto),
            "MANU" => Some(Self::Manual),
            _ => None,
        }
    }

    /// The wire label ("AUTO" / "MANU").
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANU",
        }
    }

    /// The other mode (one touch edge flips exactly once).
    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor data
// ───────────────────────────────────────────────────────────────

/// One successful climate acquisition. Absence (a failed read) is
/// `Option::None` at the owner, never a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Milliseconds since boot at capture time.
    pub captured_at_ms: u64,
}

/// One ultrasonic range measurement. Monotonically replaced; no history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value_cm: f32,
    /// Milliseconds since boot at capture time.
    pub captured_at_ms: u64,
}

// ───────────────────────────────────────────────────────────────
// Actuator bits
// ───────────────────────────────────────────────────────────────

/// The three actuator output bits, index-addressed 0..=2.
///
/// Mirrors the physical output pins in [`pins::ACTUATOR_GPIOS`]; the
/// store keeps them aligned by writing through on every mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActuatorState {
    bits: [bool; 3],
}

impl ActuatorState {
    pub const COOLER: usize = 0;
    pub const HEATER: usize = 1;
    pub const DEHUMIDIFIER: usize = 2;
    pub const COUNT: usize = 3;

    pub fn new(cooler: bool, heater: bool, dehumidifier: bool) -> Self {
        Self {
            bits: [cooler, heater, dehumidifier],
        }
    }

    pub fn all_off() -> Self {
        Self::default()
    }

    /// Invert exactly one bit; returns the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let bit = self
            .bits
            .get_mut(index)
            .ok_or(ActuatorError::IndexOutOfRange(index))?;
        *bit = !*bit;
        Ok(*bit)
    }

    pub fn bits(self) -> [bool; 3] {
        self.bits
    }
}

/// Drive all three output pins to match `bits`. Must be called from
/// within the store's critical section; see [`StateStore::with_hardware`].
pub fn write_actuators<D: HardwarePort>(hw: &mut D, bits: ActuatorState) {
    for (gpio, on) in pins::ACTUATOR_GPIOS.iter().zip(bits.bits()) {
        hw.write_digital(*gpio, on);
    }
}

// ───────────────────────────────────────────────────────────────
// Aggregate state
// ───────────────────────────────────────────────────────────────

/// The full controller state. Exactly one instance exists for the
/// process lifetime, owned by the [`StateStore`].
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    /// Latest climate reading; `None` until the first successful read.
    pub reading: Option<SensorReading>,
    /// Latest distance measurement; `None` until the first echo returns.
    pub distance: Option<Distance>,
    pub mode: ControlMode,
    pub actuators: ActuatorState,
}

/// Point-in-time copy of the controller state, flattened for the web
/// layer (dashboard rendering and `/update_data` payloads).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub distance_cm: Option<f32>,
    pub mode: ControlMode,
    pub actuators: ActuatorState,
}

impl From<&ControllerState> for StateSnapshot {
    fn from(state: &ControllerState) -> Self {
        Self {
            temperature_c: state.reading.map(|r| r.temperature_c),
            humidity_pct: state.reading.map(|r| r.humidity_pct),
            distance_cm: state.distance.map(|d| d.value_cm),
            mode: state.mode,
            actuators: state.actuators,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// StateStore
// ───────────────────────────────────────────────────────────────

struct Slots<D> {
    state: ControllerState,
    hw: D,
}

/// Synchronized owner of the controller state and the hardware driver.
pub struct StateStore<D: HardwarePort> {
    inner: Mutex<Slots<D>>,
}

impl<D: HardwarePort> StateStore<D> {
    /// Build the store around a driver, starting from neutral defaults:
    /// all actuators off (driven low immediately), mode Auto, no readings.
    pub fn new(mut hw: D) -> Self {
        let state = ControllerState::default();
        write_actuators(&mut hw, state.actuators);
        Self {
            inner: Mutex::new(Slots { state, hw }),
        }
    }

    /// A poisoned lock means another thread panicked mid-update; the
    /// per-field state is still well-formed, and no condition in this
    /// system is fatal, so recover the guard and keep running.
    fn lock(&self) -> MutexGuard<'_, Slots<D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consistent copy of all fields.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from(&self.lock().state)
    }

    pub fn mode(&self) -> ControlMode {
        self.lock().state.mode
    }

    /// Set the control mode; returns the previous mode. Setting the
    /// already-active mode is a no-op.
    pub fn set_mode(&self, mode: ControlMode) -> ControlMode {
        let mut guard = self.lock();
        std::mem::replace(&mut guard.state.mode, mode)
    }

    /// Flip one actuator bit and drive the matching output pin within
    /// the same critical section. Works in any mode; manual overrides
    /// are honoured, and the next Auto cycle may recompute over them.
    pub fn toggle_actuator(&self, index: usize) -> Result<bool> {
        let mut guard = self.lock();
        let slots = &mut *guard;
        let on = slots.state.actuators.toggle(index)?;
        slots.hw.write_digital(pins::ACTUATOR_GPIOS[index], on);
        Ok(on)
    }

    /// Run `f` with exclusive access to the driver and the state.
    ///
    /// This is the samplers' entry point: a whole measurement cycle
    /// (hardware transaction + state update + any actuator write-through)
    /// happens under one lock hold, which is what keeps on-demand reads,
    /// background sampling, and toggle requests from interleaving.
    pub fn with_hardware<R>(&self, f: impl FnOnce(&mut D, &mut ControllerState) -> R) -> R {
        let mut guard = self.lock();
        let slots = &mut *guard;
        f(&mut slots.hw, &mut slots.state)
    }
}
