//! Unified error types for the ClimaBox firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the sampling loops' error handling uniform.
//! All variants are `Copy` so they can be cheaply passed across thread
//! boundaries without allocation.
//!
//! Nothing in here is fatal: every sensor or actuator failure is recovered
//! locally by the owning loop (skip this cycle, retry on the next).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or timed out.
    Sensor(SensorError),
    /// An actuator request was invalid.
    Actuator(ActuatorError),
    /// A request from the web layer failed validation.
    Api(ApiError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Api(e) => write!(f, "api: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The DHT transaction failed (no response, bad frame, bad checksum).
    /// Expected to be frequent; the single-wire protocol is lossy.
    ClimateReadFailed,
    /// The ultrasonic echo line never rose (or never fell) within the
    /// configured window. Yields "no measurement" for this cycle.
    EchoTimeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClimateReadFailed => write!(f, "climate read failed"),
            Self::EchoTimeout => write!(f, "echo timeout"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Toggle request for an index outside 0..=2. Bounds errors are
    /// reported, never silently ignored.
    IndexOutOfRange(usize),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange(i) => write!(f, "actuator index {i} out of range (0..=2)"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// API boundary errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Mode string was not one of the recognised labels ("AUTO", "MANU").
    /// The boundary rejects these instead of storing arbitrary strings.
    UnknownMode,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode => write!(f, "unrecognised mode (expected AUTO or MANU)"),
        }
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_index() {
        let e = Error::from(ActuatorError::IndexOutOfRange(7));
        assert!(e.to_string().contains('7'));
    }

    #[test]
    fn sensor_errors_convert() {
        let e: Error = SensorError::EchoTimeout.into();
        assert_eq!(e, Error::Sensor(SensorError::EchoTimeout));
        let e: Error = SensorError::ClimateReadFailed.into();
        assert_eq!(e.to_string(), "sensor: climate read failed");
    }
}
