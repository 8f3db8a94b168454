//! GPIO pin assignments for the ClimaBox controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Actuator outputs (relay/LED channels)
// ---------------------------------------------------------------------------

/// Actuator output pins, index-addressed: 0 = cooler, 1 = heater,
/// 2 = dehumidifier. The index order is part of the web API contract
/// (`/toggle_led/<index>`).
pub const ACTUATOR_GPIOS: [i32; 3] = [22, 23, 24];

// ---------------------------------------------------------------------------
// Touch sensor (mode toggle)
// ---------------------------------------------------------------------------

/// Capacitive touch module output. HIGH while touched.
pub const TOUCH_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs trigger pulse starts a measurement.
pub const ULTRASONIC_TRIG_GPIO: i32 = 17;
/// Digital input: echo line goes HIGH for the round-trip duration.
pub const ULTRASONIC_ECHO_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Climate sensor (DHT11, single-wire)
// ---------------------------------------------------------------------------

/// Bidirectional data line for the DHT11 temperature/humidity sensor.
pub const DHT_DATA_GPIO: i32 = 4;
