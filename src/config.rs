//! System configuration parameters
//!
//! All tunable parameters for the ClimaBox controller. Pin numbers are not
//! configuration; they are fixed board constants in [`crate::pins`].

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sampling cadences ---
    /// Climate (temperature/humidity) sampling interval in milliseconds.
    pub climate_interval_ms: u32,
    /// Ultrasonic distance sampling interval in milliseconds.
    pub distance_interval_ms: u32,
    /// Touch input polling interval in milliseconds.
    pub touch_interval_ms: u32,

    // --- Actuation thresholds ---
    /// Temperature (Celsius) at or above which the cooler runs.
    pub cooling_threshold_c: f32,
    /// Temperature (Celsius) at or below which the heater runs.
    pub heating_threshold_c: f32,
    /// Relative humidity (%) at or above which the dehumidifier runs.
    pub dehumidify_threshold_pct: f32,

    // --- Ultrasonic timing ---
    /// Maximum time to wait for the echo line to rise and fall again.
    /// The HC-SR04 answers within ~25 ms over its rated range and holds
    /// the line ~38 ms on a miss; a bounded wait keeps a dead sensor from
    /// stalling the sampler forever.
    pub echo_timeout_us: u64,

    // --- Telemetry ---
    /// Interval between full state snapshots in the device log (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Cadences
            climate_interval_ms: 1000,
            distance_interval_ms: 1000,
            touch_interval_ms: 200,

            // Thresholds
            cooling_threshold_c: 29.0,
            heating_threshold_c: 28.0,
            dehumidify_threshold_pct: 40.0,

            // Ultrasonic
            echo_timeout_us: 30_000,

            // Telemetry
            telemetry_interval_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.climate_interval_ms > 0);
        assert!(c.distance_interval_ms > 0);
        assert!(c.touch_interval_ms > 0);
        assert!(c.echo_timeout_us > 0);
        assert!(c.dehumidify_threshold_pct > 0.0 && c.dehumidify_threshold_pct < 100.0);
    }

    #[test]
    fn touch_polls_faster_than_samplers() {
        let c = SystemConfig::default();
        assert!(
            c.touch_interval_ms < c.climate_interval_ms,
            "mode toggles must register between climate cycles"
        );
    }

    #[test]
    fn cooling_above_heating_threshold() {
        let c = SystemConfig::default();
        assert!(
            c.cooling_threshold_c > c.heating_threshold_c,
            "overlapping thresholds would make the heater branch unreachable"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.climate_interval_ms, c2.climate_interval_ms);
        assert!((c.cooling_threshold_c - c2.cooling_threshold_c).abs() < 0.001);
        assert_eq!(c.echo_timeout_us, c2.echo_timeout_us);
    }
}
