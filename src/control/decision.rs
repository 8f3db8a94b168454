//! Automatic actuation decision.
//!
//! Maps a climate reading to the three actuator bits. Pure and
//! deterministic: identical inputs always yield identical outputs, and
//! nothing in here touches hardware or the store.

use crate::config::SystemConfig;
use crate::state::ActuatorState;

/// Decide the actuator state for one climate reading (Auto mode only;
/// in Manual mode this function is never invoked).
///
/// Branch order matters and is part of the contract: the cooling branch
/// is evaluated before the heating branch, so a temperature meeting both
/// thresholds (impossible with the defaults, possible if they are
/// reconfigured to overlap) cools rather than heats. The trailing
/// all-off fallback fires only for temperatures strictly between the two
/// thresholds; with the default 29/28 split that is the open interval
/// (28, 29), which a 1 °C-resolution sensor never reports. Whether an
/// intentional dead band is wanted there is an open product question;
/// the fallback is retained as-is rather than widened or removed.
pub fn decide(config: &SystemConfig, temperature_c: f32, humidity_pct: f32) -> ActuatorState {
    let dehumidify = humidity_pct >= config.dehumidify_threshold_pct;

    if temperature_c >= config.cooling_threshold_c {
        ActuatorState::new(true, false, dehumidify)
    } else if temperature_c <= config.heating_threshold_c {
        ActuatorState::new(false, true, dehumidify)
    } else {
        ActuatorState::all_off()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SystemConfig {
        SystemConfig::default()
    }

    #[test]
    fn hot_and_humid_cools_and_dehumidifies() {
        assert_eq!(
            decide(&cfg(), 30.0, 50.0),
            ActuatorState::new(true, false, true)
        );
    }

    #[test]
    fn cold_and_dry_heats_only() {
        assert_eq!(
            decide(&cfg(), 25.0, 20.0),
            ActuatorState::new(false, true, false)
        );
    }

    #[test]
    fn boundary_temperatures_pick_their_branch() {
        // Exactly 29 takes the cooling branch, exactly 28 the heating branch.
        assert_eq!(
            decide(&cfg(), 29.0, 0.0),
            ActuatorState::new(true, false, false)
        );
        assert_eq!(
            decide(&cfg(), 28.0, 0.0),
            ActuatorState::new(false, true, false)
        );
    }

    #[test]
    fn humidity_boundary_is_inclusive() {
        assert_eq!(
            decide(&cfg(), 30.0, 40.0),
            ActuatorState::new(true, false, true)
        );
        assert_eq!(
            decide(&cfg(), 30.0, 39.9),
            ActuatorState::new(true, false, false)
        );
    }

    #[test]
    fn fractional_gap_hits_the_fallback() {
        // Inherited behaviour: strictly between the thresholds everything
        // is off. Reachable only with fractional readings.
        assert_eq!(decide(&cfg(), 28.5, 90.0), ActuatorState::all_off());
    }
}
