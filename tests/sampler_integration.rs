//! Full sampler cycles driven through scripted mock hardware.

mod support;

use climabox::app::api::{ApiHandler, Request, Response};
use climabox::config::SystemConfig;
use climabox::error::{Error, SensorError};
use climabox::pins;
use climabox::samplers::climate::{ClimateCycle, ClimateSampler};
use climabox::samplers::distance::DistanceSampler;
use climabox::samplers::touch::TouchMonitor;
use climabox::state::{ActuatorState, ControlMode, StateStore};

use support::MockHardware;

/// Short echo window so timeout cases finish quickly on the host.
fn fast_config() -> SystemConfig {
    SystemConfig {
        echo_timeout_us: 2_000,
        ..SystemConfig::default()
    }
}

#[test]
fn distance_cycle_stores_measurement_and_pulses_trigger() {
    let mut hw = MockHardware::new();
    hw.push_echo_pulse(3);
    let store = StateStore::new(hw);
    let sampler = DistanceSampler::new(&fast_config());

    let cm = sampler.run_cycle(&store).unwrap();
    assert!(cm >= 0.0);
    assert_eq!(store.snapshot().distance_cm, Some(cm));

    let writes = store.with_hardware(|hw, _| hw.writes.clone());
    assert!(writes.contains(&(pins::ULTRASONIC_TRIG_GPIO, true)));
    assert!(writes.contains(&(pins::ULTRASONIC_TRIG_GPIO, false)));
}

#[test]
fn dead_echo_line_times_out_and_keeps_previous_measurement() {
    let mut hw = MockHardware::new();
    hw.push_echo_pulse(3);
    let store = StateStore::new(hw);
    let sampler = DistanceSampler::new(&fast_config());

    let first = sampler.run_cycle(&store).unwrap();

    // Script exhausted: the echo line now reads permanently low.
    let err = sampler.run_cycle(&store).unwrap_err();
    assert_eq!(err, Error::Sensor(SensorError::EchoTimeout));
    assert_eq!(store.snapshot().distance_cm, Some(first));
}

#[test]
fn climate_cycle_applies_hot_humid_decision() {
    let mut hw = MockHardware::new();
    hw.push_climate(30.0, 50.0);
    let store = StateStore::new(hw);
    let sampler = ClimateSampler::new(&SystemConfig::default());

    let outcome = sampler.run_cycle(&store);
    assert_eq!(
        outcome,
        ClimateCycle::Applied(ActuatorState::new(true, false, true))
    );

    let snap = store.snapshot();
    assert_eq!(snap.temperature_c, Some(30.0));
    assert_eq!(snap.humidity_pct, Some(50.0));
    assert_eq!(snap.actuators, ActuatorState::new(true, false, true));
    assert_eq!(
        store.with_hardware(|hw, _| hw.actuator_levels()),
        [true, false, true]
    );
}

#[test]
fn climate_cycle_applies_cold_dry_decision() {
    let mut hw = MockHardware::new();
    hw.push_climate(25.0, 20.0);
    let store = StateStore::new(hw);
    let sampler = ClimateSampler::new(&SystemConfig::default());

    let outcome = sampler.run_cycle(&store);
    assert_eq!(
        outcome,
        ClimateCycle::Applied(ActuatorState::new(false, true, false))
    );
    assert_eq!(
        store.with_hardware(|hw, _| hw.actuator_levels()),
        [false, true, false]
    );
}

#[test]
fn failed_read_leaves_reading_and_actuators_unchanged() {
    let mut hw = MockHardware::new();
    hw.push_climate(30.0, 50.0);
    hw.push_climate_failure();
    let store = StateStore::new(hw);
    let sampler = ClimateSampler::new(&SystemConfig::default());

    sampler.run_cycle(&store);
    let before = store.snapshot();

    let outcome = sampler.run_cycle(&store);
    assert_eq!(outcome, ClimateCycle::ReadFailed);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn manual_mode_skips_cycle_without_touching_the_sensor() {
    let mut hw = MockHardware::new();
    hw.push_climate(30.0, 50.0);
    let store = StateStore::new(hw);
    store.set_mode(ControlMode::Manual);
    let sampler = ClimateSampler::new(&SystemConfig::default());

    let outcome = sampler.run_cycle(&store);
    assert_eq!(outcome, ClimateCycle::SkippedManual);
    assert_eq!(store.with_hardware(|hw, _| hw.climate_calls), 0);
    assert_eq!(store.snapshot().actuators, ActuatorState::all_off());
}

#[test]
fn touch_toggles_once_per_rising_edge() {
    let mut hw = MockHardware::new();
    hw.touch_script.extend([false, true, true, false, true]);
    let store = StateStore::new(hw);
    let mut monitor = TouchMonitor::new(&SystemConfig::default());

    assert_eq!(monitor.poll_cycle(&store), None);
    assert_eq!(monitor.poll_cycle(&store), Some(ControlMode::Manual));
    // Held high: no second toggle.
    assert_eq!(monitor.poll_cycle(&store), None);
    assert_eq!(monitor.poll_cycle(&store), None);
    assert_eq!(monitor.poll_cycle(&store), Some(ControlMode::Auto));

    assert_eq!(store.mode(), ControlMode::Auto);
}

#[test]
fn on_demand_refresh_with_dead_sensors_keeps_previous_data() {
    let mut hw = MockHardware::new();
    hw.push_climate(30.0, 50.0);
    hw.push_echo_pulse(3);
    let store = StateStore::new(hw);
    let api = ApiHandler::new(&fast_config());

    api.dispatch(&store, Request::RefreshData).unwrap();
    let before = store.snapshot();
    assert_eq!(before.temperature_c, Some(30.0));

    // Scripts exhausted: climate reads fail and the echo line stays low.
    let resp = api.dispatch(&store, Request::RefreshData).unwrap();
    let Response::Refreshed(snap) = resp else {
        panic!("expected Refreshed, got {resp:?}");
    };
    assert_eq!(snap, before);
}

#[test]
fn on_demand_refresh_updates_both_sensors_without_actuating() {
    let mut hw = MockHardware::new();
    hw.push_climate(27.0, 60.0);
    hw.push_echo_pulse(3);
    let store = StateStore::new(hw);
    let api = ApiHandler::new(&fast_config());

    let resp = api.dispatch(&store, Request::RefreshData).unwrap();
    let Response::Refreshed(snap) = resp else {
        panic!("expected Refreshed, got {resp:?}");
    };

    assert_eq!(snap.temperature_c, Some(27.0));
    assert_eq!(snap.humidity_pct, Some(60.0));
    assert!(snap.distance_cm.is_some());
    // 27 °C in auto mode would switch the heater on; on-demand reads
    // must not actuate.
    assert_eq!(snap.actuators, ActuatorState::all_off());
}
