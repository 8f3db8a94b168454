//! Request surface for the external web layer.
//!
//! The HTTP server, routing, and dashboard rendering live outside this
//! crate; they translate each endpoint into a [`Request`] and serve the
//! [`Response`] (usually via [`Response::to_json`]). This module is where
//! boundary validation happens: unknown mode strings and out-of-range
//! actuator indices are rejected with typed errors instead of being
//! silently stored.
//!
//! | Endpoint               | Request                    |
//! |------------------------|----------------------------|
//! | `GET /`                | `Request::Dashboard`       |
//! | `/change_mode/<mode>`  | `Request::ChangeMode(..)`  |
//! | `/toggle_led/<index>`  | `Request::ToggleActuator(..)` |
//! | `GET /update_data`     | `Request::RefreshData`     |

use log::{info, warn};
use serde_json::{json, Value};

use crate::adapters::time::MonotonicTime;
use crate::app::ports::HardwarePort;
use crate::config::SystemConfig;
use crate::error::{ApiError, Result, SensorError};
use crate::samplers::distance;
use crate::state::{ControlMode, Distance, SensorReading, StateSnapshot, StateStore};

/// One decoded web request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Full state for dashboard rendering.
    Dashboard,
    /// Set the control mode from its wire label ("AUTO" / "MANU").
    ChangeMode(&'a str),
    /// Flip one actuator bit (index 0..=2), writing through to hardware.
    ToggleActuator(usize),
    /// Immediate on-demand climate + distance read.
    RefreshData,
}

/// Typed reply, convertible to the JSON the web layer serves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    Dashboard(StateSnapshot),
    ModeChanged(ControlMode),
    ActuatorToggled { index: usize, on: bool },
    Refreshed(StateSnapshot),
}

impl Response {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Dashboard(snap) | Self::Refreshed(snap) => {
                serde_json::to_value(snap).unwrap_or(Value::Null)
            }
            Self::ModeChanged(mode) => json!({
                "message": format!("mode changed to {}", mode.label()),
                "mode": mode.label(),
            }),
            Self::ActuatorToggled { index, on } => json!({
                "message": format!("actuator {index} toggled"),
                "index": index,
                "on": on,
            }),
        }
    }
}

/// Stateless request handler; the web layer owns one for the process
/// lifetime and calls [`dispatch`](Self::dispatch) per request.
pub struct ApiHandler {
    config: SystemConfig,
    clock: MonotonicTime,
}

impl ApiHandler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            config: config.clone(),
            clock: MonotonicTime::new(),
        }
    }

    pub fn dispatch<D: HardwarePort>(
        &self,
        store: &StateStore<D>,
        request: Request<'_>,
    ) -> Result<Response> {
        match request {
            Request::Dashboard => Ok(Response::Dashboard(store.snapshot())),

            Request::ChangeMode(label) => {
                let mode = ControlMode::from_label(label).ok_or(ApiError::UnknownMode)?;
                let previous = store.set_mode(mode);
                if previous != mode {
                    info!("MODE | web override {} -> {}", previous.label(), mode.label());
                }
                Ok(Response::ModeChanged(mode))
            }

            Request::ToggleActuator(index) => {
                let on = store.toggle_actuator(index)?;
                info!("ACT  | web toggle index={} -> {}", index, on);
                Ok(Response::ActuatorToggled { index, on })
            }

            Request::RefreshData => Ok(Response::Refreshed(self.refresh(store))),
        }
    }

    /// On-demand read of both sensors in one critical section, so it can
    /// never interleave mid-measurement with the background samplers.
    /// Failures leave the respective field untouched; the returned
    /// snapshot always reflects the freshest data available. The
    /// actuation decision is not run here; that stays with the climate
    /// sampler's cycle.
    fn refresh<D: HardwarePort>(&self, store: &StateStore<D>) -> StateSnapshot {
        store.with_hardware(|hw, state| {
            match hw.read_climate() {
                Some(sample) => {
                    state.reading = Some(SensorReading {
                        temperature_c: sample.temperature_c,
                        humidity_pct: sample.humidity_pct,
                        captured_at_ms: self.clock.uptime_ms(),
                    });
                }
                None => warn!(
                    "CLIM | {} during on-demand read",
                    SensorError::ClimateReadFailed
                ),
            }

            match distance::measure(hw, &self.clock, self.config.echo_timeout_us) {
                Ok(value_cm) => {
                    state.distance = Some(Distance {
                        value_cm,
                        captured_at_ms: self.clock.uptime_ms(),
                    });
                }
                Err(e) => warn!("DIST | {e} during on-demand read"),
            }

            StateSnapshot::from(&*state)
        })
    }
}
