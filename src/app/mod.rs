//! Application boundary: the port traits and the request surface the
//! external web layer talks to.

pub mod api;
pub mod ports;
