//! Adapters: concrete implementations at the hardware/time boundary.
//!
//! | Adapter    | Implements     | Connects to                     |
//! |------------|----------------|---------------------------------|
//! | `hardware` | `HardwarePort` | ESP32 GPIO + DHT11 single-wire  |
//! | `time`     | none           | ESP32 high-resolution timer     |

pub mod hardware;
pub mod time;
