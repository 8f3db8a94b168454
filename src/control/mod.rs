//! Control logic: pure functions, no hardware, fully host-testable.

pub mod decision;
