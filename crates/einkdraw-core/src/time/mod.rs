//! Time subsystem.
//!
//! The pipeline never reads system time directly. It asks an injected
//! [`Clock`] so hosts control the time base and tests stay deterministic.

mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
