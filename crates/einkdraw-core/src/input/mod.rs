//! Input subsystem.
//!
//! Public API is platform-agnostic. Hosts are responsible for translating
//! window-system events into `PointerEvent`s.

mod types;

pub use types::{PointerEvent, PointerId, PointerPhase};
