use std::fmt;

use crate::coords::Vec2;

/// Identifier of one contact (finger, pen tip or mouse button).
///
/// Ids are only required to be unique among contacts that are down at the
/// same time; hosts may reuse them once a contact lifts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointerId(pub u64);

impl PointerId {
    /// Conventional id for the primary mouse button.
    pub const MOUSE: PointerId = PointerId(0);
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of a pointer event.
///
/// Hosts translate platform action codes into these before calling the core.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform aborted the gesture (palm rejection, focus loss, ...).
    Cancel,
}

/// Platform-agnostic pointer event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    /// Normalized pressure. `0` is treated as a sensor dropout after the first
    /// sample of a stroke.
    pub pressure: f32,
    /// Monotonic milliseconds, same time base as the surface clock.
    pub timestamp: i64,
}

impl PointerEvent {
    #[inline]
    pub fn new(id: PointerId, phase: PointerPhase, x: f32, y: f32, pressure: f32, timestamp: i64) -> Self {
        Self { id, phase, x, y, pressure, timestamp }
    }

    #[inline]
    pub fn down(id: PointerId, x: f32, y: f32, pressure: f32, timestamp: i64) -> Self {
        Self::new(id, PointerPhase::Down, x, y, pressure, timestamp)
    }

    #[inline]
    pub fn moved(id: PointerId, x: f32, y: f32, pressure: f32, timestamp: i64) -> Self {
        Self::new(id, PointerPhase::Move, x, y, pressure, timestamp)
    }

    #[inline]
    pub fn up(id: PointerId, x: f32, y: f32, pressure: f32, timestamp: i64) -> Self {
        Self::new(id, PointerPhase::Up, x, y, pressure, timestamp)
    }

    #[inline]
    pub fn cancel(id: PointerId, x: f32, y: f32, timestamp: i64) -> Self {
        Self::new(id, PointerPhase::Cancel, x, y, 0.0, timestamp)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
