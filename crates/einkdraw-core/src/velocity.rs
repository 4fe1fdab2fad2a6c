//! Two-point velocity estimate.

use crate::capture::TouchSample;
use crate::coords::Vec2;

/// Pointer velocity in px/ms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity {
    #[inline]
    pub const fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    /// Magnitude in px/ms.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }

    /// Displacement covered after `ms` milliseconds at this velocity.
    #[inline]
    pub fn offset(&self, ms: f32) -> Vec2 {
        Vec2::new(self.vx * ms, self.vy * ms)
    }
}

/// Estimates velocity from the oldest and newest of `points`.
///
/// Intermediate samples are ignored. Returns `None` for fewer than two points
/// or when the time span is not positive.
pub fn estimate(points: &[TouchSample]) -> Option<Velocity> {
    let (oldest, newest) = match points {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let dt = newest.timestamp - oldest.timestamp;
    if dt <= 0 {
        return None;
    }

    let dt = dt as f32;
    let v = Velocity::new((newest.x - oldest.x) / dt, (newest.y - oldest.y) / dt);
    (v.vx.is_finite() && v.vy.is_finite()).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f32, y: f32, t: i64) -> TouchSample {
        TouchSample::new(x, y, 1.0, t)
    }

    #[test]
    fn horizontal_motion() {
        let v = estimate(&[s(0.0, 0.0, 0), s(10.0, 0.0, 5)]).unwrap();
        assert_eq!(v, Velocity::new(2.0, 0.0));
        assert_eq!(v.speed(), 2.0);
    }

    #[test]
    fn uses_only_extremes() {
        let v = estimate(&[s(0.0, 0.0, 0), s(100.0, -50.0, 1), s(4.0, 8.0, 4)]).unwrap();
        assert_eq!(v, Velocity::new(1.0, 2.0));
    }

    #[test]
    fn needs_two_points() {
        assert!(estimate(&[]).is_none());
        assert!(estimate(&[s(1.0, 1.0, 3)]).is_none());
    }

    #[test]
    fn zero_elapsed_time_fails() {
        assert!(estimate(&[s(0.0, 0.0, 7), s(3.0, 0.0, 7)]).is_none());
    }

    #[test]
    fn offset_scales_by_time() {
        let v = Velocity::new(0.5, -1.0);
        assert_eq!(v.offset(10.0), Vec2::new(5.0, -10.0));
    }
}
