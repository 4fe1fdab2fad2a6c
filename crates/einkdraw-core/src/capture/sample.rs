use crate::coords::Vec2;

/// One timestamped pointer reading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchSample {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
    /// Monotonic milliseconds.
    pub timestamp: i64,
}

impl TouchSample {
    #[inline]
    pub const fn new(x: f32, y: f32, pressure: f32, timestamp: i64) -> Self {
        Self { x, y, pressure, timestamp }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Replaces a dropped-out pressure reading with `previous`.
    ///
    /// A reading of `0` (or a non-finite one) means the sensor lost contact for
    /// that sample. The first sample of a stroke has no `previous` and keeps
    /// whatever the device reported.
    #[inline]
    pub fn with_pressure_fallback(mut self, previous: Option<f32>) -> Self {
        let dropped = !(self.pressure.is_finite() && self.pressure > 0.0);
        if let (true, Some(p)) = (dropped, previous) {
            self.pressure = p;
        } else if !self.pressure.is_finite() {
            self.pressure = 0.0;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pressure_falls_back_to_previous() {
        let s = TouchSample::new(1.0, 1.0, 0.0, 4).with_pressure_fallback(Some(0.7));
        assert_eq!(s.pressure, 0.7);
    }

    #[test]
    fn reported_pressure_is_kept() {
        let s = TouchSample::new(1.0, 1.0, 0.3, 4).with_pressure_fallback(Some(0.7));
        assert_eq!(s.pressure, 0.3);
    }

    #[test]
    fn first_sample_may_store_zero() {
        let s = TouchSample::new(1.0, 1.0, 0.0, 0).with_pressure_fallback(None);
        assert_eq!(s.pressure, 0.0);
    }

    #[test]
    fn nan_pressure_without_history_becomes_zero() {
        let s = TouchSample::new(1.0, 1.0, f32::NAN, 0).with_pressure_fallback(None);
        assert_eq!(s.pressure, 0.0);
    }
}
