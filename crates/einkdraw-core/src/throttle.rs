//! Redraw throttling.
//!
//! E-ink panels pay a full refresh per invalidate, so not every pointer move
//! should repaint. The throttle asks for a redraw when the pen has travelled
//! far enough (a distance that grows with pen speed) or when enough time has
//! passed since the last one.

use crate::coords::Vec2;
use crate::error::ConfigError;

/// Tuning for [`RedrawThrottle`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ThrottleConfig {
    /// Minimum time between speed recomputations.
    pub speed_calc_interval_ms: i64,
    pub min_distance_px: f32,
    pub max_distance_px: f32,
    /// Time after which a redraw fires regardless of distance.
    pub update_interval_ms: i64,
    /// Speed (px/s) divided by this gives the distance threshold before clamping.
    pub speed_divisor: f32,
}

impl ThrottleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed_calc_interval_ms <= 0 {
            return Err(ConfigError::InvalidWindow {
                name: "speed_calc_interval_ms",
                value: self.speed_calc_interval_ms,
            });
        }
        if self.update_interval_ms <= 0 {
            return Err(ConfigError::InvalidWindow {
                name: "update_interval_ms",
                value: self.update_interval_ms,
            });
        }
        let (min, max) = (self.min_distance_px, self.max_distance_px);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidThreshold { min, max });
        }
        if !(self.speed_divisor.is_finite() && self.speed_divisor > 0.0) {
            return Err(ConfigError::InvalidSpeedDivisor(self.speed_divisor));
        }
        Ok(())
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            speed_calc_interval_ms: 200,
            min_distance_px: 2.0,
            max_distance_px: 5.0,
            update_interval_ms: 50,
            speed_divisor: 100.0,
        }
    }
}

/// Why a redraw was requested.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RedrawReason {
    PointerDown,
    PointerUp,
    PointerCancel,
    /// The pen moved past the speed-scaled distance threshold.
    Distance,
    /// The update interval elapsed.
    Interval,
    Undo,
    Clear,
    /// Enabled state or configuration changed something visible.
    StateChange,
}

/// A request to invalidate the drawing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RedrawSignal {
    pub reason: RedrawReason,
}

impl RedrawSignal {
    #[inline]
    pub const fn new(reason: RedrawReason) -> Self {
        Self { reason }
    }
}

/// Distance the pen must travel before a redraw at `speed` px/s.
pub fn distance_threshold(speed: f32, config: &ThrottleConfig) -> f32 {
    let raw = speed / config.speed_divisor;
    if raw.is_nan() {
        return config.min_distance_px;
    }
    raw.clamp(config.min_distance_px, config.max_distance_px)
}

/// Per-pointer throttle state.
#[derive(Debug, Clone)]
pub struct RedrawThrottle {
    config: ThrottleConfig,
    last: Vec2,
    last_update_time: i64,
    speed_anchor: Vec2,
    last_speed_calc_time: i64,
    current_speed: f32,
}

impl RedrawThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            last: Vec2::zero(),
            last_update_time: 0,
            speed_anchor: Vec2::zero(),
            last_speed_calc_time: 0,
            current_speed: 0.0,
        }
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Last computed pen speed in px/s.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Seeds the throttle at a pointer-down.
    pub fn reset(&mut self, p: Vec2, t: i64) {
        self.last = p;
        self.last_update_time = t;
        self.speed_anchor = p;
        self.last_speed_calc_time = t;
        self.current_speed = 0.0;
    }

    /// Unconditional redraw. Records `p` and `t` as the last redraw.
    pub fn force(&mut self, p: Vec2, t: i64, reason: RedrawReason) -> RedrawSignal {
        self.last = p;
        self.last_update_time = t;
        RedrawSignal::new(reason)
    }

    /// Decides whether the move to `p` at `t` warrants a redraw.
    pub fn evaluate(&mut self, p: Vec2, t: i64) -> Option<RedrawSignal> {
        let since_speed = t - self.last_speed_calc_time;
        if since_speed >= self.config.speed_calc_interval_ms {
            let px_per_ms = self.speed_anchor.distance(p) / since_speed as f32;
            self.current_speed = px_per_ms * 1000.0;
            self.speed_anchor = p;
            self.last_speed_calc_time = t;
        }

        let threshold = distance_threshold(self.current_speed, &self.config);
        let reason = if self.last.distance(p) >= threshold {
            RedrawReason::Distance
        } else if t - self.last_update_time >= self.config.update_interval_ms {
            RedrawReason::Interval
        } else {
            return None;
        };

        log::trace!(
            "redraw {reason:?}: speed={:.1}px/s threshold={threshold:.2}px",
            self.current_speed
        );
        Some(self.force(p, t, reason))
    }
}

impl Default for RedrawThrottle {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    // ── threshold ─────────────────────────────────────────────────────────

    #[test]
    fn threshold_clamps_both_ends() {
        let c = ThrottleConfig::default();
        assert_eq!(distance_threshold(1000.0, &c), 5.0);
        assert_eq!(distance_threshold(0.0, &c), 2.0);
        assert_eq!(distance_threshold(300.0, &c), 3.0);
        assert_eq!(distance_threshold(f32::NAN, &c), 2.0);
    }

    // ── evaluate ──────────────────────────────────────────────────────────

    #[test]
    fn idle_pen_fires_on_interval() {
        let mut th = RedrawThrottle::default();
        th.reset(at(10.0, 10.0), 0);
        for t in 1..50 {
            assert_eq!(th.evaluate(at(10.0, 10.0), t), None, "t={t}");
        }
        assert_eq!(
            th.evaluate(at(10.0, 10.0), 50),
            Some(RedrawSignal::new(RedrawReason::Interval))
        );
        // Interval restarts from the last signal.
        assert_eq!(th.evaluate(at(10.0, 10.0), 60), None);
    }

    #[test]
    fn slow_pen_fires_at_min_distance() {
        let mut th = RedrawThrottle::default();
        th.reset(at(0.0, 0.0), 0);
        assert_eq!(th.evaluate(at(1.0, 0.0), 1), None);
        assert_eq!(
            th.evaluate(at(2.0, 0.0), 2),
            Some(RedrawSignal::new(RedrawReason::Distance))
        );
        assert_eq!(th.evaluate(at(3.0, 0.0), 3), None);
    }

    #[test]
    fn fast_pen_widens_threshold() {
        let mut th = RedrawThrottle::default();
        th.reset(at(0.0, 0.0), 0);
        // 400 px in 200 ms -> 2000 px/s -> clamps to 5 px.
        th.evaluate(at(400.0, 0.0), 200);
        assert_eq!(th.current_speed(), 2000.0);
        assert_eq!(th.evaluate(at(403.0, 0.0), 201), None);
        assert!(th.evaluate(at(405.0, 0.0), 202).is_some());
    }

    #[test]
    fn speed_recomputed_at_most_once_per_interval() {
        let mut th = RedrawThrottle::default();
        th.reset(at(0.0, 0.0), 0);
        th.evaluate(at(100.0, 0.0), 200);
        let first = th.current_speed();
        th.evaluate(at(1000.0, 0.0), 250);
        assert_eq!(th.current_speed(), first);
    }

    #[test]
    fn force_updates_reference_point() {
        let mut th = RedrawThrottle::default();
        th.reset(at(0.0, 0.0), 0);
        let sig = th.force(at(50.0, 0.0), 10, RedrawReason::PointerUp);
        assert_eq!(sig.reason, RedrawReason::PointerUp);
        assert_eq!(th.evaluate(at(51.0, 0.0), 11), None);
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn config_validation() {
        assert!(ThrottleConfig::default().validate().is_ok());
        let bad_min = ThrottleConfig { min_distance_px: 6.0, ..Default::default() };
        assert_eq!(
            bad_min.validate(),
            Err(ConfigError::InvalidThreshold { min: 6.0, max: 5.0 })
        );
        let bad_interval = ThrottleConfig { update_interval_ms: 0, ..Default::default() };
        assert!(matches!(bad_interval.validate(), Err(ConfigError::InvalidWindow { .. })));
        let bad_div = ThrottleConfig { speed_divisor: 0.0, ..Default::default() };
        assert_eq!(bad_div.validate(), Err(ConfigError::InvalidSpeedDivisor(0.0)));
    }
}
