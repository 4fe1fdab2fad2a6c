//! Stroke prediction.
//!
//! A predictor reads the trailing samples of the active stroke and returns a
//! short speculative polyline that starts at the pen and runs ahead of it. The
//! segment is display-only; it is never merged into a committed stroke.
//!
//! Predictors are stateless across calls. Everything they need (history,
//! current time and tuning) is passed in, so the surface can swap variants at
//! any point without migrating state.

mod kalman;
pub mod linalg;
mod quadratic;

use std::fmt;
use std::str::FromStr;

use crate::capture::SampleBuffer;
use crate::coords::Vec2;
use crate::error::ConfigError;

pub use kalman::{KalmanFilter, KalmanPredictor, DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE};
pub use quadratic::{fit_quadratic, QuadraticFit, QuadraticPredictor, MAX_WALK_STEPS, WALK_STEP_PX};

/// Default history considered by predictors, in milliseconds.
pub const HISTORY_DURATION_MS: i64 = 5;

/// Default lookahead, in milliseconds.
pub const DEFAULT_LOOKAHEAD_MS: i64 = 10;

/// Tuning shared by every predictor variant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PredictorConfig {
    /// How far ahead in time the segment should reach.
    pub lookahead_ms: i64,
    /// Scales the extrapolated distance.
    pub speed_multiplier: f32,
}

impl PredictorConfig {
    pub fn new(lookahead_ms: i64, speed_multiplier: f32) -> Result<Self, ConfigError> {
        let config = Self { lookahead_ms, speed_multiplier };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead_ms < 0 {
            return Err(ConfigError::InvalidLookahead(self.lookahead_ms));
        }
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier >= 0.0) {
            return Err(ConfigError::InvalidSpeedMultiplier(self.speed_multiplier));
        }
        Ok(())
    }

    /// Distance in px covered at `speed` (px/ms) over the scaled lookahead.
    #[inline]
    pub fn lookahead_distance(&self, speed: f32) -> f32 {
        speed * self.lookahead_ms as f32 * self.speed_multiplier
    }

    /// Scaled lookahead in ms, for predictors that extrapolate by velocity.
    #[inline]
    pub fn scaled_lookahead_ms(&self) -> f32 {
        self.lookahead_ms as f32 * self.speed_multiplier
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            lookahead_ms: DEFAULT_LOOKAHEAD_MS,
            speed_multiplier: 1.0,
        }
    }
}

/// Speculative polyline ahead of the pen.
///
/// Invariant: at least two points, all finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedSegment {
    points: Vec<Vec2>,
}

impl PredictedSegment {
    /// Wraps `points`, rejecting short or non-finite input.
    pub fn from_points(points: Vec<Vec2>) -> Option<Self> {
        if points.len() < 2 || !points.iter().all(|p| p.is_finite()) {
            return None;
        }
        Some(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// First point; the real pen position the segment starts from.
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Arc length in px.
    pub fn arc_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Extrapolates the active stroke.
pub trait StrokePredictor {
    fn kind(&self) -> PredictorKind;

    /// Predicts from the samples in `history` that are recent relative to
    /// `now_ms`. Returns `None` whenever there is not enough usable data.
    fn predict(
        &self,
        history: &SampleBuffer,
        now_ms: i64,
        config: &PredictorConfig,
    ) -> Option<PredictedSegment>;
}

/// Built-in predictor variants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PredictorKind {
    /// Least-squares parabola through the recent samples.
    #[default]
    Quadratic,
    /// Kalman-smoothed position plus a linear velocity step.
    Kalman,
}

impl PredictorKind {
    pub const ALL: [PredictorKind; 2] = [PredictorKind::Quadratic, PredictorKind::Kalman];

    pub fn name(self) -> &'static str {
        match self {
            PredictorKind::Quadratic => "quadratic",
            PredictorKind::Kalman => "kalman",
        }
    }

    /// The other variant.
    pub fn toggled(self) -> Self {
        match self {
            PredictorKind::Quadratic => PredictorKind::Kalman,
            PredictorKind::Kalman => PredictorKind::Quadratic,
        }
    }

    /// Builds a predictor reading `window_ms` of history.
    pub fn build(self, window_ms: i64) -> Box<dyn StrokePredictor> {
        match self {
            PredictorKind::Quadratic => Box::new(QuadraticPredictor::with_history_ms(window_ms)),
            PredictorKind::Kalman => Box::new(KalmanPredictor::with_history_ms(window_ms)),
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredictorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PredictorKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownPredictor(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_config() {
        let c = PredictorConfig::default();
        assert_eq!(c.lookahead_ms, 10);
        assert_eq!(c.speed_multiplier, 1.0);
        assert_eq!(c.lookahead_distance(2.0), 20.0);
    }

    #[test]
    fn config_validation() {
        assert!(PredictorConfig::new(0, 0.0).is_ok());
        assert_eq!(PredictorConfig::new(-1, 1.0), Err(ConfigError::InvalidLookahead(-1)));
        assert!(matches!(
            PredictorConfig::new(10, -0.5),
            Err(ConfigError::InvalidSpeedMultiplier(_))
        ));
        assert!(PredictorConfig::new(10, f32::INFINITY).is_err());
        assert!(PredictorConfig::new(10, f32::NAN).is_err());
    }

    // ── segment ───────────────────────────────────────────────────────────

    #[test]
    fn segment_rejects_short_or_non_finite() {
        assert!(PredictedSegment::from_points(vec![]).is_none());
        assert!(PredictedSegment::from_points(vec![Vec2::new(0.0, 0.0)]).is_none());
        assert!(
            PredictedSegment::from_points(vec![Vec2::new(0.0, 0.0), Vec2::new(f32::NAN, 1.0)])
                .is_none()
        );
        let seg =
            PredictedSegment::from_points(vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)]).unwrap();
        assert_eq!(seg.len(), 2);
        assert_eq!(seg.arc_length(), 5.0);
        assert_eq!(seg.end(), Vec2::new(3.0, 4.0));
    }

    // ── kind ──────────────────────────────────────────────────────────────

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Quadratic".parse::<PredictorKind>(), Ok(PredictorKind::Quadratic));
        assert_eq!(" kalman ".parse::<PredictorKind>(), Ok(PredictorKind::Kalman));
        assert_eq!(
            "spline".parse::<PredictorKind>(),
            Err(ConfigError::UnknownPredictor("spline".into()))
        );
    }

    #[test]
    fn kind_roundtrips_through_display() {
        for k in PredictorKind::ALL {
            assert_eq!(k.to_string().parse::<PredictorKind>(), Ok(k));
            assert_eq!(k.build(HISTORY_DURATION_MS).kind(), k);
        }
        assert_eq!(PredictorKind::Quadratic.toggled(), PredictorKind::Kalman);
    }
}
