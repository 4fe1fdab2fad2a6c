use crate::capture::RECENCY_WINDOW_MS;
use crate::error::ConfigError;
use crate::paint::StrokeStyle;
use crate::predict::{PredictorConfig, PredictorKind, HISTORY_DURATION_MS};
use crate::throttle::ThrottleConfig;

/// Construction-time settings for a [`super::DrawingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Retention of each pointer's sample buffer.
    pub recency_window_ms: i64,
    /// Trailing history handed to the predictor.
    pub prediction_window_ms: i64,
    pub throttle: ThrottleConfig,
    pub predictor: PredictorConfig,
    pub predictor_kind: PredictorKind,
    /// Style applied to strokes begun from now on.
    pub style: StrokeStyle,
}

impl SurfaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recency_window_ms <= 0 {
            return Err(ConfigError::InvalidWindow {
                name: "recency_window_ms",
                value: self.recency_window_ms,
            });
        }
        if self.prediction_window_ms <= 0 {
            return Err(ConfigError::InvalidWindow {
                name: "prediction_window_ms",
                value: self.prediction_window_ms,
            });
        }
        self.throttle.validate()?;
        self.predictor.validate()?;
        self.style.validate()
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            recency_window_ms: RECENCY_WINDOW_MS,
            prediction_window_ms: HISTORY_DURATION_MS,
            throttle: ThrottleConfig::default(),
            predictor: PredictorConfig::default(),
            predictor_kind: PredictorKind::default(),
            style: StrokeStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = SurfaceConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.recency_window_ms, 5);
        assert_eq!(c.prediction_window_ms, 5);
        assert_eq!(c.predictor_kind, PredictorKind::Quadratic);
    }

    #[test]
    fn rejects_non_positive_windows() {
        let c = SurfaceConfig { recency_window_ms: 0, ..Default::default() };
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidWindow { name: "recency_window_ms", value: 0 })
        );
        let c = SurfaceConfig { prediction_window_ms: -2, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn nested_errors_surface() {
        let c = SurfaceConfig {
            predictor: PredictorConfig { lookahead_ms: -5, speed_multiplier: 1.0 },
            ..Default::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::InvalidLookahead(-5)));
    }
}
