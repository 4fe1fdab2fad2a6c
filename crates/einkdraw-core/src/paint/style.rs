use crate::error::ConfigError;

use super::Color;

/// Default pen width in logical pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 5.0;

/// Visual style carried by every stroke.
///
/// Strokes copy the style that is current when they begin; changing the
/// surface style later never restyles committed strokes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Full pen width in logical pixels. Caps and joins are round.
    pub width: f32,
}

impl StrokeStyle {
    /// Creates a validated style.
    pub fn new(width: f32, color: Color) -> Result<Self, ConfigError> {
        let style = Self { color, width };
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::InvalidStrokeWidth(self.width));
        }
        if !self.color.is_finite() {
            return Err(ConfigError::InvalidColor);
        }
        Ok(())
    }

    /// Half the pen width.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width * 0.5
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::black(),
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}
