use std::fmt;

/// Rejected configuration value.
///
/// Returned by setters on the drawing surface and by config validation. The
/// pipeline itself never fails with this; it only guards values a host hands in.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Stroke width must be finite and strictly positive.
    InvalidStrokeWidth(f32),
    /// Color has a non-finite channel.
    InvalidColor,
    /// Lookahead must be zero or positive.
    InvalidLookahead(i64),
    /// Speed multiplier must be finite and zero or positive.
    InvalidSpeedMultiplier(f32),
    /// A time window or interval must be strictly positive.
    InvalidWindow { name: &'static str, value: i64 },
    /// Distance thresholds must satisfy `0 < min <= max`.
    InvalidThreshold { min: f32, max: f32 },
    /// Speed divisor must be finite and strictly positive.
    InvalidSpeedDivisor(f32),
    /// Predictor name not recognized.
    UnknownPredictor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStrokeWidth(w) => {
                write!(f, "stroke width must be a positive number, got {w}")
            }
            ConfigError::InvalidColor => write!(f, "color has a non-finite channel"),
            ConfigError::InvalidLookahead(ms) => {
                write!(f, "lookahead must be >= 0 ms, got {ms}")
            }
            ConfigError::InvalidSpeedMultiplier(m) => {
                write!(f, "speed multiplier must be a finite number >= 0, got {m}")
            }
            ConfigError::InvalidWindow { name, value } => {
                write!(f, "{name} must be > 0 ms, got {value}")
            }
            ConfigError::InvalidThreshold { min, max } => {
                write!(f, "distance thresholds must satisfy 0 < min <= max, got {min}..{max}")
            }
            ConfigError::InvalidSpeedDivisor(d) => {
                write!(f, "speed divisor must be a positive number, got {d}")
            }
            ConfigError::UnknownPredictor(name) => {
                write!(f, "unknown predictor '{name}' (expected 'quadratic' or 'kalman')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
