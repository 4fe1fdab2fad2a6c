//! Environment-driven overlay settings.
//!
//! Every knob is optional. A value that fails to parse or validate is logged
//! and the default is kept, so a typo never stops the overlay from starting.

use std::str::FromStr;

use einkdraw_core::paint::StrokeStyle;
use einkdraw_core::predict::{PredictorConfig, PredictorKind};
use einkdraw_core::surface::SurfaceConfig;

pub const ENV_LOOKAHEAD_MS: &str = "EINKDRAW_LOOKAHEAD_MS";
pub const ENV_SPEED_MULTIPLIER: &str = "EINKDRAW_SPEED_MULTIPLIER";
pub const ENV_PREDICTOR: &str = "EINKDRAW_PREDICTOR";
pub const ENV_RECENCY_WINDOW_MS: &str = "EINKDRAW_RECENCY_WINDOW_MS";
pub const ENV_PREDICTION_WINDOW_MS: &str = "EINKDRAW_PREDICTION_WINDOW_MS";
pub const ENV_STROKE_WIDTH: &str = "EINKDRAW_STROKE_WIDTH";
pub const ENV_ANTIALIAS: &str = "EINKDRAW_ANTIALIAS";
pub const ENV_TRANSPARENT: &str = "EINKDRAW_TRANSPARENT";
pub const ENV_ON_TOP: &str = "EINKDRAW_ON_TOP";

#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    pub surface: SurfaceConfig,
    pub antialias: bool,
    pub transparent: bool,
    pub always_on_top: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            antialias: true,
            transparent: true,
            always_on_top: true,
        }
    }
}

impl OverlaySettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any name-to-value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Self::default();
        let surface = &mut s.surface;

        let mut predictor = surface.predictor;
        if let Some(ms) = parse_var::<i64, _>(&lookup, ENV_LOOKAHEAD_MS) {
            predictor.lookahead_ms = ms;
        }
        if let Some(m) = parse_var::<f32, _>(&lookup, ENV_SPEED_MULTIPLIER) {
            predictor.speed_multiplier = m;
        }
        match PredictorConfig::new(predictor.lookahead_ms, predictor.speed_multiplier) {
            Ok(p) => surface.predictor = p,
            Err(e) => log::warn!("ignoring predictor settings: {e}"),
        }

        if let Some(kind) = parse_var::<PredictorKind, _>(&lookup, ENV_PREDICTOR) {
            surface.predictor_kind = kind;
        }

        if let Some(ms) = parse_var::<i64, _>(&lookup, ENV_RECENCY_WINDOW_MS) {
            positive_window(ENV_RECENCY_WINDOW_MS, ms, &mut surface.recency_window_ms);
        }
        if let Some(ms) = parse_var::<i64, _>(&lookup, ENV_PREDICTION_WINDOW_MS) {
            positive_window(ENV_PREDICTION_WINDOW_MS, ms, &mut surface.prediction_window_ms);
        }

        if let Some(width) = parse_var::<f32, _>(&lookup, ENV_STROKE_WIDTH) {
            match StrokeStyle::new(width, surface.style.color) {
                Ok(style) => surface.style = style,
                Err(e) => log::warn!("ignoring {ENV_STROKE_WIDTH}: {e}"),
            }
        }

        if let Some(on) = parse_flag(&lookup, ENV_ANTIALIAS) {
            s.antialias = on;
        }
        if let Some(on) = parse_flag(&lookup, ENV_TRANSPARENT) {
            s.transparent = on;
        }
        if let Some(on) = parse_flag(&lookup, ENV_ON_TOP) {
            s.always_on_top = on;
        }
        s
    }
}

fn positive_window(name: &str, ms: i64, slot: &mut i64) {
    if ms > 0 {
        *slot = ms;
    } else {
        log::warn!("ignoring {name}: must be > 0 ms, got {ms}");
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring {name}={raw:?}: {e}");
            None
        }
    }
}

fn parse_flag<F>(lookup: &F, name: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => {
            log::warn!("ignoring {name}={raw:?}: expected on/off");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> OverlaySettings {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        OverlaySettings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings(&[]), OverlaySettings::default());
    }

    #[test]
    fn reads_every_variable() {
        let s = settings(&[
            (ENV_LOOKAHEAD_MS, "25"),
            (ENV_SPEED_MULTIPLIER, "1.5"),
            (ENV_PREDICTOR, " Kalman "),
            (ENV_RECENCY_WINDOW_MS, "8"),
            (ENV_PREDICTION_WINDOW_MS, "6"),
            (ENV_STROKE_WIDTH, "3"),
            (ENV_ANTIALIAS, "off"),
            (ENV_TRANSPARENT, "0"),
            (ENV_ON_TOP, "no"),
        ]);
        assert_eq!(s.surface.predictor.lookahead_ms, 25);
        assert_eq!(s.surface.predictor.speed_multiplier, 1.5);
        assert_eq!(s.surface.predictor_kind, PredictorKind::Kalman);
        assert_eq!(s.surface.recency_window_ms, 8);
        assert_eq!(s.surface.prediction_window_ms, 6);
        assert_eq!(s.surface.style.width, 3.0);
        assert!(!s.antialias);
        assert!(!s.transparent);
        assert!(!s.always_on_top);
        assert!(s.surface.validate().is_ok());
    }

    #[test]
    fn garbage_falls_back() {
        let s = settings(&[
            (ENV_LOOKAHEAD_MS, "soon"),
            (ENV_PREDICTOR, "linear"),
            (ENV_STROKE_WIDTH, "-4"),
            (ENV_RECENCY_WINDOW_MS, "0"),
            (ENV_ANTIALIAS, "maybe"),
        ]);
        assert_eq!(s, OverlaySettings::default());
    }

    #[test]
    fn invalid_multiplier_keeps_both_predictor_values() {
        let s = settings(&[(ENV_LOOKAHEAD_MS, "30"), (ENV_SPEED_MULTIPLIER, "-1")]);
        assert_eq!(s.surface.predictor, PredictorConfig::default());
    }
}
