use std::collections::BTreeMap;

use crate::capture::{SampleBuffer, TouchSample};
use crate::coords::Vec2;
use crate::error::ConfigError;
use crate::input::{PointerEvent, PointerId, PointerPhase};
use crate::paint::{Color, StrokeStyle};
use crate::predict::{PredictedSegment, PredictorConfig, PredictorKind, StrokePredictor};
use crate::stroke::{Canvas, StrokeId};
use crate::throttle::{RedrawReason, RedrawSignal, RedrawThrottle};
use crate::time::Clock;

use super::{PredictedStroke, RenderSnapshot, SurfaceConfig};

/// Capture state of one pointer between down and up.
#[derive(Debug)]
struct ActivePointer {
    stroke: StrokeId,
    style: StrokeStyle,
    samples: SampleBuffer,
    throttle: RedrawThrottle,
    last_pressure: f32,
}

#[derive(Debug, Clone)]
struct Prediction {
    owner: PointerId,
    segment: PredictedSegment,
    style: StrokeStyle,
}

/// Session object for one drawing area.
///
/// Single-threaded: every call runs to completion on the host's event thread.
pub struct DrawingSurface<C: Clock> {
    clock: C,
    config: SurfaceConfig,
    canvas: Canvas,
    active: BTreeMap<PointerId, ActivePointer>,
    predictor: Box<dyn StrokePredictor>,
    prediction: Option<Prediction>,
    enabled: bool,
    revision: u64,
}

impl<C: Clock> DrawingSurface<C> {
    pub fn new(config: SurfaceConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config, clock))
    }

    /// Surface with default configuration.
    pub fn with_clock(clock: C) -> Self {
        Self::from_valid(SurfaceConfig::default(), clock)
    }

    fn from_valid(config: SurfaceConfig, clock: C) -> Self {
        let predictor = config.predictor_kind.build(config.prediction_window_ms);
        Self {
            clock,
            canvas: Canvas::new(config.style),
            config,
            active: BTreeMap::new(),
            predictor,
            prediction: None,
            enabled: true,
            revision: 0,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn drop_prediction_of(&mut self, id: PointerId) {
        if self.prediction.as_ref().is_some_and(|p| p.owner == id) {
            self.prediction = None;
        }
    }

    // ── pointer input ─────────────────────────────────────────────────────

    /// Routes one pointer event through capture, prediction and throttling.
    ///
    /// Returns a redraw request when the event changed something worth
    /// repainting.
    pub fn on_pointer_event(&mut self, ev: PointerEvent) -> Option<RedrawSignal> {
        if !self.enabled {
            return None;
        }
        if !(ev.x.is_finite() && ev.y.is_finite()) {
            log::trace!("pointer {} ignored: non-finite position", ev.id);
            return None;
        }
        match ev.phase {
            PointerPhase::Down => Some(self.pointer_down(ev)),
            PointerPhase::Move => self.pointer_move(ev),
            PointerPhase::Up => self.pointer_up(ev),
            PointerPhase::Cancel => self.pointer_cancel(ev),
        }
    }

    fn pointer_down(&mut self, ev: PointerEvent) -> RedrawSignal {
        if let Some(previous) = self.active.remove(&ev.id) {
            log::debug!("pointer {} down again, ending {}", ev.id, previous.stroke);
        }
        self.drop_prediction_of(ev.id);

        let style = self.config.style;
        let stroke = self.canvas.begin_stroke(style);
        let p = ev.position();
        self.canvas.append(stroke, p);

        let sample = TouchSample::new(ev.x, ev.y, ev.pressure, ev.timestamp).with_pressure_fallback(None);
        let mut samples = SampleBuffer::with_window(self.config.recency_window_ms);
        samples.append(sample);

        let mut throttle = RedrawThrottle::new(self.config.throttle);
        throttle.reset(p, ev.timestamp);
        let signal = throttle.force(p, ev.timestamp, RedrawReason::PointerDown);

        self.active.insert(
            ev.id,
            ActivePointer {
                stroke,
                style,
                samples,
                throttle,
                last_pressure: if sample.pressure > 0.0 { sample.pressure } else { 1.0 },
            },
        );
        self.bump();
        log::debug!("{stroke} begun by pointer {} at ({:.1}, {:.1})", ev.id, ev.x, ev.y);
        signal
    }

    fn pointer_move(&mut self, ev: PointerEvent) -> Option<RedrawSignal> {
        let Some(ap) = self.active.get_mut(&ev.id) else {
            log::trace!("move from inactive pointer {} ignored", ev.id);
            return None;
        };

        let sample = TouchSample::new(ev.x, ev.y, ev.pressure, ev.timestamp)
            .with_pressure_fallback(Some(ap.last_pressure));
        if sample.pressure > 0.0 {
            ap.last_pressure = sample.pressure;
        }
        ap.samples.append(sample);
        let t = ap.samples.newest().map_or(ev.timestamp, |s| s.timestamp);

        let p = ev.position();
        if !self.canvas.append(ap.stroke, p) {
            log::debug!("pointer {} lost {}, detaching", ev.id, ap.stroke);
            self.active.remove(&ev.id);
            self.drop_prediction_of(ev.id);
            return None;
        }

        let now = self.clock.now_ms();
        let predicted = self.predictor.predict(&ap.samples, now, &self.config.predictor);
        let style = ap.style;
        let signal = ap.throttle.evaluate(p, t);

        log::trace!(
            "pointer {} move ({:.1}, {:.1}) t={t} predicted={} redraw={:?}",
            ev.id,
            ev.x,
            ev.y,
            predicted.as_ref().map_or(0, PredictedSegment::len),
            signal.map(|s| s.reason)
        );

        match predicted {
            Some(segment) => {
                self.prediction = Some(Prediction {
                    owner: ev.id,
                    segment,
                    style,
                });
            }
            None => {
                self.drop_prediction_of(ev.id);
            }
        }
        self.bump();
        signal
    }

    fn pointer_up(&mut self, ev: PointerEvent) -> Option<RedrawSignal> {
        let mut ap = self.active.remove(&ev.id)?;
        let p = ev.position();
        self.canvas.append(ap.stroke, p);
        self.drop_prediction_of(ev.id);
        self.bump();
        log::debug!("{} ended by pointer {}", ap.stroke, ev.id);
        Some(ap.throttle.force(p, ev.timestamp, RedrawReason::PointerUp))
    }

    fn pointer_cancel(&mut self, ev: PointerEvent) -> Option<RedrawSignal> {
        let ap = self.active.remove(&ev.id)?;
        self.drop_prediction_of(ev.id);
        self.bump();
        log::debug!("{} cancelled by pointer {}", ap.stroke, ev.id);
        Some(RedrawSignal::new(RedrawReason::PointerCancel))
    }

    // ── commands ──────────────────────────────────────────────────────────

    /// Removes the newest stroke. No-op on a blank canvas.
    ///
    /// Works while capture is disabled.
    pub fn undo(&mut self) -> Option<RedrawSignal> {
        let removed = self.canvas.undo()?;
        self.active.retain(|id, ap| {
            let keep = ap.stroke != removed.id();
            if !keep {
                log::debug!("pointer {id} detached from undone {}", ap.stroke);
            }
            keep
        });
        for ap in self.active.values_mut() {
            ap.samples.clear();
        }
        self.prediction = None;
        self.bump();
        log::debug!("undo removed {} ({} points)", removed.id(), removed.len());
        Some(RedrawSignal::new(RedrawReason::Undo))
    }

    /// Drops every stroke, active pointer and the prediction.
    pub fn clear(&mut self) -> RedrawSignal {
        self.canvas.clear(self.config.style);
        self.active.clear();
        self.prediction = None;
        self.bump();
        log::debug!("canvas cleared");
        RedrawSignal::new(RedrawReason::Clear)
    }

    /// Enables or disables capture.
    ///
    /// Disabling drops in-flight pointers. Returns a redraw when that hid a
    /// visible prediction.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<RedrawSignal> {
        if self.enabled == enabled {
            return None;
        }
        self.enabled = enabled;
        log::info!("drawing {}", if enabled { "enabled" } else { "disabled" });
        if enabled {
            return None;
        }
        self.active.clear();
        if self.prediction.take().is_some() {
            self.bump();
            Some(RedrawSignal::new(RedrawReason::StateChange))
        } else {
            None
        }
    }

    /// Style for strokes begun from now on.
    pub fn set_stroke_style(&mut self, width: f32, color: Color) -> Result<(), ConfigError> {
        let style = StrokeStyle::new(width, color).inspect_err(|e| log::warn!("stroke style rejected: {e}"))?;
        self.config.style = style;
        Ok(())
    }

    pub fn set_predictor_config(
        &mut self,
        lookahead_ms: i64,
        speed_multiplier: f32,
    ) -> Result<(), ConfigError> {
        let config = PredictorConfig::new(lookahead_ms, speed_multiplier)
            .inspect_err(|e| log::warn!("predictor config rejected: {e}"))?;
        log::debug!("predictor lookahead={lookahead_ms}ms multiplier={speed_multiplier}");
        self.config.predictor = config;
        Ok(())
    }

    /// Switches to a built-in predictor.
    pub fn set_predictor_variant(&mut self, kind: PredictorKind) {
        self.predictor = kind.build(self.config.prediction_window_ms);
        self.config.predictor_kind = kind;
        log::info!("predictor switched to {kind}");
    }

    /// Installs a custom predictor.
    pub fn set_predictor(&mut self, predictor: Box<dyn StrokePredictor>) {
        self.config.predictor_kind = predictor.kind();
        self.predictor = predictor;
        log::info!("predictor replaced ({})", self.config.predictor_kind);
    }

    // ── read side ─────────────────────────────────────────────────────────

    /// Copies the current drawing state for rendering.
    pub fn snapshot_for_render(&self) -> RenderSnapshot {
        RenderSnapshot {
            strokes: self.canvas.strokes().to_vec(),
            predicted: self.prediction.as_ref().map(|p| PredictedStroke {
                segment: p.segment.clone(),
                style: p.style,
            }),
            revision: self.revision,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn prediction(&self) -> Option<&PredictedSegment> {
        self.prediction.as_ref().map(|p| &p.segment)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pointers currently drawing, in id order.
    pub fn active_pointers(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.active.keys().copied()
    }

    /// Stroke that pointer `id` is drawing into.
    pub fn active_stroke(&self, id: PointerId) -> Option<StrokeId> {
        self.active.get(&id).map(|ap| ap.stroke)
    }

    pub fn predictor_kind(&self) -> PredictorKind {
        self.config.predictor_kind
    }

    pub fn predictor_config(&self) -> PredictorConfig {
        self.config.predictor
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.config.style
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Position of the newest sample held for pointer `id`.
    pub fn pen_position(&self, id: PointerId) -> Option<Vec2> {
        self.active
            .get(&id)
            .and_then(|ap| ap.samples.newest())
            .map(TouchSample::position)
    }
}
