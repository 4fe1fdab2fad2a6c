use crate::capture::SampleBuffer;
use crate::coords::Vec2;

use super::linalg::solve3;
use super::{PredictedSegment, PredictorConfig, PredictorKind, StrokePredictor, HISTORY_DURATION_MS};

/// Horizontal step between predicted vertices, in px.
pub const WALK_STEP_PX: f64 = 2.0;

/// Upper bound on predicted vertices per call.
pub const MAX_WALK_STEPS: usize = 128;

/// `y = a·x² + b·x + c`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadraticFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadraticFit {
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }
}

/// Least-squares parabola through `points`.
///
/// Needs at least three points. Returns `None` when the normal equations are
/// singular, which happens when fewer than three distinct x values are present.
pub fn fit_quadratic(points: &[(f64, f64)]) -> Option<QuadraticFit> {
    if points.len() < 3 {
        return None;
    }

    let (mut sx, mut sx2, mut sx3, mut sx4) = (0.0, 0.0, 0.0, 0.0);
    let (mut sy, mut sxy, mut sx2y) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let x2 = x * x;
        sx += x;
        sx2 += x2;
        sx3 += x2 * x;
        sx4 += x2 * x2;
        sy += y;
        sxy += x * y;
        sx2y += x2 * y;
    }
    let n = points.len() as f64;

    let m = [[sx4, sx3, sx2], [sx3, sx2, sx], [sx2, sx, n]];
    let [a, b, c] = solve3(m, [sx2y, sxy, sy])?;
    Some(QuadraticFit { a, b, c })
}

/// Fits `y(x)` through the recent samples and walks the curve ahead of the pen
/// until the walked arc length matches the expected travel distance.
#[derive(Debug, Clone)]
pub struct QuadraticPredictor {
    window_ms: i64,
    step_px: f64,
}

impl QuadraticPredictor {
    pub fn new() -> Self {
        Self::with_history_ms(HISTORY_DURATION_MS)
    }

    pub fn with_history_ms(window_ms: i64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            step_px: WALK_STEP_PX,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }
}

impl Default for QuadraticPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokePredictor for QuadraticPredictor {
    fn kind(&self) -> PredictorKind {
        PredictorKind::Quadratic
    }

    fn predict(
        &self,
        history: &SampleBuffer,
        now_ms: i64,
        config: &PredictorConfig,
    ) -> Option<PredictedSegment> {
        let recent = history.recent(self.window_ms, now_ms);
        if recent.len() < 3 {
            return None;
        }

        let dt = recent.duration_ms()?;
        if dt <= 0 {
            return None;
        }
        let speed = recent.path_length() / dt as f32;
        let target = f64::from(config.lookahead_distance(speed));
        if !(target.is_finite() && target > 0.0) {
            return None;
        }

        // Local frame anchored at the oldest sample.
        let origin = recent[0].position();
        let local: Vec<(f64, f64)> = recent
            .iter()
            .map(|s| (f64::from(s.x - origin.x), f64::from(s.y - origin.y)))
            .collect();
        let fit = fit_quadratic(&local)?;

        let (nx, ny) = local[local.len() - 1];
        if nx == 0.0 {
            return None;
        }
        let step = self.step_px.copysign(nx);
        let residual = ny - fit.eval(nx);

        let mut points = Vec::with_capacity(16);
        points.push(recent[recent.len() - 1].position());

        let (mut px, mut py) = (nx, ny);
        let mut walked = 0.0;
        for i in 1..=MAX_WALK_STEPS {
            let x = nx + step * i as f64;
            let y = fit.eval(x) + residual;
            let seg = (x - px).hypot(y - py);
            if !seg.is_finite() {
                break;
            }
            if walked + seg >= target {
                // Steep fits can jump far past the budget in one step.
                let t = (target - walked) / seg;
                points.push(Vec2::new(
                    origin.x + (px + (x - px) * t) as f32,
                    origin.y + (py + (y - py) * t) as f32,
                ));
                break;
            }
            walked += seg;
            points.push(Vec2::new(
                origin.x + x as f32,
                origin.y + y as f32,
            ));
            (px, py) = (x, y);
        }

        let segment = PredictedSegment::from_points(points);
        log::trace!(
            "quadratic fit a={:.4} b={:.4} c={:.4} target={target:.2}px -> {}",
            fit.a,
            fit.b,
            fit.c,
            segment.as_ref().map_or(0, PredictedSegment::len)
        );
        segment
    }
}
