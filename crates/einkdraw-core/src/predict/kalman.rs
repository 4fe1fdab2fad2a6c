use crate::capture::SampleBuffer;
use crate::coords::Vec2;
use crate::velocity;

use super::{PredictedSegment, PredictorConfig, PredictorKind, StrokePredictor, HISTORY_DURATION_MS};

pub const DEFAULT_PROCESS_NOISE: f32 = 0.05;
pub const DEFAULT_MEASUREMENT_NOISE: f32 = 0.5;

/// Position-only Kalman filter with independent x/y channels.
///
/// Covariance is kept diagonal and starts at `(1, 1)`. The first measurement
/// seeds the state directly.
#[derive(Debug, Clone)]
pub struct KalmanFilter {
    process_noise: f32,
    measurement_noise: f32,
    state: Option<Vec2>,
    covariance: (f32, f32),
}

impl KalmanFilter {
    pub fn new(process_noise: f32, measurement_noise: f32) -> Self {
        Self {
            process_noise,
            measurement_noise,
            state: None,
            covariance: (1.0, 1.0),
        }
    }

    /// Folds `measurement` into the estimate and returns the new state.
    pub fn update(&mut self, measurement: Vec2) -> Vec2 {
        let Some(state) = self.state else {
            self.state = Some(measurement);
            return measurement;
        };

        let (cx, cy) = (
            self.covariance.0 + self.process_noise,
            self.covariance.1 + self.process_noise,
        );
        let kx = cx / (cx + self.measurement_noise);
        let ky = cy / (cy + self.measurement_noise);

        let next = Vec2::new(
            state.x + kx * (measurement.x - state.x),
            state.y + ky * (measurement.y - state.y),
        );
        self.covariance = (cx * (1.0 - kx), cy * (1.0 - ky));
        self.state = Some(next);
        next
    }

    pub fn state(&self) -> Option<Vec2> {
        self.state
    }

    pub fn covariance(&self) -> (f32, f32) {
        self.covariance
    }

    pub fn reset(&mut self) {
        self.state = None;
        self.covariance = (1.0, 1.0);
    }
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESS_NOISE, DEFAULT_MEASUREMENT_NOISE)
    }
}

/// Smooths the recent samples, then steps the smoothed position along the
/// estimated velocity.
///
/// A fresh filter is replayed per call so the predictor holds no state
/// between events.
#[derive(Debug, Clone)]
pub struct KalmanPredictor {
    window_ms: i64,
    process_noise: f32,
    measurement_noise: f32,
}

impl KalmanPredictor {
    pub fn new() -> Self {
        Self::with_history_ms(HISTORY_DURATION_MS)
    }

    pub fn with_history_ms(window_ms: i64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
        }
    }

    pub fn with_noise(mut self, process_noise: f32, measurement_noise: f32) -> Self {
        self.process_noise = process_noise;
        self.measurement_noise = measurement_noise;
        self
    }
}

impl Default for KalmanPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokePredictor for KalmanPredictor {
    fn kind(&self) -> PredictorKind {
        PredictorKind::Kalman
    }

    fn predict(
        &self,
        history: &SampleBuffer,
        now_ms: i64,
        config: &PredictorConfig,
    ) -> Option<PredictedSegment> {
        let lookahead = config.scaled_lookahead_ms();
        if !(lookahead.is_finite() && lookahead > 0.0) {
            return None;
        }
        let recent = history.recent(self.window_ms, now_ms);
        if recent.len() < 2 {
            return None;
        }

        let mut filter = KalmanFilter::new(self.process_noise, self.measurement_noise);
        let mut filtered = Vec2::zero();
        for s in &recent {
            filtered = filter.update(s.position());
        }

        let v = velocity::estimate(&recent)?;
        if v.speed() == 0.0 {
            return None;
        }

        let pen = recent[recent.len() - 1].position();
        let ahead = filtered + v.offset(lookahead);
        log::trace!("kalman filtered={filtered:?} v=({:.3},{:.3}) -> {ahead:?}", v.vx, v.vy);
        // The smoothed state lags the pen; a short lookahead can land behind it.
        let d = ahead - pen;
        if d.x * v.vx + d.y * v.vy <= 0.0 {
            return None;
        }
        PredictedSegment::from_points(vec![pen, ahead])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::TouchSample;

    // ── filter ────────────────────────────────────────────────────────────

    #[test]
    fn first_measurement_seeds_state() {
        let mut f = KalmanFilter::default();
        assert_eq!(f.state(), None);
        assert_eq!(f.update(Vec2::new(120.0, 40.0)), Vec2::new(120.0, 40.0));
        assert_eq!(f.covariance(), (1.0, 1.0));
    }

    #[test]
    fn converges_on_constant_measurement() {
        let mut f = KalmanFilter::new(0.01, 1.0);
        f.update(Vec2::new(0.0, 0.0));
        let target = Vec2::new(10.0, -4.0);
        let mut last = Vec2::zero();
        for _ in 0..200 {
            last = f.update(target);
        }
        assert!(last.distance(target) < 1e-2, "{last:?}");
    }

    #[test]
    fn covariance_shrinks_after_updates() {
        let mut f = KalmanFilter::new(0.01, 1.0);
        f.update(Vec2::zero());
        f.update(Vec2::new(1.0, 1.0));
        let (cx, cy) = f.covariance();
        assert!(cx < 1.0 && cy < 1.0);
        assert_eq!(cx, cy);
    }

    #[test]
    fn update_moves_toward_measurement() {
        let mut f = KalmanFilter::default();
        f.update(Vec2::zero());
        let s = f.update(Vec2::new(10.0, 0.0));
        assert!(s.x > 0.0 && s.x < 10.0);
        assert_eq!(s.y, 0.0);
    }

    #[test]
    fn reset_forgets_state() {
        let mut f = KalmanFilter::default();
        f.update(Vec2::new(1.0, 2.0));
        f.update(Vec2::new(3.0, 2.0));
        f.reset();
        assert_eq!(f.state(), None);
        assert_eq!(f.covariance(), (1.0, 1.0));
    }

    // ── predictor ─────────────────────────────────────────────────────────

    fn buffer(points: &[(f32, f32, i64)]) -> SampleBuffer {
        let mut buf = SampleBuffer::with_window(50);
        for &(x, y, t) in points {
            buf.append(TouchSample::new(x, y, 1.0, t));
        }
        buf
    }

    #[test]
    fn segment_runs_from_pen_along_velocity() {
        let buf = buffer(&[(0.0, 0.0, 0), (4.0, 0.0, 2), (8.0, 0.0, 4)]);
        let seg = KalmanPredictor::new()
            .predict(&buf, 4, &PredictorConfig::default())
            .unwrap();
        assert_eq!(seg.len(), 2);
        assert_eq!(seg.start(), Vec2::new(8.0, 0.0));
        // Smoothed position lags the pen; 2 px/ms * 10 ms puts the tip ahead of it.
        assert!(seg.end().x > 8.0);
        assert_eq!(seg.end().y, 0.0);
    }

    #[test]
    fn zero_lookahead_gives_nothing() {
        let buf = buffer(&[(0.0, 0.0, 0), (4.0, 0.0, 2), (8.0, 0.0, 4)]);
        let config = PredictorConfig::new(0, 1.0).unwrap();
        assert!(KalmanPredictor::new().predict(&buf, 4, &config).is_none());
    }

    #[test]
    fn lagging_tip_gives_nothing() {
        // 1 ms of travel does not make up the filter lag, so the tip sits behind the pen.
        let buf = buffer(&[(0.0, 0.0, 0), (4.0, 0.0, 2), (8.0, 0.0, 4)]);
        let config = PredictorConfig::new(1, 1.0).unwrap();
        assert!(KalmanPredictor::new().predict(&buf, 4, &config).is_none());
    }

    #[test]
    fn needs_two_points() {
        let buf = buffer(&[(0.0, 0.0, 0)]);
        assert!(KalmanPredictor::new()
            .predict(&buf, 0, &PredictorConfig::default())
            .is_none());
    }

    #[test]
    fn zero_speed_gives_nothing() {
        let buf = buffer(&[(5.0, 5.0, 0), (5.0, 5.0, 2)]);
        assert!(KalmanPredictor::new()
            .predict(&buf, 2, &PredictorConfig::default())
            .is_none());
    }

    #[test]
    fn same_timestamp_gives_nothing() {
        let buf = buffer(&[(0.0, 0.0, 3), (5.0, 0.0, 3)]);
        assert!(KalmanPredictor::new()
            .predict(&buf, 3, &PredictorConfig::default())
            .is_none());
    }
}
