use std::collections::VecDeque;
use std::ops::Deref;

use super::TouchSample;

/// Default retention window in milliseconds.
pub const RECENCY_WINDOW_MS: i64 = 5;

/// Time-bounded ring of the most recent samples of one stroke.
///
/// Invariant: every retained sample satisfies
/// `timestamp >= newest.timestamp - window_ms`. Appends evict from the front
/// to restore it, so memory stays bounded by the input rate times the window.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<TouchSample>,
    window_ms: i64,
}

impl SampleBuffer {
    /// Creates a buffer with the default 5 ms retention.
    pub fn new() -> Self {
        Self::with_window(RECENCY_WINDOW_MS)
    }

    /// Creates a buffer with a custom retention window.
    ///
    /// Non-positive windows are raised to 1 ms so the newest sample is always kept.
    pub fn with_window(window_ms: i64) -> Self {
        Self {
            samples: VecDeque::with_capacity(16),
            window_ms: window_ms.max(1),
        }
    }

    #[inline]
    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn newest(&self) -> Option<&TouchSample> {
        self.samples.back()
    }

    #[inline]
    pub fn oldest(&self) -> Option<&TouchSample> {
        self.samples.front()
    }

    /// Iterates retained samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TouchSample> {
        self.samples.iter()
    }

    /// Appends `sample` and evicts everything older than the window.
    ///
    /// A sample stamped earlier than the current newest one is clamped to the
    /// newest timestamp. Downstream stages then see a zero time delta and treat
    /// it as jitter instead of reordering history.
    pub fn append(&mut self, mut sample: TouchSample) {
        if let Some(newest) = self.samples.back() {
            if sample.timestamp < newest.timestamp {
                sample.timestamp = newest.timestamp;
            }
        }

        let threshold = sample.timestamp.saturating_sub(self.window_ms);
        while self
            .samples
            .front()
            .is_some_and(|s| s.timestamp < threshold)
        {
            self.samples.pop_front();
        }

        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Copies the trailing samples stamped at or after `now_ms - window_ms`.
    ///
    /// The result is detached from the buffer; later appends do not affect it.
    pub fn recent(&self, window_ms: i64, now_ms: i64) -> SampleWindow {
        let threshold = now_ms.saturating_sub(window_ms);
        let keep = self
            .samples
            .iter()
            .rev()
            .take_while(|s| s.timestamp >= threshold)
            .count();
        let skip = self.samples.len() - keep;
        SampleWindow {
            samples: self.samples.iter().skip(skip).copied().collect(),
        }
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned, re-iterable copy of a trailing run of samples (oldest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleWindow {
    samples: Vec<TouchSample>,
}

impl SampleWindow {
    #[inline]
    pub fn as_slice(&self) -> &[TouchSample] {
        &self.samples
    }

    /// Elapsed time between the oldest and newest sample, if there are two.
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if self.samples.len() >= 2 => {
                Some(last.timestamp - first.timestamp)
            }
            _ => None,
        }
    }

    /// Sum of Euclidean segment lengths along the samples.
    pub fn path_length(&self) -> f32 {
        self.samples
            .windows(2)
            .map(|w| w[0].position().distance(w[1].position()))
            .sum()
    }
}

impl Deref for SampleWindow {
    type Target = [TouchSample];

    #[inline]
    fn deref(&self) -> &[TouchSample] {
        &self.samples
    }
}

impl From<Vec<TouchSample>> for SampleWindow {
    fn from(samples: Vec<TouchSample>) -> Self {
        Self { samples }
    }
}

impl<'a> IntoIterator for &'a SampleWindow {
    type Item = &'a TouchSample;
    type IntoIter = std::slice::Iter<'a, TouchSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
