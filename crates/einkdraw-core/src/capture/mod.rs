//! Sample capture.
//!
//! Holds the short, time-bounded history of raw pointer readings that the
//! velocity estimator and predictors work from.

mod buffer;
mod sample;

pub use buffer::{SampleBuffer, SampleWindow, RECENCY_WINDOW_MS};
pub use sample::TouchSample;
