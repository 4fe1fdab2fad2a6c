//! Drawing surface controller.
//!
//! Owns the canvas, the per-pointer capture state and the active predictor.
//! Hosts feed it pointer events and read back [`RenderSnapshot`] copies plus a
//! redraw decision.

mod config;
mod controller;
mod snapshot;

pub use config::SurfaceConfig;
pub use controller::DrawingSurface;
pub use snapshot::{PredictedStroke, RenderSnapshot};
