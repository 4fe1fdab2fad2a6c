//! einkdraw core crate.
//!
//! Turns pointer samples into committed strokes, a speculative lookahead segment
//! and a redraw decision. Nothing here rasterizes; hosts consume
//! [`surface::RenderSnapshot`] copies and draw them however they like.

pub mod capture;
pub mod coords;
pub mod input;
pub mod paint;
pub mod predict;
pub mod stroke;
pub mod surface;
pub mod throttle;
pub mod time;
pub mod velocity;

mod error;

pub use error::ConfigError;
