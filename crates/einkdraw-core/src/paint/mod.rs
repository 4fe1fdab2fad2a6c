//! Paint model shared between the pipeline and host renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - pen style (color + width)

mod color;
mod style;

pub use color::Color;
pub use style::{StrokeStyle, DEFAULT_STROKE_WIDTH};
