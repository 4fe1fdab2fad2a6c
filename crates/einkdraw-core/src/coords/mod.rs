//! Coordinate types shared by the pipeline and host renderers.
//!
//! Canonical space:
//! - logical pixels as reported by the host input system
//! - origin top-left
//! - +X right, +Y down

mod vec2;

pub use vec2::Vec2;
