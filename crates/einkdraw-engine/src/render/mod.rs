//! GPU rendering subsystem.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod common;
mod ctx;
mod stroke;

pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use stroke::{build_instances, SegmentInstance, StrokeRenderer};
