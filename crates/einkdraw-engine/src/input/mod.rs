//! Input translation.
//!
//! Maps winit window events onto the platform-agnostic pointer events the
//! drawing pipeline consumes, plus a small keyboard vocabulary for shortcuts.

mod keys;
mod pointer;

pub use keys::{map_key, Key, Modifiers};
pub use pointer::{normalize_force, touch_pointer_id, PointerTranslator};
