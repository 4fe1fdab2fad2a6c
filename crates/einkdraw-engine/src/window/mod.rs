//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the overlay window, and wires them to the
//! GPU layer and the pointer translator.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
