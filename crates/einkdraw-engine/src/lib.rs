//! einkdraw engine crate.
//!
//! Platform and GPU pieces for hosting a drawing surface in a window: winit
//! event loop, wgpu device and surface, pointer/key translation and the
//! instanced stroke renderer.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod window;
