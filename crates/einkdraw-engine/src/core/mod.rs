//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application
//! layer: an [`App`] receives translated pointer and key input and draws
//! through a [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
