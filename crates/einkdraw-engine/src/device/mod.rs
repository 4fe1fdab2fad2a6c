//! GPU device + surface management.
//!
//! Creates the wgpu instance, adapter, device and queue for the overlay
//! window, configures a possibly see-through surface and hands out frames.

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::{choose_alpha_mode, choose_present_mode, choose_surface_format, SurfaceErrorAction};
