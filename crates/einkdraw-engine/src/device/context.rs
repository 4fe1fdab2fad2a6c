use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, SurfaceErrorAction};
use super::GpuInit;

/// One acquired swapchain image plus the encoder recording into it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// wgpu objects and surface configuration for the overlay window.
///
/// Borrows the window for `'w`; the runtime keeps both in one self-referencing
/// entry.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Last size reported by the window, possibly 0x0 while minimized.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("einkdraw device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open GPU device")?;

        let caps = surface::Caps::from(surface.get_capabilities(&adapter));
        let config = surface::surface_config(&caps, &init, size)
            .context("surface reports no usable texture format")?;

        if init.wants_transparency() && !init.alpha_modes.contains(&config.alpha_mode) {
            log::warn!(
                "compositor offers none of {:?}; falling back to {:?}, the overlay will be opaque",
                init.alpha_modes,
                config.alpha_mode
            );
        }
        if config.present_mode != init.present_mode {
            log::warn!(
                "present mode {:?} unsupported, using {:?}",
                init.present_mode,
                config.present_mode
            );
        }
        log::debug!(
            "surface {}x{} format={:?} alpha={:?} present={:?}",
            config.width,
            config.height,
            config.format,
            config.alpha_mode,
            config.present_mode
        );
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn alpha_mode(&self) -> wgpu::CompositeAlphaMode {
        self.config.alpha_mode
    }

    /// True when cleared-transparent pixels show what lies beneath the window.
    pub fn is_see_through(&self) -> bool {
        surface::is_see_through(self.config.alpha_mode)
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize. A 0x0 size is recorded but
    /// configuration waits until the window has area again.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if surface::resize_config(&mut self.config, new_size) {
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("einkdraw frame encoder"),
            });
        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            encoder,
            ..
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::for_error(&err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        match action {
            SurfaceErrorAction::Fatal => log::error!("surface error: {err}"),
            _ => log::debug!("surface error: {err} -> {action:?}"),
        }
        action
    }
}
