/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Composite alpha modes to try, in order.
    ///
    /// Unsupported entries are skipped; if none match, the first mode the
    /// surface reports is used.
    pub alpha_modes: Vec<wgpu::CompositeAlphaMode>,

    /// Required wgpu features. Empty for portability.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface. A hint only.
    pub desired_maximum_frame_latency: u32,

    /// Adapter power preference. Ink overlays idle most of the time.
    pub power_preference: wgpu::PowerPreference,
}

impl GpuInit {
    /// Settings for a see-through overlay window.
    ///
    /// Asks for a composite alpha mode that blends the cleared-transparent
    /// surface with the desktop beneath it.
    pub fn overlay() -> Self {
        Self {
            alpha_modes: vec![
                wgpu::CompositeAlphaMode::PreMultiplied,
                wgpu::CompositeAlphaMode::PostMultiplied,
            ],
            ..Self::default()
        }
    }

    /// True if any preferred alpha mode would show content beneath the window.
    pub fn wants_transparency(&self) -> bool {
        self.alpha_modes.iter().copied().any(super::surface::is_see_through)
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_modes: Vec::new(),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
            power_preference: wgpu::PowerPreference::LowPower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_prefers_premultiplied() {
        let init = GpuInit::overlay();
        assert_eq!(init.alpha_modes[0], wgpu::CompositeAlphaMode::PreMultiplied);
        assert!(init.wants_transparency());
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn default_is_opaque() {
        assert!(!GpuInit::default().wants_transparency());
    }
}
