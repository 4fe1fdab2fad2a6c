//! Pure surface-configuration decisions, kept apart from the live device so
//! they can be tested without a GPU.

use winit::dpi::PhysicalSize;

use super::GpuInit;

/// What the frame loop should do after acquiring a surface texture failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next redraw may succeed.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Out of memory. The runtime shuts down.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

/// Picks a surface format from those the adapter reports.
///
/// With `prefer_srgb`, the 8-bit sRGB formats win when present.
pub fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }
    formats.first().copied()
}

/// Picks the first of `requested` that the surface supports.
pub fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: &[wgpu::CompositeAlphaMode],
) -> wgpu::CompositeAlphaMode {
    requested
        .iter()
        .copied()
        .find(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// `requested` if supported, else FIFO, which every surface must offer.
pub fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if supported.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

pub(crate) fn is_see_through(mode: wgpu::CompositeAlphaMode) -> bool {
    matches!(
        mode,
        wgpu::CompositeAlphaMode::PreMultiplied | wgpu::CompositeAlphaMode::PostMultiplied
    )
}

/// Surface capabilities as plain lists.
#[derive(Debug, Clone, Default)]
pub(crate) struct Caps {
    pub formats: Vec<wgpu::TextureFormat>,
    pub present_modes: Vec<wgpu::PresentMode>,
    pub alpha_modes: Vec<wgpu::CompositeAlphaMode>,
}

impl From<wgpu::SurfaceCapabilities> for Caps {
    fn from(c: wgpu::SurfaceCapabilities) -> Self {
        Self {
            formats: c.formats,
            present_modes: c.present_modes,
            alpha_modes: c.alpha_modes,
        }
    }
}

pub(crate) fn surface_config(
    caps: &Caps,
    init: &GpuInit,
    size: PhysicalSize<u32>,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = choose_surface_format(&caps.formats, init.prefer_srgb)?;
    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: choose_present_mode(&caps.present_modes, init.present_mode),
        alpha_mode: choose_alpha_mode(&caps.alpha_modes, &init.alpha_modes),
        view_formats: vec![],
        desired_maximum_frame_latency: init.desired_maximum_frame_latency,
    })
}

/// Applies `new_size` to `config`. Returns false when the size is empty and
/// the surface must not be configured.
pub(crate) fn resize_config(
    config: &mut wgpu::SurfaceConfiguration,
    new_size: PhysicalSize<u32>,
) -> bool {
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }
    config.width = new_size.width;
    config.height = new_size.height;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as A, PresentMode as P, TextureFormat as F};

    fn caps(formats: Vec<F>, alpha: Vec<A>, present: Vec<P>) -> Caps {
        Caps {
            formats,
            present_modes: present,
            alpha_modes: alpha,
        }
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [F::Bgra8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [F::Rgb10a2Unorm, F::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgb10a2Unorm));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn first_supported_request_wins() {
        let supported = [A::Opaque, A::PostMultiplied];
        let requested = [A::PreMultiplied, A::PostMultiplied];
        assert_eq!(choose_alpha_mode(&supported, &requested), A::PostMultiplied);
        assert!(is_see_through(A::PostMultiplied));
    }

    #[test]
    fn unsupported_request_uses_surface_default() {
        assert_eq!(choose_alpha_mode(&[A::Opaque], &[A::PreMultiplied]), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::Inherit], &[]), A::Inherit);
        assert_eq!(choose_alpha_mode(&[], &[A::PreMultiplied]), A::Auto);
        assert!(!is_see_through(A::Opaque));
    }

    // ── present / config ──────────────────────────────────────────────────

    #[test]
    fn present_mode_falls_back_to_fifo() {
        assert_eq!(choose_present_mode(&[P::Fifo, P::Mailbox], P::Mailbox), P::Mailbox);
        assert_eq!(choose_present_mode(&[P::Fifo], P::Immediate), P::Fifo);
    }

    #[test]
    fn overlay_config_from_caps() {
        let caps = caps(
            vec![F::Bgra8Unorm, F::Bgra8UnormSrgb],
            vec![A::Opaque, A::PreMultiplied],
            vec![P::Fifo],
        );
        let cfg = surface_config(&caps, &GpuInit::overlay(), PhysicalSize::new(640, 480));
        let Some(cfg) = cfg else { panic!("expected a config") };
        assert_eq!(cfg.format, F::Bgra8UnormSrgb);
        assert_eq!(cfg.alpha_mode, A::PreMultiplied);
        assert_eq!(cfg.present_mode, P::Fifo);
        assert_eq!((cfg.width, cfg.height), (640, 480));
        assert_eq!(cfg.desired_maximum_frame_latency, 1);

        let none = surface_config(&Caps::default(), &GpuInit::default(), PhysicalSize::new(1, 1));
        assert!(none.is_none());
    }

    #[test]
    fn empty_resize_is_deferred() {
        let caps = caps(vec![F::Bgra8Unorm], vec![A::Opaque], vec![P::Fifo]);
        let size = PhysicalSize::new(100, 100);
        let Some(mut cfg) = surface_config(&caps, &GpuInit::default(), size) else {
            panic!("expected a config")
        };
        assert!(!resize_config(&mut cfg, PhysicalSize::new(0, 50)));
        assert_eq!(cfg.width, 100);
        assert!(resize_config(&mut cfg, PhysicalSize::new(300, 200)));
        assert_eq!((cfg.width, cfg.height), (300, 200));
    }

    #[test]
    fn error_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(SurfaceErrorAction::for_error(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(SurfaceErrorAction::for_error(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::for_error(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
