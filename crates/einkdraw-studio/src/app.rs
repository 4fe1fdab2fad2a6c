use einkdraw_core::input::PointerEvent;
use einkdraw_core::paint::Color;
use einkdraw_core::surface::DrawingSurface;
use einkdraw_core::throttle::RedrawSignal;
use einkdraw_core::time::Clock;
use einkdraw_engine::core::{App, AppControl, FrameCtx};
use einkdraw_engine::input::{Key, Modifiers};
use einkdraw_engine::render::StrokeRenderer;

use crate::settings::OverlaySettings;

/// Lookahead range reachable from the keyboard.
pub const MAX_LOOKAHEAD_MS: i64 = 50;

pub const WIDTH_PRESETS: [f32; 4] = [2.0, 5.0, 10.0, 20.0];

/// Ink colors cycled with `P`, as `0xAARRGGBB`.
pub const PALETTE: [u32; 4] = [0xFF00_0000, 0xFF1E_3A8A, 0xFFB9_1C1C, 0xFF15_803D];

const PAPER: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

/// The overlay: one drawing surface plus its renderer, driven by the runtime.
pub struct OverlayApp<C: Clock> {
    surface: DrawingSurface<C>,
    renderer: StrokeRenderer,
    background: Color,
    palette_index: usize,
}

impl<C: Clock> OverlayApp<C> {
    pub fn new(settings: &OverlaySettings, clock: C) -> anyhow::Result<Self> {
        let surface = DrawingSurface::new(settings.surface.clone(), clock)?;
        let mut renderer = StrokeRenderer::new();
        renderer.set_antialias(settings.antialias);
        let background = if settings.transparent {
            Color::transparent()
        } else {
            PAPER
        };
        Ok(Self {
            surface,
            renderer,
            background,
            palette_index: 0,
        })
    }

    pub fn surface(&self) -> &DrawingSurface<C> {
        &self.surface
    }

    pub fn antialias(&self) -> bool {
        self.renderer.antialias()
    }

    fn redraw_if(signal: Option<RedrawSignal>) -> AppControl {
        match signal {
            Some(sig) => {
                log::trace!("redraw: {:?}", sig.reason);
                AppControl::Redraw
            }
            None => AppControl::Continue,
        }
    }

    fn nudge_lookahead(&mut self, delta: i64) -> AppControl {
        let cfg = self.surface.predictor_config();
        let next = (cfg.lookahead_ms + delta).clamp(0, MAX_LOOKAHEAD_MS);
        if next != cfg.lookahead_ms
            && self.surface.set_predictor_config(next, cfg.speed_multiplier).is_ok()
        {
            log::info!("lookahead {next} ms");
        }
        AppControl::Continue
    }

    fn set_width(&mut self, width: f32) -> AppControl {
        let color = self.surface.stroke_style().color;
        if self.surface.set_stroke_style(width, color).is_ok() {
            log::info!("stroke width {width}");
        }
        AppControl::Continue
    }

    fn cycle_palette(&mut self) -> AppControl {
        self.palette_index = (self.palette_index + 1) % PALETTE.len();
        let color = Color::from_argb_u32(PALETTE[self.palette_index]);
        let width = self.surface.stroke_style().width;
        if self.surface.set_stroke_style(width, color).is_ok() {
            log::info!("ink color {:#010x}", PALETTE[self.palette_index]);
        }
        AppControl::Continue
    }

    /// Applies one keyboard shortcut.
    pub fn handle_key(&mut self, key: Key, mods: Modifiers) -> AppControl {
        match key {
            Key::Escape => AppControl::Exit,
            Key::U => Self::redraw_if(self.surface.undo()),
            Key::Z if mods.command() => Self::redraw_if(self.surface.undo()),
            Key::C if !mods.command() => Self::redraw_if(Some(self.surface.clear())),
            Key::E => {
                let enabled = !self.surface.is_enabled();
                Self::redraw_if(self.surface.set_enabled(enabled))
            }
            Key::K => {
                self.surface
                    .set_predictor_variant(self.surface.predictor_kind().toggled());
                AppControl::Continue
            }
            Key::BracketLeft => self.nudge_lookahead(-1),
            Key::BracketRight => self.nudge_lookahead(1),
            Key::P => self.cycle_palette(),
            Key::A => {
                let on = !self.renderer.antialias();
                self.renderer.set_antialias(on);
                log::info!("anti-aliasing {}", if on { "on" } else { "off" });
                AppControl::Redraw
            }
            other => match other.digit() {
                Some(d @ 1..=4) => self.set_width(WIDTH_PRESETS[usize::from(d - 1)]),
                _ => AppControl::Continue,
            },
        }
    }
}

impl<C: Clock> App for OverlayApp<C> {
    fn on_pointer(&mut self, event: PointerEvent) -> AppControl {
        Self::redraw_if(self.surface.on_pointer_event(event))
    }

    fn on_key(&mut self, key: Key, mods: Modifiers) -> AppControl {
        self.handle_key(key, mods)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let snapshot = self.surface.snapshot_for_render();
        // A compositor without alpha would show transparent as black.
        let clear = if ctx.gpu.is_see_through() { self.background } else { PAPER };
        let renderer = &mut self.renderer;
        ctx.render(clear, |rctx, target| {
            renderer.render(rctx, target, &snapshot);
        })
    }
}
