use einkdraw_core::input::PointerEvent;

use crate::input::{Key, Modifiers};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Something visible changed; schedule a frame.
    Redraw,
    Exit,
}

impl AppControl {
    /// Combines two directives, keeping the strongest.
    pub fn merge(self, other: AppControl) -> AppControl {
        use AppControl::*;
        match (self, other) {
            (Exit, _) | (_, Exit) => Exit,
            (Redraw, _) | (_, Redraw) => Redraw,
            _ => Continue,
        }
    }
}

/// Application contract implemented by higher layers.
///
/// The runtime only repaints on demand: frames are rendered when a callback
/// returns [`AppControl::Redraw`] or the window itself needs one (first show,
/// resize, scale change).
pub trait App {
    /// Called for every translated mouse or touch event.
    fn on_pointer(&mut self, event: PointerEvent) -> AppControl;

    /// Called on key press. Repeats included.
    fn on_key(&mut self, key: Key, mods: Modifiers) -> AppControl {
        let _ = (key, mods);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
