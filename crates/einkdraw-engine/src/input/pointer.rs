use einkdraw_core::input::{PointerEvent, PointerId, PointerPhase};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Force, MouseButton, TouchPhase, WindowEvent};

/// Pointer id for touch contact `id`. Id 0 is reserved for the mouse.
#[inline]
pub fn touch_pointer_id(id: u64) -> PointerId {
    PointerId(id.saturating_add(1))
}

/// Touch force as a 0..=1 pressure. Devices without force sensing report 1.
///
/// A zero reading passes through so the pipeline's dropout rule applies.
pub fn normalize_force(force: Option<Force>) -> f32 {
    match force {
        None => 1.0,
        Some(f) => {
            let p = f.normalized() as f32;
            if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
        }
    }
}

fn map_touch_phase(phase: TouchPhase) -> PointerPhase {
    match phase {
        TouchPhase::Started => PointerPhase::Down,
        TouchPhase::Moved => PointerPhase::Move,
        TouchPhase::Ended => PointerPhase::Up,
        TouchPhase::Cancelled => PointerPhase::Cancel,
    }
}

/// Turns winit mouse and touch events into [`PointerEvent`]s.
///
/// Only the left mouse button draws. A mouse drag that loses focus or leaves
/// the window ends with `Cancel`, since its release will never be delivered.
#[derive(Debug, Default)]
pub struct PointerTranslator {
    cursor: Option<(f32, f32)>,
    mouse_down: bool,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    /// Translates one window event. Positions are converted to logical pixels
    /// with `scale_factor`; `t` is the monotonic timestamp for the event.
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64, t: i64) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = to_logical(*position, scale_factor);
                self.cursor_moved(x, y, t)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button != MouseButton::Left {
                    return None;
                }
                self.left_button(*state == ElementState::Pressed, t)
            }
            WindowEvent::CursorLeft { .. } => self.cursor_left(t),
            WindowEvent::Focused(focused) => self.focus_changed(*focused, t),
            WindowEvent::Touch(touch) => {
                let (x, y) = to_logical(touch.location, scale_factor);
                Some(self.touch(touch.id, touch.phase, x, y, touch.force, t))
            }
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32, t: i64) -> Option<PointerEvent> {
        self.cursor = Some((x, y));
        self.mouse_down
            .then(|| PointerEvent::moved(PointerId::MOUSE, x, y, 1.0, t))
    }

    pub fn left_button(&mut self, pressed: bool, t: i64) -> Option<PointerEvent> {
        let (x, y) = self.cursor?;
        match (pressed, self.mouse_down) {
            (true, false) => {
                self.mouse_down = true;
                Some(PointerEvent::down(PointerId::MOUSE, x, y, 1.0, t))
            }
            (false, true) => {
                self.mouse_down = false;
                Some(PointerEvent::up(PointerId::MOUSE, x, y, 1.0, t))
            }
            _ => None,
        }
    }

    pub fn cursor_left(&mut self, t: i64) -> Option<PointerEvent> {
        let cancel = self.cancel_mouse(t);
        self.cursor = None;
        cancel
    }

    pub fn focus_changed(&mut self, focused: bool, t: i64) -> Option<PointerEvent> {
        if focused { None } else { self.cancel_mouse(t) }
    }

    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
        force: Option<Force>,
        t: i64,
    ) -> PointerEvent {
        let phase = map_touch_phase(phase);
        let pressure = match phase {
            PointerPhase::Cancel => 0.0,
            _ => normalize_force(force),
        };
        PointerEvent::new(touch_pointer_id(id), phase, x, y, pressure, t)
    }

    fn cancel_mouse(&mut self, t: i64) -> Option<PointerEvent> {
        if !std::mem::take(&mut self.mouse_down) {
            return None;
        }
        let (x, y) = self.cursor.unwrap_or_default();
        log::debug!("mouse drag interrupted, cancelling");
        Some(PointerEvent::cancel(PointerId::MOUSE, x, y, t))
    }
}

fn to_logical(pos: PhysicalPosition<f64>, scale_factor: f64) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn drag_produces_down_move_up() {
        let mut tr = PointerTranslator::new();
        assert_eq!(tr.cursor_moved(1.0, 2.0, 0), None);

        let down = tr.left_button(true, 1).unwrap();
        assert_eq!(down.phase, PointerPhase::Down);
        assert_eq!(down.id, PointerId::MOUSE);
        assert_eq!((down.x, down.y, down.pressure), (1.0, 2.0, 1.0));

        let mv = tr.cursor_moved(3.0, 4.0, 2).unwrap();
        assert_eq!(mv.phase, PointerPhase::Move);

        let up = tr.left_button(false, 3).unwrap();
        assert_eq!(up.phase, PointerPhase::Up);
        assert_eq!((up.x, up.y), (3.0, 4.0));
        assert!(!tr.is_mouse_down());
    }

    #[test]
    fn press_before_any_cursor_position_is_ignored() {
        let mut tr = PointerTranslator::new();
        assert_eq!(tr.left_button(true, 0), None);
        assert!(!tr.is_mouse_down());
    }

    #[test]
    fn focus_loss_cancels_drag() {
        let mut tr = PointerTranslator::new();
        tr.cursor_moved(5.0, 5.0, 0);
        tr.left_button(true, 1);
        let ev = tr.focus_changed(false, 2).unwrap();
        assert_eq!(ev.phase, PointerPhase::Cancel);
        assert_eq!(tr.left_button(false, 3), None);
        assert_eq!(tr.focus_changed(false, 4), None);
    }

    #[test]
    fn leaving_window_cancels_drag() {
        let mut tr = PointerTranslator::new();
        tr.cursor_moved(5.0, 5.0, 0);
        tr.left_button(true, 1);
        assert_eq!(tr.cursor_left(2).map(|e| e.phase), Some(PointerPhase::Cancel));
        assert_eq!(tr.cursor_left(3), None);
    }

    // ── touch ─────────────────────────────────────────────────────────────

    #[test]
    fn touch_ids_are_offset_past_mouse() {
        assert_eq!(touch_pointer_id(0), PointerId(1));
        assert_eq!(touch_pointer_id(7), PointerId(8));
        assert_eq!(touch_pointer_id(u64::MAX), PointerId(u64::MAX));
    }

    #[test]
    fn touch_phases_map_one_to_one() {
        let mut tr = PointerTranslator::new();
        let phases = [
            (TouchPhase::Started, PointerPhase::Down),
            (TouchPhase::Moved, PointerPhase::Move),
            (TouchPhase::Ended, PointerPhase::Up),
            (TouchPhase::Cancelled, PointerPhase::Cancel),
        ];
        for (winit_phase, phase) in phases {
            let ev = tr.touch(3, winit_phase, 10.0, 20.0, None, 0);
            assert_eq!(ev.phase, phase);
            assert_eq!(ev.id, PointerId(4));
        }
    }

    #[test]
    fn force_normalization() {
        assert_eq!(normalize_force(None), 1.0);
        assert_eq!(normalize_force(Some(Force::Normalized(0.25))), 0.25);
        assert_eq!(normalize_force(Some(Force::Normalized(0.0))), 0.0);
        assert_eq!(normalize_force(Some(Force::Normalized(3.0))), 1.0);
        let calibrated = Force::Calibrated {
            force: 2.0,
            max_possible_force: 4.0,
            altitude_angle: None,
        };
        assert_eq!(normalize_force(Some(calibrated)), 0.5);
    }
}
