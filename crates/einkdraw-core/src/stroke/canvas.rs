use crate::coords::Vec2;
use crate::paint::StrokeStyle;

use super::{Stroke, StrokeId};

/// Ordered strokes, newest last.
///
/// Invariant: never empty. A lone empty stroke (the placeholder) stands in
/// for a blank canvas and is adopted by the next `begin_stroke`.
#[derive(Debug, Clone)]
pub struct Canvas {
    strokes: Vec<Stroke>,
    next_id: u64,
    revision: u64,
    /// Last stroke is a placeholder nobody has claimed yet.
    placeholder_free: bool,
}

impl Canvas {
    pub fn new(style: StrokeStyle) -> Self {
        let mut canvas = Self {
            strokes: Vec::new(),
            next_id: 0,
            revision: 0,
            placeholder_free: false,
        };
        canvas.push_placeholder(style);
        canvas
    }

    fn alloc_id(&mut self) -> StrokeId {
        let id = StrokeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_placeholder(&mut self, style: StrokeStyle) {
        let id = self.alloc_id();
        self.strokes.push(Stroke::new(id, style));
        self.placeholder_free = true;
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// True when the canvas holds only the empty placeholder.
    pub fn is_blank(&self) -> bool {
        matches!(self.strokes.as_slice(), [only] if only.is_empty())
    }

    /// All strokes including the placeholder, oldest first.
    #[inline]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Strokes that hold at least one point.
    pub fn drawn(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().filter(|s| !s.is_empty())
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        // Recent strokes are the ones written to.
        self.strokes.iter().rev().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.get(id).is_some()
    }

    /// Starts a stroke with `style`.
    ///
    /// An unclaimed placeholder is restyled and reused. Each call claims a
    /// distinct stroke, so concurrent pointers never share one.
    pub fn begin_stroke(&mut self, style: StrokeStyle) -> StrokeId {
        self.bump();
        if std::mem::take(&mut self.placeholder_free) {
            if let Some(placeholder) = self.strokes.last_mut() {
                placeholder.restyle(style);
                return placeholder.id;
            }
        }
        let id = self.alloc_id();
        self.strokes.push(Stroke::new(id, style));
        id
    }

    /// Appends `p` to stroke `id`. Returns false if the stroke is gone.
    pub fn append(&mut self, id: StrokeId, p: Vec2) -> bool {
        let Some(stroke) = self.strokes.iter_mut().rev().find(|s| s.id == id) else {
            return false;
        };
        stroke.push(p);
        self.bump();
        true
    }

    /// Removes the newest stroke.
    ///
    /// Returns `None` on a blank canvas. Removing the last real stroke leaves
    /// a fresh placeholder with the removed stroke's style.
    pub fn undo(&mut self) -> Option<Stroke> {
        if self.is_blank() {
            return None;
        }
        let removed = self.strokes.pop()?;
        if self.strokes.is_empty() {
            self.push_placeholder(removed.style);
        }
        self.bump();
        Some(removed)
    }

    /// Drops every stroke and leaves a single placeholder.
    pub fn clear(&mut self, style: StrokeStyle) {
        self.strokes.clear();
        self.push_placeholder(style);
        self.bump();
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn wide() -> StrokeStyle {
        StrokeStyle::new(9.0, Color::from_srgb_u8(255, 0, 0, 255)).unwrap()
    }

    // ── placeholder ───────────────────────────────────────────────────────

    #[test]
    fn new_canvas_is_blank_but_not_empty() {
        let c = Canvas::default();
        assert_eq!(c.strokes().len(), 1);
        assert!(c.is_blank());
        assert_eq!(c.drawn().count(), 0);
    }

    #[test]
    fn first_stroke_adopts_placeholder() {
        let mut c = Canvas::default();
        let placeholder = c.last().unwrap().id();
        let id = c.begin_stroke(wide());
        assert_eq!(id, placeholder);
        assert_eq!(c.strokes().len(), 1);
        assert_eq!(c.last().unwrap().style(), wide());
    }

    #[test]
    fn second_stroke_pushes() {
        let mut c = Canvas::default();
        let a = c.begin_stroke(StrokeStyle::default());
        c.append(a, Vec2::new(1.0, 1.0));
        let b = c.begin_stroke(StrokeStyle::default());
        assert_ne!(a, b);
        assert_eq!(c.strokes().len(), 2);
    }

    #[test]
    fn placeholder_is_claimed_once() {
        let mut c = Canvas::default();
        let a = c.begin_stroke(StrokeStyle::default());
        // Second finger lands before the first one moved.
        let b = c.begin_stroke(wide());
        assert_ne!(a, b);
        assert_eq!(c.strokes().len(), 2);
    }

    // ── undo / clear ──────────────────────────────────────────────────────

    #[test]
    fn undo_on_blank_is_noop() {
        let mut c = Canvas::default();
        let rev = c.revision();
        assert!(c.undo().is_none());
        assert_eq!(c.revision(), rev);
        assert_eq!(c.strokes().len(), 1);
    }

    #[test]
    fn undo_last_real_stroke_restores_placeholder() {
        let mut c = Canvas::default();
        let a = c.begin_stroke(wide());
        c.append(a, Vec2::new(1.0, 2.0));
        let removed = c.undo().unwrap();
        assert_eq!(removed.id(), a);
        assert!(c.is_blank());
        assert!(!c.contains(a));
        assert_eq!(c.last().unwrap().style(), wide());
    }

    #[test]
    fn undo_keeps_earlier_strokes() {
        let mut c = Canvas::default();
        let a = c.begin_stroke(StrokeStyle::default());
        c.append(a, Vec2::new(0.0, 0.0));
        let b = c.begin_stroke(StrokeStyle::default());
        c.append(b, Vec2::new(5.0, 5.0));
        c.undo();
        assert_eq!(c.strokes().len(), 1);
        assert_eq!(c.last().unwrap().id(), a);
    }

    #[test]
    fn clear_leaves_one_placeholder() {
        let mut c = Canvas::default();
        for i in 0..3 {
            let id = c.begin_stroke(StrokeStyle::default());
            c.append(id, Vec2::new(i as f32, 0.0));
        }
        c.clear(wide());
        assert!(c.is_blank());
        assert_eq!(c.last().unwrap().style(), wide());
    }

    #[test]
    fn append_to_removed_stroke_is_rejected() {
        let mut c = Canvas::default();
        let a = c.begin_stroke(StrokeStyle::default());
        c.append(a, Vec2::new(0.0, 0.0));
        c.undo();
        assert!(!c.append(a, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn revision_increases_on_mutation() {
        let mut c = Canvas::default();
        let r0 = c.revision();
        let a = c.begin_stroke(StrokeStyle::default());
        let r1 = c.revision();
        c.append(a, Vec2::new(0.0, 0.0));
        let r2 = c.revision();
        c.clear(StrokeStyle::default());
        let r3 = c.revision();
        assert!(r0 < r1 && r1 < r2 && r2 < r3);
    }
}
