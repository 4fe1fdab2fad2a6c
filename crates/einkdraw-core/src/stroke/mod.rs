//! Committed strokes and the undo stack that holds them.

mod canvas;

pub use canvas::Canvas;

use std::fmt;

use crate::coords::Vec2;
use crate::paint::StrokeStyle;

/// Stable identifier of a stroke within one canvas.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StrokeId(pub u64);

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stroke#{}", self.0)
    }
}

/// One continuous pen gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Vec2>,
    style: StrokeStyle,
}

impl Stroke {
    pub(crate) fn new(id: StrokeId, style: StrokeStyle) -> Self {
        Self {
            id,
            points: Vec::new(),
            style,
        }
    }

    #[inline]
    pub fn id(&self) -> StrokeId {
        self.id
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub(crate) fn push(&mut self, p: Vec2) {
        self.points.push(p);
    }

    pub(crate) fn restyle(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}
