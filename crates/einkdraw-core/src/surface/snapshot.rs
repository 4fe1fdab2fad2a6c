use crate::paint::StrokeStyle;
use crate::predict::PredictedSegment;
use crate::stroke::Stroke;

/// Lookahead segment together with the style of the stroke it extends.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedStroke {
    pub segment: PredictedSegment,
    pub style: StrokeStyle,
}

/// Detached copy of everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    /// Committed strokes, oldest first. May include an empty placeholder.
    pub strokes: Vec<Stroke>,
    pub predicted: Option<PredictedStroke>,
    /// Increases whenever strokes or the prediction change.
    pub revision: u64,
}

impl RenderSnapshot {
    /// Number of line segments the snapshot will produce, prediction included.
    ///
    /// Single-point strokes count as one (a dot).
    pub fn segment_count(&self) -> usize {
        let committed: usize = self
            .strokes
            .iter()
            .map(|s| s.len().saturating_sub(1).max(usize::from(!s.is_empty())))
            .sum();
        let predicted = self
            .predicted
            .as_ref()
            .map_or(0, |p| p.segment.len() - 1);
        committed + predicted
    }
}
