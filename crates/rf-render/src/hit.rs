//! Hit testing: point → committed stroke lookup.
//!
//! Strokes are treated as closed polygons (last point joined back to the
//! first) with non-zero winding, matching how the fill is painted. Lists
//! are walked newest-first so the topmost match wins.

use kurbo::{Point, Shape};
use rf_core::Stroke;

/// Index of the most recent stroke whose closed outline contains `point`.
/// Strokes with fewer than three points enclose nothing.
pub fn stroke_at(strokes: &[Stroke], point: Point) -> Option<usize> {
    strokes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, s)| encloses(s, point))
        .map(|(i, _)| i)
}

fn encloses(stroke: &Stroke, point: Point) -> bool {
    stroke.len() >= 3 && stroke.closed_path().contains(point)
}
