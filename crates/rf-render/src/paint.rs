//! Session layers → raster pixels.
//!
//! The whole overlay is redrawn from scratch on every call, always in the
//! same order so later layers occlude earlier ones consistently:
//!
//! 1. filled selection regions (fill, then closed outline)
//! 2. committed strokes
//! 3. the in-progress stroke

use crate::raster::Raster;
use kurbo::Point;
use rf_core::{Rgba, SelectionRegion, Stroke};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Stroke as SkiaStroke, Transform};

/// Everything the pipeline draws, borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub struct Layers<'a> {
    pub regions: &'a [SelectionRegion],
    pub strokes: &'a [Stroke],
    pub active: Option<&'a Stroke>,
}

/// Clear `raster` and repaint every layer.
pub fn render(raster: &mut Raster, layers: &Layers<'_>) {
    raster.clear();

    for region in layers.regions.iter().filter(|r| r.filled) {
        paint_region(raster, region);
    }

    for stroke in layers.strokes {
        paint_stroke(raster, stroke);
    }

    if let Some(active) = layers.active {
        paint_stroke(raster, active);
    }

    log::trace!(
        "rendered {} regions, {} strokes, active={}",
        layers.regions.len(),
        layers.strokes.len(),
        layers.active.is_some()
    );
}

// ─── Shape painters ──────────────────────────────────────────────────────────

fn paint_region(raster: &mut Raster, region: &SelectionRegion) {
    let Some(outline) = polyline(region.path.points(), true) else {
        return;
    };
    raster.pixmap_mut().fill_path(
        &outline,
        &solid(region.fill_color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
    raster.pixmap_mut().stroke_path(
        &outline,
        &solid(region.outline_color),
        &round_stroke(region.path.width),
        Transform::identity(),
        None,
    );
}

fn paint_stroke(raster: &mut Raster, stroke: &Stroke) {
    // A lone point has no segment and leaves no ink.
    if !stroke.is_drawable() {
        return;
    }
    if let Some(path) = polyline(stroke.points(), false) {
        raster.pixmap_mut().stroke_path(
            &path,
            &solid(stroke.color),
            &round_stroke(stroke.width),
            Transform::identity(),
            None,
        );
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn polyline(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

fn solid(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f64) -> SkiaStroke {
    SkiaStroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::PenColor;

    fn square(x0: f64, y0: f64, side: f64, width: f64, color: Rgba) -> Stroke {
        Stroke::from_points(
            vec![
                Point::new(x0, y0),
                Point::new(x0 + side, y0),
                Point::new(x0 + side, y0 + side),
                Point::new(x0, y0 + side),
            ],
            width,
            color,
        )
    }

    #[test]
    fn empty_layers_clear_the_raster() {
        let mut raster = Raster::new(16, 16).unwrap();
        raster.pixmap_mut().fill(tiny_skia::Color::WHITE);
        render(
            &mut raster,
            &Layers {
                regions: &[],
                strokes: &[],
                active: None,
            },
        );
        assert!(raster.is_blank());
    }

    #[test]
    fn stroke_leaves_interior_empty() {
        let mut raster = Raster::new(64, 64).unwrap();
        let stroke = square(10.0, 10.0, 40.0, 4.0, PenColor::Warm.stroke());
        render(
            &mut raster,
            &Layers {
                regions: &[],
                strokes: std::slice::from_ref(&stroke),
                active: None,
            },
        );
        let edge = raster.pixel(30, 10).unwrap();
        assert!(edge.a > 0, "top edge should be inked");
        assert_eq!(raster.pixel(30, 30).unwrap().a, 0, "open polyline is not filled");
    }

    #[test]
    fn region_fills_interior_with_fill_color() {
        let mut raster = Raster::new(64, 64).unwrap();
        let region = SelectionRegion::from_stroke(
            square(10.0, 10.0, 40.0, 2.0, PenColor::Cool.stroke()),
            PenColor::Cool.fill(),
        );
        render(
            &mut raster,
            &Layers {
                regions: std::slice::from_ref(&region),
                strokes: &[],
                active: None,
            },
        );
        let inside = raster.pixel(30, 30).unwrap();
        assert_eq!(inside.a, PenColor::Cool.fill().a);
        assert_eq!(raster.pixel(60, 60).unwrap().a, 0);
        // Closing segment from the last point back to the first is outlined.
        assert!(raster.pixel(10, 30).unwrap().a > inside.a);
    }

    #[test]
    fn single_point_stroke_draws_nothing() {
        let mut raster = Raster::new(8, 8).unwrap();
        let dot = Stroke::new(Point::new(4.0, 4.0), 6.0, PenColor::Black.stroke());
        render(
            &mut raster,
            &Layers {
                regions: &[],
                strokes: &[],
                active: Some(&dot),
            },
        );
        assert!(raster.is_blank());
    }

    #[test]
    fn render_is_deterministic() {
        let strokes = vec![
            square(2.0, 2.0, 20.0, 3.0, PenColor::Warm.stroke()),
            square(8.0, 8.0, 20.0, 5.0, PenColor::Black.stroke()),
        ];
        let layers = Layers {
            regions: &[],
            strokes: &strokes,
            active: None,
        };
        let mut a = Raster::new(32, 32).unwrap();
        let mut b = Raster::new(32, 32).unwrap();
        render(&mut a, &layers);
        render(&mut b, &layers);
        render(&mut b, &layers);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
