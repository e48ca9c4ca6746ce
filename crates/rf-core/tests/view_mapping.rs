//! Integration tests: input normalization through the public `rf-core` API.
//!
//! Exercises config → view transform → logical coordinates, the way the
//! editor wires them together.

use rf_core::{
    CanvasGeometry, Point, SessionConfig, Size, Vec2, ViewTransform, effective_line_width,
};

fn view_from(json: &str) -> ViewTransform {
    let config = SessionConfig::from_json(json).expect("valid config");
    ViewTransform::new(config.zoom)
}

// ─── Zoom bounds from config ─────────────────────────────────────────────

#[test]
fn strict_bounds_never_zoom_below_one() {
    let mut view = view_from(r#"{"zoom":{"min":1.0,"max":3.0}}"#);
    for _ in 0..5 {
        view.zoom_out();
    }
    assert_eq!(view.zoom(), 1.0);
}

#[test]
fn relaxed_bounds_allow_half_zoom() {
    let mut view = view_from("");
    for _ in 0..20 {
        view.zoom_out();
    }
    assert_eq!(view.zoom(), 0.5);
}

// ─── Coordinate mapping ──────────────────────────────────────────────────

#[test]
fn zoom_two_pan_ten_click() {
    let mut view = view_from("");
    view.set_zoom(2.0);
    view.set_pan(Vec2::new(10.0, 10.0));
    let geometry = CanvasGeometry::unscaled(Size::new(640.0, 480.0));

    let logical = view.to_logical(Point::new(110.0, 110.0), &geometry);
    assert!((logical.x - 45.0).abs() < 1e-9, "got {logical:?}");
    assert!((logical.y - 45.0).abs() < 1e-9, "got {logical:?}");
}

#[test]
fn half_size_display_doubles_coordinates_and_width() {
    let view = view_from("");
    let geometry = CanvasGeometry::new(
        Point::new(0.0, 0.0),
        Size::new(320.0, 240.0),
        Size::new(640.0, 480.0),
    );

    let logical = view.to_logical(Point::new(160.0, 120.0), &geometry);
    assert_eq!(logical, Point::new(320.0, 240.0));
    assert_eq!(effective_line_width(10, &geometry), 20.0);
}

#[test]
fn pan_drag_keeps_point_under_cursor() {
    // Dragging by d screen pixels moves a fixed logical point by d on screen.
    let mut view = view_from("");
    view.set_zoom(2.0);
    let geometry = CanvasGeometry::unscaled(Size::new(640.0, 480.0));
    let anchor = Point::new(40.0, 60.0);
    let before = view.to_screen(anchor, &geometry);

    view.pan_by(Vec2::new(30.0, -12.0));
    let after = view.to_screen(anchor, &geometry);
    assert!((after.x - before.x - 30.0).abs() < 1e-9);
    assert!((after.y - before.y + 12.0).abs() < 1e-9);
}
