//! View transform and input normalization.
//!
//! The raster is always rendered in *logical* space (its backing-store
//! pixels). Zoom and pan only affect presentation and the inverse mapping
//! of pointer positions:
//!
//! ```text
//! logical = (screen - origin) * (backing / display) / zoom - pan
//! screen  = (logical + pan) * zoom * (display / backing) + origin
//! ```

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Where the drawing canvas sits on screen and how large its pixel buffer is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    /// Top-left of the canvas element in screen (client) coordinates.
    pub origin: Point,
    /// Rendered CSS size of the element.
    pub display: Size,
    /// Backing-store resolution (`canvas.width`/`canvas.height`).
    pub backing: Size,
}

impl CanvasGeometry {
    pub fn new(origin: Point, display: Size, backing: Size) -> Self {
        Self {
            origin,
            display,
            backing,
        }
    }

    /// A canvas at the screen origin displayed at its native resolution.
    pub fn unscaled(size: Size) -> Self {
        Self::new(Point::ZERO, size, size)
    }

    /// Backing pixels per display pixel, per axis. Falls back to 1 on an
    /// axis whose display or backing size is not positive (not laid out yet).
    pub fn scale(&self) -> Vec2 {
        let axis = |backing: f64, display: f64| {
            if display > 0.0 && backing > 0.0 {
                backing / display
            } else {
                1.0
            }
        };
        Vec2::new(
            axis(self.backing.width, self.display.width),
            axis(self.backing.height, self.display.height),
        )
    }
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self::unscaled(Size::new(640.0, 480.0))
    }
}

/// Zoom limits. The lower bound may sit below 1 so a large photo can be
/// fitted into a small viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 3.0,
            step: 0.1,
        }
    }
}

impl ZoomBounds {
    /// Positive, finite and ordered, with a positive step.
    pub fn is_usable(&self) -> bool {
        self.min > 0.0
            && self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && self.step > 0.0
            && self.step.is_finite()
    }

    /// These bounds, or the defaults when they are not usable.
    pub fn sanitized(self) -> Self {
        if self.is_usable() {
            self
        } else {
            log::warn!(
                "unusable zoom bounds [{}, {}] step {}, using defaults",
                self.min,
                self.max,
                self.step
            );
            Self::default()
        }
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min;
        }
        zoom.clamp(self.min, self.max)
    }
}

/// Zoom level and pan offset of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    /// Pan offset in logical pixels. Unconstrained: panning past the image
    /// edge is allowed.
    pan: Vec2,
    bounds: ZoomBounds,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl ViewTransform {
    pub fn new(bounds: ZoomBounds) -> Self {
        let bounds = bounds.sanitized();
        Self {
            zoom: bounds.clamp(1.0),
            pan: Vec2::ZERO,
            bounds,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Set the zoom level, clamped into bounds. Returns `true` if it changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        // Round away accumulated 0.1-step error so 1.0 + 10 * 0.1 lands on 2.0.
        let next = self.bounds.clamp((zoom * 1000.0).round() / 1000.0);
        let changed = (next - self.zoom).abs() > f64::EPSILON;
        self.zoom = next;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + self.bounds.step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - self.bounds.step)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.bounds.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.bounds.min
    }

    /// Move the view by a delta given in backing pixels; the delta is
    /// divided by the zoom so the content follows the pointer.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta / self.zoom;
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Return to the home view: pan at the origin, zoom 1, or when the
    /// viewport is smaller than the image, the largest zoom below 1 that
    /// fits the whole image.
    pub fn reset(&mut self, image: Size, viewport: Option<Size>) {
        let fit = match viewport {
            Some(vp) if image.width > 0.0 && image.height > 0.0 => {
                (vp.width / image.width).min(vp.height / image.height).min(1.0)
            }
            _ => 1.0,
        };
        self.pan = Vec2::ZERO;
        self.zoom = self.bounds.clamp(fit);
    }

    /// Map a screen position to logical canvas space.
    pub fn to_logical(&self, screen: Point, geometry: &CanvasGeometry) -> Point {
        let scale = geometry.scale();
        let local = screen - geometry.origin;
        Point::new(
            local.x * scale.x / self.zoom - self.pan.x,
            local.y * scale.y / self.zoom - self.pan.y,
        )
    }

    /// Inverse of [`to_logical`](Self::to_logical).
    pub fn to_screen(&self, logical: Point, geometry: &CanvasGeometry) -> Point {
        let scale = geometry.scale();
        Point::new(
            (logical.x + self.pan.x) * self.zoom / scale.x + geometry.origin.x,
            (logical.y + self.pan.y) * self.zoom / scale.y + geometry.origin.y,
        )
    }

    /// Logical raster pixels → backing pixels of the visible canvas.
    pub fn to_affine(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.pan)
    }
}

/// Line width in backing pixels for a slider value, so a stroke looks
/// equally thick whatever the canvas's display scale.
pub fn effective_line_width(width: u8, geometry: &CanvasGeometry) -> f64 {
    width as f64 * geometry.scale().x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn zoom_steps_and_clamps() {
        let mut view = ViewTransform::new(ZoomBounds {
            min: 1.0,
            max: 3.0,
            step: 0.1,
        });
        assert!(!view.zoom_out(), "already at the lower bound");
        for _ in 0..10 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), 2.0);
        for _ in 0..30 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), 3.0);
        assert!(!view.can_zoom_in());
    }

    #[test]
    fn finer_steps_survive_rounding() {
        let mut view = ViewTransform::new(ZoomBounds {
            min: 0.5,
            max: 3.0,
            step: 0.05,
        });
        view.zoom_in();
        assert_eq!(view.zoom(), 1.05);
        view.zoom_in();
        assert_eq!(view.zoom(), 1.1);
    }

    #[test]
    fn inverted_or_nan_bounds_fall_back_to_defaults() {
        let inverted = ZoomBounds {
            min: 2.0,
            max: 1.0,
            step: 0.1,
        };
        let view = ViewTransform::new(inverted);
        assert_eq!(view.bounds(), ZoomBounds::default());
        assert_eq!(view.zoom(), 1.0);

        let nan = ZoomBounds {
            min: f64::NAN,
            ..ZoomBounds::default()
        };
        assert!(!nan.is_usable());
        assert_eq!(ViewTransform::new(nan).bounds(), ZoomBounds::default());
        assert_eq!(ZoomBounds::default().clamp(f64::NAN), 0.5);
    }

    #[test]
    fn pan_is_scaled_by_zoom() {
        let mut view = ViewTransform::default();
        view.set_zoom(2.0);
        view.pan_by(Vec2::new(10.0, -4.0));
        assert_eq!(view.pan(), Vec2::new(5.0, -2.0));
    }

    #[test]
    fn reset_fits_large_image() {
        let mut view = ViewTransform::default();
        view.set_zoom(2.5);
        view.pan_by(Vec2::new(30.0, 30.0));
        view.reset(Size::new(1600.0, 1200.0), Some(Size::new(800.0, 800.0)));
        assert_eq!(view.zoom(), 0.5);
        assert_eq!(view.pan(), Vec2::ZERO);

        view.reset(Size::new(400.0, 300.0), Some(Size::new(800.0, 800.0)));
        assert_eq!(view.zoom(), 1.0, "never zooms past 1 to fit");

        view.reset(Size::new(4000.0, 4000.0), Some(Size::new(400.0, 400.0)));
        assert_eq!(view.zoom(), 0.5, "fit is clamped into bounds");
    }

    #[test]
    fn logical_mapping_formula() {
        let mut view = ViewTransform::default();
        view.set_zoom(2.0);
        view.set_pan(Vec2::new(10.0, 10.0));
        let geometry = CanvasGeometry::unscaled(Size::new(640.0, 480.0));
        let p = view.to_logical(Point::new(110.0, 110.0), &geometry);
        assert!(approx(p, Point::new(45.0, 45.0)), "got {p:?}");

        view.set_pan(Vec2::new(5.0, 5.0));
        let p = view.to_logical(Point::new(110.0, 110.0), &geometry);
        assert!(approx(p, Point::new(50.0, 50.0)), "got {p:?}");
    }

    #[test]
    fn display_scaling_and_origin() {
        let view = ViewTransform::default();
        let geometry = CanvasGeometry::new(
            Point::new(20.0, 40.0),
            Size::new(320.0, 240.0),
            Size::new(640.0, 480.0),
        );
        let p = view.to_logical(Point::new(120.0, 140.0), &geometry);
        assert!(approx(p, Point::new(200.0, 200.0)), "got {p:?}");
    }

    #[test]
    fn screen_roundtrip() {
        let geometry = CanvasGeometry::new(
            Point::new(13.0, 7.5),
            Size::new(300.0, 200.0),
            Size::new(1024.0, 768.0),
        );
        for &(zoom, px, py) in &[(1.0, 0.0, 0.0), (2.0, 10.0, 10.0), (0.7, -33.3, 12.5), (3.0, 500.0, -250.0)] {
            let mut view = ViewTransform::default();
            view.set_zoom(zoom);
            view.set_pan(Vec2::new(px, py));
            for &(sx, sy) in &[(0.0, 0.0), (110.0, 110.0), (299.9, 1.25), (-50.0, 900.0)] {
                let screen = Point::new(sx, sy);
                let back = view.to_screen(view.to_logical(screen, &geometry), &geometry);
                assert!(approx(screen, back), "{screen:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn affine_matches_forward_mapping() {
        let mut view = ViewTransform::default();
        view.set_zoom(1.5);
        view.set_pan(Vec2::new(-4.0, 6.0));
        let geometry = CanvasGeometry::unscaled(Size::new(100.0, 100.0));
        let logical = Point::new(20.0, 30.0);
        assert!(approx(view.to_affine() * logical, view.to_screen(logical, &geometry)));
    }

    #[test]
    fn effective_width_compensates_display_scale() {
        let half = CanvasGeometry::new(Point::ZERO, Size::new(320.0, 240.0), Size::new(640.0, 480.0));
        assert_eq!(effective_line_width(10, &half), 20.0);
        let zero = CanvasGeometry::new(Point::ZERO, Size::ZERO, Size::new(640.0, 480.0));
        assert_eq!(effective_line_width(4, &zero), 4.0);
    }
}
