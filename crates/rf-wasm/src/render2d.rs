//! Canvas2D presentation of the overlay raster.
//!
//! The raster is uploaded to an offscreen scratch canvas at its logical
//! size, then drawn onto the visible canvas through the view transform.
//! Zooming and panning never touch the raster itself.

use rf_core::ViewTransform;
use rf_render::Raster;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// `setTransform` arguments `(a, b, c, d, e, f)` for the view.
pub fn transform_coeffs(view: &ViewTransform) -> [f64; 6] {
    view.to_affine().as_coeffs()
}

/// Create the offscreen canvas that holds the uploaded raster.
pub fn create_scratch() -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("created element is not a canvas"))
}

/// Upload the raster pixels (straight alpha) into `scratch`, resizing it
/// to match.
fn upload(scratch: &HtmlCanvasElement, raster: &Raster) -> Result<(), JsValue> {
    if scratch.width() != raster.width() || scratch.height() != raster.height() {
        scratch.set_width(raster.width());
        scratch.set_height(raster.height());
    }
    let ctx = scratch
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("scratch canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let pixels = raster.to_rgba8();
    let image =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&pixels[..]), raster.width(), raster.height())?;
    ctx.put_image_data(&image, 0.0, 0.0)
}

/// Clear the visible canvas and draw the overlay through the view.
pub fn present(
    ctx: &CanvasRenderingContext2d,
    scratch: &HtmlCanvasElement,
    raster: &Raster,
    view: &ViewTransform,
) -> Result<(), JsValue> {
    upload(scratch, raster)?;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    if let Some(canvas) = ctx.canvas() {
        ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }

    let [a, b, c, d, e, f] = transform_coeffs(view);
    ctx.set_transform(a, b, c, d, e, f)?;
    ctx.draw_image_with_html_canvas_element(scratch, 0.0, 0.0)?;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
}
