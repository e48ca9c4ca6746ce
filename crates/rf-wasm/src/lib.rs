//! WASM bridge for RF: exposes the region-selection step to the wizard page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM
//! listeners and forwards every event here; results come back as plain
//! values or small JSON strings.

mod render2d;

use rf_core::{CanvasGeometry, Category, PenColor, Point, SessionConfig, Size, Tool};
use rf_editor::{
    DrawingSession, InputEvent, InputOutcome, NOTICE_MESSAGE, PointerButton, RawPointer, SelectionStep,
    ShortcutAction, ShortcutMap,
};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The page-facing handle for one visit to the selection step.
#[wasm_bindgen]
pub struct RfCanvas {
    step: SelectionStep,
    /// Offscreen canvas holding the uploaded raster, created on first render.
    scratch: Option<HtmlCanvasElement>,
}

#[wasm_bindgen]
impl RfCanvas {
    /// Enter the selection step. `config_json` may be empty; an invalid
    /// config is reported to the console and replaced by the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, now: f64) -> Self {
        console_error_panic_hook_setup();

        let config = SessionConfig::from_json(config_json).unwrap_or_else(|e| {
            web_sys::console::warn_1(&format!("RF: {e}; using default config").into());
            SessionConfig::default()
        });
        Self {
            step: SelectionStep::new(config, now),
            scratch: None,
        }
    }

    /// Size the overlay to the loaded photo.
    /// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn mount(&mut self, image_url: &str, width: u32, height: u32) -> String {
        let Some(session) = self.live_session() else {
            return error_json("selection step was torn down");
        };
        match session.mount(image_url, width, height) {
            Ok(()) => r#"{"ok":true}"#.to_string(),
            Err(e) => error_json(&e),
        }
    }

    /// Report the canvas element's client rect and backing size.
    pub fn set_geometry(
        &mut self,
        left: f64,
        top: f64,
        display_width: f64,
        display_height: f64,
        backing_width: f64,
        backing_height: f64,
    ) {
        if let Some(session) = self.live_session() {
            session.set_geometry(CanvasGeometry::new(
                Point::new(left, top),
                Size::new(display_width, display_height),
                Size::new(backing_width, backing_height),
            ));
        }
    }

    // ─── Pointer / touch / wheel ─────────────────────────────────────────
    //
    // Each handler returns JSON `{"changed":bool,"suppressDefault":bool}`.

    pub fn handle_pointer_down(&mut self, x: f64, y: f64, button: i16) -> String {
        let raw = RawPointer::mouse(x, y, PointerButton::from_dom(button));
        self.dispatch(InputEvent::PointerDown(raw))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64, button: i16) -> String {
        let raw = RawPointer::mouse(x, y, PointerButton::from_dom(button));
        self.dispatch(InputEvent::PointerMove(raw))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64, button: i16) -> String {
        let raw = RawPointer::mouse(x, y, PointerButton::from_dom(button));
        self.dispatch(InputEvent::PointerUp(raw))
    }

    pub fn handle_pointer_leave(&mut self) -> String {
        self.dispatch(InputEvent::PointerLeave)
    }

    /// `touches` is `[clientX0, clientY0, clientX1, clientY1, ...]`.
    pub fn handle_touch_start(&mut self, touches: &[f64]) -> String {
        self.dispatch(InputEvent::PointerDown(RawPointer::touch_from_coords(touches)))
    }

    pub fn handle_touch_move(&mut self, touches: &[f64]) -> String {
        self.dispatch(InputEvent::PointerMove(RawPointer::touch_from_coords(touches)))
    }

    pub fn handle_touch_end(&mut self, touches: &[f64]) -> String {
        self.dispatch(InputEvent::PointerUp(RawPointer::touch_from_coords(touches)))
    }

    pub fn handle_wheel(&mut self, delta_y: f64) -> String {
        self.dispatch(InputEvent::Wheel { delta_y })
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>", "tool":"<tool_name>"}`
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        now: f64,
    ) -> String {
        let action = match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(a) => a,
            None => return r#"{"changed":false,"action":"none","tool":""}"#.to_string(),
        };
        let changed = !self.step.is_torn_down() && self.step.apply(action, now);
        let action_name = action_to_name(action);
        let tool_name = self.step.session().tool().name();
        format!(r#"{{"changed":{changed},"action":"{action_name}","tool":"{tool_name}"}}"#)
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Switch tool by name (`"draw"`/`"pen"` or `"fill"`). Returns `false`
    /// for unknown names and for a refused switch.
    pub fn set_tool(&mut self, name: &str) -> bool {
        let Some(tool) = Tool::from_name(name) else {
            return false;
        };
        self.live_session().is_some_and(|s| s.switch_tool(tool))
    }

    pub fn get_tool_name(&self) -> String {
        self.step.session().tool().name().to_string()
    }

    pub fn set_pen(&mut self, name: &str) -> bool {
        let Some(pen) = PenColor::from_name(name) else {
            return false;
        };
        self.live_session().is_some_and(|s| s.set_pen(pen))
    }

    pub fn set_line_width(&mut self, width: u8) -> bool {
        self.live_session().is_some_and(|s| s.set_line_width(width))
    }

    pub fn get_line_width(&self) -> u8 {
        self.step.session().line_width()
    }

    pub fn set_category(&mut self, name: &str) -> bool {
        let Some(category) = Category::from_name(name) else {
            return false;
        };
        self.live_session().is_some_and(|s| s.set_category(category))
    }

    pub fn undo(&mut self) -> bool {
        self.live_session().is_some_and(|s| s.undo())
    }

    pub fn redo(&mut self) -> bool {
        self.live_session().is_some_and(|s| s.redo())
    }

    pub fn can_undo(&self) -> bool {
        self.step.session().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.step.session().can_redo()
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> bool {
        self.live_session().is_some_and(|s| s.zoom_in())
    }

    pub fn zoom_out(&mut self) -> bool {
        self.live_session().is_some_and(|s| s.zoom_out())
    }

    pub fn can_zoom_in(&self) -> bool {
        self.step.session().view().can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.step.session().view().can_zoom_out()
    }

    /// Home view. Pass a positive viewport size to fit a large photo, or
    /// zeros for plain zoom 1.
    pub fn reset_view(&mut self, viewport_width: f64, viewport_height: f64) {
        let viewport = (viewport_width > 0.0 && viewport_height > 0.0)
            .then(|| Size::new(viewport_width, viewport_height));
        if let Some(session) = self.live_session() {
            session.reset_view(viewport);
        }
    }

    /// Current view as JSON: `{"zoom":f,"panX":f,"panY":f,"transform":[a,b,c,d,e,f]}`.
    /// The page applies the same transform to the photo underneath.
    pub fn get_view_json(&self) -> String {
        let view = self.step.session().view();
        serde_json::json!({
            "zoom": view.zoom(),
            "panX": view.pan().x,
            "panY": view.pan().y,
            "transform": render2d::transform_coeffs(view),
        })
        .to_string()
    }

    // ─── Rendering & timers ──────────────────────────────────────────────

    /// Draw the overlay onto the visible canvas through the view transform.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        let Some(raster) = self.step.session().raster() else {
            return;
        };
        if self.scratch.is_none() {
            match render2d::create_scratch() {
                Ok(canvas) => self.scratch = Some(canvas),
                Err(e) => {
                    web_sys::console::error_2(&"RF: cannot create scratch canvas".into(), &e);
                    return;
                }
            }
        }
        let Some(scratch) = self.scratch.as_ref() else {
            return;
        };
        if let Err(e) = render2d::present(ctx, scratch, raster, self.step.session().view()) {
            web_sys::console::error_2(&"RF: render failed".into(), &e);
        }
    }

    /// Advance popup deadlines. Returns `true` if a popup disappeared.
    pub fn tick(&mut self, now: f64) -> bool {
        self.step.tick(now)
    }

    pub fn toggle_help(&mut self, now: f64) -> bool {
        self.step.toggle_help(now)
    }

    pub fn help_visible(&self) -> bool {
        self.step.help_visible()
    }

    pub fn notice_visible(&self) -> bool {
        self.step.notice_visible()
    }

    pub fn notice_message(&self) -> String {
        NOTICE_MESSAGE.to_string()
    }

    pub fn has_drawn(&self) -> bool {
        self.step.session().has_drawn()
    }

    // ─── Hand-off ────────────────────────────────────────────────────────

    /// "Next" button. Returns `{"ok":true,"handoff":{...}}`, or
    /// `{"ok":false,"error":"..."}` with the notice shown.
    pub fn try_proceed(&mut self, now: f64) -> String {
        match self.step.try_proceed(now) {
            Some(handoff) => match handoff.to_json() {
                Ok(json) => format!(r#"{{"ok":true,"handoff":{json}}}"#),
                Err(e) => error_json(&e),
            },
            None => error_json(NOTICE_MESSAGE),
        }
    }

    /// The current selection as JSON, regardless of the navigation guard.
    pub fn handoff_json(&self) -> String {
        match self.step.session().handoff().to_json() {
            Ok(json) => json,
            Err(e) => error_json(&e),
        }
    }

    /// The current selection as MessagePack bytes (empty on failure).
    pub fn handoff_msgpack(&self) -> js_sys::Uint8Array {
        match self.step.session().handoff().to_msgpack() {
            Ok(bytes) => js_sys::Uint8Array::from(&bytes[..]),
            Err(e) => {
                web_sys::console::error_1(&format!("RF: {e}").into());
                js_sys::Uint8Array::new_with_length(0)
            }
        }
    }

    /// Leave the step. Pending popups are cancelled and further input is
    /// ignored.
    pub fn teardown(&mut self) {
        self.step.teardown();
        self.scratch = None;
    }
}

impl RfCanvas {
    /// The session, unless the step has been torn down.
    fn live_session(&mut self) -> Option<&mut DrawingSession> {
        if self.step.is_torn_down() {
            None
        } else {
            Some(self.step.session_mut())
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> String {
        outcome_json(self.step.handle(&event, 0.0))
    }
}

fn outcome_json(outcome: InputOutcome) -> String {
    format!(
        r#"{{"changed":{},"suppressDefault":{}}}"#,
        outcome.changed, outcome.suppress_default
    )
}

fn error_json(message: &str) -> String {
    let escaped = message.replace('\\', "\\\\").replace('"', "\\\"");
    format!(r#"{{"ok":false,"error":"{escaped}"}}"#)
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::ToolDraw => "toolDraw",
        ShortcutAction::ToolFill => "toolFill",
        ShortcutAction::PenWarm => "penWarm",
        ShortcutAction::PenCool => "penCool",
        ShortcutAction::PenBlack => "penBlack",
        ShortcutAction::Thinner => "thinner",
        ShortcutAction::Thicker => "thicker",
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::ZoomIn => "zoomIn",
        ShortcutAction::ZoomOut => "zoomOut",
        ShortcutAction::ResetView => "resetView",
        ShortcutAction::ToggleHelp => "toggleHelp",
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("RF WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate a session config. Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match SessionConfig::from_json(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => error_json(&e),
    }
}

/// Parse a CSS colour into `{"ok":true,"rgba":"rgba(r, g, b, a)"}`.
#[wasm_bindgen]
pub fn normalize_color(css: &str) -> String {
    match rf_core::parse_color(css) {
        Ok(color) => format!(r#"{{"ok":true,"rgba":"{}"}}"#, color.to_css()),
        Err(e) => error_json(&e),
    }
}
