//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` enum
//! consumed by the tool controller. Positions are raw screen (client)
//! coordinates; mapping to canvas space happens in the session.

use rf_core::Point;
use smallvec::SmallVec;

/// Which mouse button produced a pointer event. Touch is always `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }

    /// Middle and secondary drags pan the view instead of drawing.
    pub fn is_pan(self) -> bool {
        matches!(self, Self::Middle | Self::Secondary)
    }
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

/// Device-specific payload of a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointer {
    Mouse { x: f64, y: f64, button: PointerButton },
    /// Active touches in DOM order; only the first one drives the gesture.
    Touch { touches: SmallVec<[TouchPoint; 2]> },
}

impl RawPointer {
    pub fn mouse(x: f64, y: f64, button: PointerButton) -> Self {
        Self::Mouse { x, y, button }
    }

    /// Build from a flat `[x0, y0, x1, y1, ...]` list (how the web bridge
    /// receives `TouchEvent.touches`). A trailing odd value is ignored.
    pub fn touch_from_coords(coords: &[f64]) -> Self {
        let touches = coords
            .chunks_exact(2)
            .map(|xy| TouchPoint { x: xy[0], y: xy[1] })
            .collect();
        Self::Touch { touches }
    }

    /// Screen position driving this event; `None` for a touch event with
    /// no active contacts.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Mouse { x, y, .. } => Some(Point::new(*x, *y)),
            Self::Touch { touches } => touches.first().map(|t| Point::new(t.x, t.y)),
        }
    }

    pub fn button(&self) -> PointerButton {
        match self {
            Self::Mouse { button, .. } => *button,
            Self::Touch { .. } => PointerButton::Primary,
        }
    }

    /// Touch interactions must cancel the browser's scroll/zoom gestures.
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch { .. })
    }
}

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse down / touch start.
    PointerDown(RawPointer),
    /// Mouse move / touch move.
    PointerMove(RawPointer),
    /// Mouse up / touch end.
    PointerUp(RawPointer),
    /// Pointer left the canvas. Treated exactly like `PointerUp`.
    PointerLeave,
    /// Mouse wheel; negative `delta_y` (scroll up) zooms in.
    Wheel { delta_y: f64 },
    /// Keyboard shortcut.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }
}
