//! Tool controller: routes normalized input to the drawing session.
//!
//! | Input | Draw tool | Fill tool |
//! |-------|-----------|-----------|
//! | primary down | begin stroke | fill at point |
//! | move | extend stroke | — |
//! | up / leave | commit stroke | — |
//! | secondary or middle drag | pan | pan |
//! | wheel | zoom | zoom |

use crate::input::{InputEvent, RawPointer};
use crate::session::DrawingSession;
use rf_core::{Point, Tool, Vec2};

/// What the host should do after an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// Session state (pixels, view or tool) changed; repaint.
    pub changed: bool,
    /// Call `preventDefault()` so the browser does not scroll or zoom.
    pub suppress_default: bool,
}

impl InputOutcome {
    fn new(changed: bool, suppress_default: bool) -> Self {
        Self {
            changed,
            suppress_default,
        }
    }
}

#[derive(Debug, Default)]
pub struct ToolController {
    /// Last screen position of an in-progress pan drag.
    pan_anchor: Option<Point>,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Dispatch one event. Key events are not handled here and report no
    /// change.
    pub fn handle(&mut self, session: &mut DrawingSession, event: &InputEvent) -> InputOutcome {
        match event {
            InputEvent::PointerDown(raw) => {
                let changed = self.pointer_down(session, raw);
                InputOutcome::new(changed, raw.is_touch())
            }
            InputEvent::PointerMove(raw) => {
                let changed = self.pointer_move(session, raw);
                InputOutcome::new(changed, raw.is_touch())
            }
            InputEvent::PointerUp(raw) => {
                let changed = self.pointer_up(session);
                InputOutcome::new(changed, raw.is_touch())
            }
            InputEvent::PointerLeave => InputOutcome::new(self.pointer_up(session), false),
            InputEvent::Wheel { delta_y } => {
                let changed = if *delta_y < 0.0 {
                    session.zoom_in()
                } else if *delta_y > 0.0 {
                    session.zoom_out()
                } else {
                    false
                };
                InputOutcome::new(changed, true)
            }
            InputEvent::Key { .. } => InputOutcome::default(),
        }
    }

    fn pointer_down(&mut self, session: &mut DrawingSession, raw: &RawPointer) -> bool {
        let Some(screen) = raw.position() else {
            return false;
        };
        if raw.button().is_pan() {
            self.pan_anchor = Some(screen);
            return false;
        }
        let point = session.to_logical(screen);
        match session.tool() {
            Tool::Draw => session.begin_stroke(point),
            Tool::Fill => session.fill_at(point),
        }
    }

    fn pointer_move(&mut self, session: &mut DrawingSession, raw: &RawPointer) -> bool {
        let Some(screen) = raw.position() else {
            return false;
        };
        if let Some(anchor) = self.pan_anchor {
            let scale = session.geometry().scale();
            let delta = screen - anchor;
            self.pan_anchor = Some(screen);
            return session.pan_by(Vec2::new(delta.x * scale.x, delta.y * scale.y));
        }
        match session.tool() {
            Tool::Draw => {
                let point = session.to_logical(screen);
                session.extend_stroke(point)
            }
            Tool::Fill => false,
        }
    }

    fn pointer_up(&mut self, session: &mut DrawingSession) -> bool {
        if self.pan_anchor.take().is_some() {
            return false;
        }
        match session.tool() {
            Tool::Draw => session.commit_stroke(),
            Tool::Fill => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;

    fn mounted() -> DrawingSession {
        let mut session = DrawingSession::default();
        session.mount("room.jpg", 100, 100).unwrap();
        session
    }

    fn mouse(x: f64, y: f64) -> RawPointer {
        RawPointer::mouse(x, y, PointerButton::Primary)
    }

    #[test]
    fn primary_drag_draws() {
        let mut session = mounted();
        let mut ctl = ToolController::new();
        ctl.handle(&mut session, &InputEvent::PointerDown(mouse(10.0, 10.0)));
        let out = ctl.handle(&mut session, &InputEvent::PointerMove(mouse(20.0, 10.0)));
        assert!(out.changed);
        assert!(!out.suppress_default);
        ctl.handle(&mut session, &InputEvent::PointerUp(mouse(20.0, 10.0)));
        assert_eq!(session.committed_strokes().len(), 1);
    }

    #[test]
    fn wheel_zooms() {
        let mut session = mounted();
        let mut ctl = ToolController::new();
        let out = ctl.handle(&mut session, &InputEvent::Wheel { delta_y: -120.0 });
        assert!(out.changed && out.suppress_default);
        assert!((session.view().zoom() - 1.1).abs() < 1e-9);
        ctl.handle(&mut session, &InputEvent::Wheel { delta_y: 120.0 });
        assert_eq!(session.view().zoom(), 1.0);
        assert!(!ctl.handle(&mut session, &InputEvent::Wheel { delta_y: 0.0 }).changed);
    }

    #[test]
    fn key_events_pass_through() {
        let mut session = mounted();
        let mut ctl = ToolController::new();
        assert_eq!(
            ctl.handle(&mut session, &InputEvent::key("z")),
            InputOutcome::default()
        );
    }
}
