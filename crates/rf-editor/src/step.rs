//! The category-selection step as the page sees it: a drawing session plus
//! the input router, keyboard shortcuts, the how-to popup and the
//! "select a region first" navigation guard.

use crate::input::InputEvent;
use crate::session::DrawingSession;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::timers::TimedPopup;
use crate::tools::{InputOutcome, ToolController};
use rf_core::{PenColor, SelectionHandoff, SessionConfig, Tool};

/// Shown when the user tries to continue without selecting anything.
pub const NOTICE_MESSAGE: &str = "Select a region on the photo before continuing.";

pub struct SelectionStep {
    session: DrawingSession,
    controller: ToolController,
    help: TimedPopup,
    notice: TimedPopup,
    torn_down: bool,
}

impl SelectionStep {
    /// Enter the step at host time `now`; the how-to popup opens immediately.
    pub fn new(config: SessionConfig, now: f64) -> Self {
        let config = config.validated();
        let mut help = TimedPopup::new(config.help_popup_ms);
        help.show(now);
        let notice = TimedPopup::new(config.notice_ms);
        Self {
            session: DrawingSession::new(config),
            controller: ToolController::new(),
            help,
            notice,
            torn_down: false,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DrawingSession {
        &mut self.session
    }

    /// Dispatch one input event. Keys go through the shortcut map, all
    /// other events through the tool controller.
    pub fn handle(&mut self, event: &InputEvent, now: f64) -> InputOutcome {
        if self.torn_down {
            return InputOutcome::default();
        }
        match event {
            InputEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => match ShortcutMap::resolve(key, *ctrl, *shift, *alt, *meta) {
                Some(action) => InputOutcome {
                    changed: self.apply(action, now),
                    suppress_default: true,
                },
                None => InputOutcome::default(),
            },
            _ => self.controller.handle(&mut self.session, event),
        }
    }

    /// Run a shortcut or toolbar action. Returns `true` if anything visible
    /// changed.
    pub fn apply(&mut self, action: ShortcutAction, now: f64) -> bool {
        let session = &mut self.session;
        match action {
            ShortcutAction::ToolDraw => session.switch_tool(Tool::Draw),
            ShortcutAction::ToolFill => session.switch_tool(Tool::Fill),
            ShortcutAction::PenWarm => session.set_pen(PenColor::Warm),
            ShortcutAction::PenCool => session.set_pen(PenColor::Cool),
            ShortcutAction::PenBlack => session.set_pen(PenColor::Black),
            ShortcutAction::Thinner => {
                let width = session.line_width().saturating_sub(1);
                session.set_line_width(width)
            }
            ShortcutAction::Thicker => {
                let width = session.line_width().saturating_add(1);
                session.set_line_width(width)
            }
            ShortcutAction::Undo => session.undo(),
            ShortcutAction::Redo => session.redo(),
            ShortcutAction::ZoomIn => session.zoom_in(),
            ShortcutAction::ZoomOut => session.zoom_out(),
            ShortcutAction::ResetView => {
                session.reset_view(None);
                true
            }
            ShortcutAction::ToggleHelp => {
                self.help.toggle(now);
                true
            }
        }
    }

    /// Advance the popup clocks. Returns `true` if a popup disappeared.
    pub fn tick(&mut self, now: f64) -> bool {
        let help = self.help.tick(now);
        let notice = self.notice.tick(now);
        help || notice
    }

    /// Navigation guard for the "next" button: the hand-off once something
    /// has been drawn, otherwise `None` with the notice shown.
    pub fn try_proceed(&mut self, now: f64) -> Option<SelectionHandoff> {
        if self.torn_down {
            return None;
        }
        if self.session.has_drawn() {
            return Some(self.session.handoff());
        }
        log::debug!("proceed blocked: nothing selected");
        self.notice.show(now);
        None
    }

    pub fn toggle_help(&mut self, now: f64) -> bool {
        self.help.toggle(now)
    }

    pub fn help_visible(&self) -> bool {
        self.help.is_visible()
    }

    pub fn notice_visible(&self) -> bool {
        self.notice.is_visible()
    }

    /// Leave the step: cancel every pending popup so nothing fires later.
    pub fn teardown(&mut self) {
        self.help.hide();
        self.notice.hide();
        self.torn_down = true;
        log::debug!("selection step torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
