//! Host-clocked popups.
//!
//! The host passes its clock (milliseconds, e.g. `performance.now()`) into
//! every call; a popup just remembers when it should disappear.

#[derive(Debug, Clone, PartialEq)]
pub struct TimedPopup {
    duration_ms: f64,
    hide_at: Option<f64>,
}

impl TimedPopup {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            hide_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Show the popup, restarting its countdown.
    pub fn show(&mut self, now: f64) {
        self.hide_at = Some(now + self.duration_ms);
    }

    pub fn hide(&mut self) {
        self.hide_at = None;
    }

    /// Hide when visible, otherwise show. Returns the new visibility.
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.is_visible() {
            self.hide();
        } else {
            self.show(now);
        }
        self.is_visible()
    }

    /// Expire the popup once its deadline has passed. Returns `true` if
    /// this call hid it.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }
}
