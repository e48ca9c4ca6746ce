//! Session configuration.
//!
//! Every field has a default so a host can pass a partial JSON object
//! (or nothing at all) when it opens the selection step.

use crate::model::{LINE_WIDTH_MAX, LINE_WIDTH_MIN, PenColor};
use crate::view::ZoomBounds;
use serde::{Deserialize, Serialize};

/// Which committed stroke a fill click consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillTarget {
    /// Always the most recently drawn stroke, wherever the click lands.
    #[default]
    MostRecent,
    /// The most recent stroke whose closed outline contains the click.
    UnderPointer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub zoom: ZoomBounds,
    /// Maximum number of undo snapshots kept; the oldest is dropped first.
    pub history_depth: usize,
    pub default_line_width: u8,
    pub default_pen: PenColor,
    pub fill_target: FillTarget,
    /// How long the how-to popup stays up after it is shown.
    pub help_popup_ms: f64,
    /// How long the "select a region first" notice stays up.
    pub notice_ms: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomBounds::default(),
            history_depth: 50,
            default_line_width: LINE_WIDTH_MAX,
            default_pen: PenColor::Warm,
            fill_target: FillTarget::MostRecent,
            help_popup_ms: 5000.0,
            notice_ms: 3000.0,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config. An empty string yields the defaults.
    #[must_use = "parsing result should be used"]
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("Config parse error: {e}"))?;
        if let Err(e) = config.validate() {
            log::warn!("rejected session config: {e}");
            return Err(e);
        }
        Ok(config)
    }

    /// This config if it validates, otherwise the defaults.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("rejected session config: {e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let ZoomBounds { min, max, step } = self.zoom;
        if !(min > 0.0 && min.is_finite() && max.is_finite()) {
            return Err(format!("zoom.min must be a positive number, got {min}"));
        }
        if !(min <= 1.0 && 1.0 <= max) {
            return Err(format!("zoom bounds [{min}, {max}] must include 1"));
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(format!("zoom.step must be positive, got {step}"));
        }
        if self.history_depth == 0 {
            return Err("historyDepth must be at least 1".to_string());
        }
        if !(LINE_WIDTH_MIN..=LINE_WIDTH_MAX).contains(&self.default_line_width) {
            return Err(format!(
                "defaultLineWidth must be within {LINE_WIDTH_MIN}..={LINE_WIDTH_MAX}, got {}",
                self.default_line_width
            ));
        }
        let duration_ok = |ms: f64| ms >= 0.0 && ms.is_finite();
        if !duration_ok(self.help_popup_ms) || !duration_ok(self.notice_ms) {
            return Err("popup durations must be finite and not negative".to_string());
        }
        Ok(())
    }
}
