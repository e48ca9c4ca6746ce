//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. On macOS
//! `meta` is ⌘; elsewhere `ctrl` plays the same role.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tools ──
    ToolDraw,
    ToolFill,

    // ── Pen ──
    PenWarm,
    PenCool,
    PenBlack,
    Thinner,
    Thicker,

    // ── Edit ──
    Undo,
    Redo,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ResetView,

    // ── UI ──
    ToggleHelp,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"["`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if alt {
            return None;
        }

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                // Shift+= arrives as "+" on most layouts
                "+" => Some(ShortcutAction::ZoomIn),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        match key {
            "d" | "D" | "p" | "P" => Some(ShortcutAction::ToolDraw),
            "f" | "F" => Some(ShortcutAction::ToolFill),
            "1" => Some(ShortcutAction::PenWarm),
            "2" => Some(ShortcutAction::PenCool),
            "3" => Some(ShortcutAction::PenBlack),
            "[" => Some(ShortcutAction::Thinner),
            "]" => Some(ShortcutAction::Thicker),
            "?" => Some(ShortcutAction::ToggleHelp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_edit_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("Z", false, true, false, true),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn resolve_view_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("=", false, false, false, true),
            Some(ShortcutAction::ZoomIn)
        );
        assert_eq!(
            ShortcutMap::resolve("+", true, true, false, false),
            Some(ShortcutAction::ZoomIn)
        );
        assert_eq!(
            ShortcutMap::resolve("-", true, false, false, false),
            Some(ShortcutAction::ZoomOut)
        );
        assert_eq!(
            ShortcutMap::resolve("0", true, false, false, false),
            Some(ShortcutAction::ResetView)
        );
    }

    #[test]
    fn resolve_single_keys() {
        assert_eq!(
            ShortcutMap::resolve("f", false, false, false, false),
            Some(ShortcutAction::ToolFill)
        );
        assert_eq!(
            ShortcutMap::resolve("P", false, true, false, false),
            Some(ShortcutAction::ToolDraw)
        );
        assert_eq!(
            ShortcutMap::resolve("3", false, false, false, false),
            Some(ShortcutAction::PenBlack)
        );
        assert_eq!(
            ShortcutMap::resolve("?", false, true, false, false),
            Some(ShortcutAction::ToggleHelp)
        );
        assert_eq!(
            ShortcutMap::resolve("]", false, false, false, false),
            Some(ShortcutAction::Thicker)
        );
    }

    #[test]
    fn unbound_combos() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("f", true, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("z", true, false, true, false), None);
    }
}
