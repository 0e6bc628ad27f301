// Desktop keyboard shortcuts mapped onto window actions

use crate::reducer::WindowAction;
use crate::state::window::SnapSide;
use serde::{Deserialize, Serialize};

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS
    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Action bound to `key` (a DOM `KeyboardEvent.key` value), if any.
///
/// Shortcuts acting on "the current window" need `focused`; without one they resolve to nothing.
pub fn key_action(key: &str, modifiers: Modifiers, focused: Option<&str>) -> Option<WindowAction> {
    match key {
        "Escape" => Some(WindowAction::CloseTop),
        "Tab" if modifiers.alt && modifiers.shift => Some(WindowAction::FocusPrevious),
        "Tab" if modifiers.alt => Some(WindowAction::FocusNext),
        "ArrowUp" if modifiers.command() => focused.map(|id| WindowAction::ToggleMaximize {
            id: id.to_string(),
        }),
        "ArrowDown" if modifiers.command() => focused.map(|id| WindowAction::ToggleMinimize {
            id: id.to_string(),
        }),
        "ArrowLeft" if modifiers.command() => focused.map(|id| WindowAction::SnapToSide {
            id: id.to_string(),
            side: SnapSide::Left,
        }),
        "ArrowRight" if modifiers.command() => focused.map(|id| WindowAction::SnapToSide {
            id: id.to_string(),
            side: SnapSide::Right,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALT: Modifiers = Modifiers {
        ctrl: false,
        alt: true,
        shift: false,
        meta: false,
    };

    #[test]
    fn escape_closes_top() {
        assert_eq!(
            key_action("Escape", Modifiers::default(), None),
            Some(WindowAction::CloseTop)
        );
    }

    #[test]
    fn alt_tab_cycles() {
        assert_eq!(key_action("Tab", ALT, None), Some(WindowAction::FocusNext));
        let alt_shift = Modifiers { shift: true, ..ALT };
        assert_eq!(
            key_action("Tab", alt_shift, None),
            Some(WindowAction::FocusPrevious)
        );
        assert_eq!(key_action("Tab", Modifiers::default(), None), None);
    }

    #[test]
    fn window_shortcuts_need_focus() {
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert_eq!(key_action("ArrowUp", meta, None), None);
        assert_eq!(
            key_action("ArrowLeft", meta, Some("w1")),
            Some(WindowAction::SnapToSide {
                id: "w1".to_string(),
                side: SnapSide::Left
            })
        );
        assert_eq!(key_action("ArrowUp", Modifiers::default(), Some("w1")), None);
    }
}
