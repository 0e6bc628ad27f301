//! Actions over [`DesktopState`] and the pure transition function that applies them.

use crate::config::ManagerConfig;
use crate::state::window::{Position, Size, SnapSide, Viewport};
use crate::state::{DesktopState, GeometryUpdate, OpenOptions};
use serde::{Deserialize, Serialize};

/// Every mutation the window manager supports, in a form the webview can send verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WindowAction {
    /// Open a window, or promote the one with the same identity.
    Open {
        kind: String,
        #[serde(default)]
        options: OpenOptions,
    },
    Close {
        id: String,
    },
    /// Close the frontmost window (Escape).
    CloseTop,
    CloseAll,
    BringToFront {
        id: String,
    },
    ToggleMaximize {
        id: String,
    },
    ToggleMinimize {
        id: String,
    },
    /// Commit the result of a drag or resize gesture.
    UpdateGeometry {
        id: String,
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        size: Option<Size>,
    },
    SetTitle {
        id: String,
        title: String,
    },
    SnapToSide {
        id: String,
        side: SnapSide,
    },
    SetViewport {
        viewport: Viewport,
    },
    FocusNext,
    FocusPrevious,
}

impl WindowAction {
    /// Whether this action can change the persisted projection.
    ///
    /// Stacking, focus, and minimized state are session-only. Viewport changes only move
    /// maximized windows, whose persisted geometry is their restore geometry.
    pub fn touches_persisted(&self) -> bool {
        match self {
            WindowAction::Open { .. }
            | WindowAction::Close { .. }
            | WindowAction::CloseTop
            | WindowAction::CloseAll
            | WindowAction::ToggleMaximize { .. }
            | WindowAction::UpdateGeometry { .. }
            | WindowAction::SetTitle { .. }
            | WindowAction::SnapToSide { .. } => true,
            WindowAction::BringToFront { .. }
            | WindowAction::ToggleMinimize { .. }
            | WindowAction::SetViewport { .. }
            | WindowAction::FocusNext
            | WindowAction::FocusPrevious => false,
        }
    }
}

/// Apply `action` in place. Returns true when the persisted projection changed.
///
/// Actions naming an unknown window are no-ops.
pub fn apply(state: &mut DesktopState, action: &WindowAction, config: &ManagerConfig) -> bool {
    let changed = match action {
        WindowAction::Open { kind, options } => state.open(kind, options.clone(), config).created,
        WindowAction::Close { id } => state.close(id),
        WindowAction::CloseTop => state.close_top().is_some(),
        WindowAction::CloseAll => state.close_all() > 0,
        WindowAction::BringToFront { id } => state.bring_to_front(id),
        WindowAction::ToggleMaximize { id } => state.toggle_maximize(id, config),
        WindowAction::ToggleMinimize { id } => state.toggle_minimize(id),
        WindowAction::UpdateGeometry { id, position, size } => state.update_geometry(
            id,
            GeometryUpdate {
                position: *position,
                size: *size,
            },
            config,
        ),
        WindowAction::SetTitle { id, title } => state.set_title(id, title),
        WindowAction::SnapToSide { id, side } => state.snap_to_side(id, *side, config),
        WindowAction::SetViewport { viewport } => state.set_viewport(*viewport, config),
        WindowAction::FocusNext => state.focus_next(),
        WindowAction::FocusPrevious => state.focus_previous(),
    };

    changed && action.touches_persisted()
}

/// Pure form of [`apply`]: consumes a state and returns the next one.
pub fn reduce(mut state: DesktopState, action: &WindowAction, config: &ManagerConfig) -> DesktopState {
    apply(&mut state, action, config);
    state
}
