// Desktop-level window operations: identity-aware open, stacking, maximize and focus.
// Pure in-memory logic; persistence is the caller's concern.

use super::window::{Geometry, Position, Size, SnapSide, Viewport, WindowPatch, WindowRecord};
use super::WindowStore;
use crate::config::ManagerConfig;
use crate::persistence::PersistedWindow;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// How to open a window. Every field is optional; missing geometry comes from the cascade rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenOptions {
    /// Explicit id; when set it is the identity instead of `kind` + `key`
    pub id: Option<String>,
    pub key: Option<String>,
    pub title: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub maximized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOutcome {
    pub id: String,
    /// False when an existing window was promoted instead
    pub created: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryUpdate {
    pub position: Option<Position>,
    pub size: Option<Size>,
}

/// Serializable view of the desktop, back to front
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopSnapshot {
    pub windows: Vec<WindowRecord>,
    pub focused: Option<String>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone)]
pub struct DesktopState {
    store: WindowStore,
    focused: Option<String>,
    /// Id of the most recently created window; new windows cascade from its current position
    cascade_anchor: Option<String>,
    viewport: Viewport,
}

impl DesktopState {
    pub fn new(config: &ManagerConfig) -> Self {
        Self {
            store: WindowStore::new(),
            focused: None,
            cascade_anchor: None,
            viewport: config.viewport,
        }
    }

    /// Rebuild a desktop from persisted entries, stacking them in stored order
    pub fn hydrate(entries: Vec<PersistedWindow>, config: &ManagerConfig) -> Self {
        let mut state = Self::new(config);

        for entry in entries {
            if state.store.contains(&entry.id) {
                warn!(id = %entry.id, "Skipping duplicate persisted window");
                continue;
            }

            let restore = Geometry {
                position: entry.position,
                size: entry.size.at_least(config.min_size),
            };
            let mut record = WindowRecord {
                id: entry.id,
                kind: entry.kind,
                key: entry.key,
                title: entry.title,
                position: restore.position,
                size: restore.size,
                z_order: state.store.allocate_z_order(),
                is_maximized: false,
                is_minimized: false,
                previous_geometry: None,
            };
            if entry.is_maximized {
                let fill = state.maximized_geometry(config);
                record.position = fill.position;
                record.size = fill.size;
                record.is_maximized = true;
                record.previous_geometry = Some(restore);
            }

            state.cascade_anchor = Some(record.id.clone());
            state.insert_record(record);
        }

        state.focused = state.store.top().map(|w| w.id.clone());
        debug!(count = state.store.len(), "Restored windows");
        state
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.store.get(id)
    }

    /// Windows from back to front
    pub fn windows(&self) -> Vec<&WindowRecord> {
        self.store.by_z_order()
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            windows: self.windows().into_iter().cloned().collect(),
            focused: self.focused.clone(),
            viewport: self.viewport,
        }
    }

    /// Open a window, or promote the one that already has this identity
    pub fn open(&mut self, kind: &str, options: OpenOptions, config: &ManagerConfig) -> OpenOutcome {
        let existing = match options.id.as_deref() {
            Some(id) => self.store.get(id).inspect(|w| {
                if w.kind != kind {
                    warn!(id, existing = %w.kind, requested = kind, "Window id reused across kinds");
                }
            }),
            None => self.store.find_by_identity(kind, options.key.as_deref()),
        }
        .map(|w| w.id.clone());

        if let Some(id) = existing {
            self.bring_to_front(&id);
            debug!(id = %id, kind, "Promoted existing window");
            return OpenOutcome { id, created: false };
        }

        let id = options
            .id
            .unwrap_or_else(|| format!("window-{}-{}", kind, Uuid::new_v4()));
        let position = options
            .position
            .unwrap_or_else(|| self.cascade_position(config));
        let size = options
            .size
            .unwrap_or(config.default_size)
            .at_least(config.min_size);

        let mut record = WindowRecord {
            id: id.clone(),
            kind: kind.to_string(),
            key: options.key,
            title: options.title.unwrap_or_else(|| kind.to_string()),
            position,
            size,
            z_order: self.store.allocate_z_order(),
            is_maximized: false,
            is_minimized: false,
            previous_geometry: None,
        };
        if options.maximized {
            let fill = self.maximized_geometry(config);
            record.previous_geometry = Some(record.geometry());
            record.position = fill.position;
            record.size = fill.size;
            record.is_maximized = true;
        }

        if self.insert_record(record) {
            self.cascade_anchor = Some(id.clone());
            self.focused = Some(id.clone());
        }
        debug!(id = %id, kind, "Opened window");
        OpenOutcome { id, created: true }
    }

    pub fn close(&mut self, id: &str) -> bool {
        let Some(removed) = self.store.remove(id) else {
            return false;
        };

        if self.focused.as_deref() == Some(id) {
            self.focused = self.topmost_visible().map(|w| w.id.clone());
        }
        if self.cascade_anchor.as_deref() == Some(id) {
            self.cascade_anchor = None;
        }
        debug!(id, kind = %removed.kind, "Closed window");
        true
    }

    /// Close the frontmost window, returning its id
    pub fn close_top(&mut self) -> Option<String> {
        let id = self.store.top()?.id.clone();
        self.close(&id);
        Some(id)
    }

    pub fn close_all(&mut self) -> usize {
        self.focused = None;
        self.cascade_anchor = None;
        self.store.clear()
    }

    /// Raise and focus a window, restoring it if minimized
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        if !self.store.contains(id) {
            return false;
        }

        let z_order = self.store.allocate_z_order();
        self.store.update(
            id,
            WindowPatch {
                z_order: Some(z_order),
                is_minimized: Some(false),
                ..WindowPatch::default()
            },
        );
        self.focused = Some(id.to_string());
        true
    }

    pub fn toggle_maximize(&mut self, id: &str, config: &ManagerConfig) -> bool {
        let Some(record) = self.store.get(id) else {
            return false;
        };

        let patch = if record.is_maximized {
            let restore = record.previous_geometry.unwrap_or_else(|| record.geometry());
            WindowPatch {
                position: Some(restore.position),
                size: Some(restore.size),
                is_maximized: Some(false),
                previous_geometry: Some(None),
                ..WindowPatch::default()
            }
        } else {
            let fill = self.maximized_geometry(config);
            WindowPatch {
                position: Some(fill.position),
                size: Some(fill.size),
                is_maximized: Some(true),
                previous_geometry: Some(Some(record.geometry())),
                ..WindowPatch::default()
            }
        };

        self.store.update(id, patch);
        true
    }

    /// Flip the minimized flag. Geometry and stacking are left alone.
    pub fn toggle_minimize(&mut self, id: &str) -> bool {
        let Some(record) = self.store.get(id) else {
            return false;
        };
        let minimized = !record.is_minimized;

        self.store.update(
            id,
            WindowPatch {
                is_minimized: Some(minimized),
                ..WindowPatch::default()
            },
        );
        if minimized && self.focused.as_deref() == Some(id) {
            self.focused = self.topmost_visible().map(|w| w.id.clone());
        }
        true
    }

    /// Commit a drag or resize. Maximized windows keep their layout.
    pub fn update_geometry(&mut self, id: &str, update: GeometryUpdate, config: &ManagerConfig) -> bool {
        let Some(record) = self.store.get(id) else {
            return false;
        };
        if record.is_maximized {
            debug!(id, "Ignoring geometry update for maximized window");
            return false;
        }

        let position = update.position.unwrap_or(record.position);
        let size = update
            .size
            .map(|s| s.at_least(config.min_size))
            .unwrap_or(record.size);
        if position == record.position && size == record.size {
            return false;
        }

        self.store.update(
            id,
            WindowPatch::geometry(Geometry { position, size }),
        );
        true
    }

    pub fn set_title(&mut self, id: &str, title: &str) -> bool {
        match self.store.get(id) {
            Some(record) if record.title != title => {}
            _ => return false,
        }

        self.store.update(
            id,
            WindowPatch {
                title: Some(title.to_string()),
                ..WindowPatch::default()
            },
        );
        true
    }

    /// Fill one half of the viewport, leaving the maximized state if needed
    pub fn snap_to_side(&mut self, id: &str, side: SnapSide, config: &ManagerConfig) -> bool {
        let Some(record) = self.store.get(id) else {
            return false;
        };

        let half = self.viewport.width / 2.0;
        let position = match side {
            SnapSide::Left => Position::new(0.0, 0.0),
            SnapSide::Right => Position::new(half, 0.0),
        };
        let size = Size::new(half, self.usable_height(config)).at_least(config.min_size);
        if !record.is_maximized && record.position == position && record.size == size {
            return false;
        }

        self.store.update(
            id,
            WindowPatch {
                position: Some(position),
                size: Some(size),
                is_maximized: Some(false),
                previous_geometry: Some(None),
                ..WindowPatch::default()
            },
        );
        true
    }

    /// Adopt a new viewport and re-lay-out maximized windows to fill it
    pub fn set_viewport(&mut self, viewport: Viewport, config: &ManagerConfig) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;

        let fill = self.maximized_geometry(config);
        let maximized: Vec<String> = self
            .store
            .iter()
            .filter(|w| w.is_maximized)
            .map(|w| w.id.clone())
            .collect();
        for id in &maximized {
            self.store.update(id, WindowPatch::geometry(fill));
        }
        true
    }

    /// Bring the backmost window to the front, wrapping past the top
    pub fn focus_next(&mut self) -> bool {
        self.cycle_focus(true)
    }

    /// Bring the window directly beneath the top to the front
    pub fn focus_previous(&mut self) -> bool {
        self.cycle_focus(false)
    }

    fn cycle_focus(&mut self, forward: bool) -> bool {
        let ordered = self.store.by_z_order();
        if ordered.len() < 2 {
            return false;
        }

        let target = if forward {
            ordered[0].id.clone()
        } else {
            ordered[ordered.len() - 2].id.clone()
        };
        self.bring_to_front(&target)
    }

    fn insert_record(&mut self, record: WindowRecord) -> bool {
        match self.store.insert(record) {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                debug_assert!(false, "{}", e);
                false
            }
        }
    }

    fn topmost_visible(&self) -> Option<&WindowRecord> {
        self.store
            .iter()
            .filter(|w| !w.is_minimized)
            .max_by_key(|w| w.z_order)
    }

    fn usable_height(&self, config: &ManagerConfig) -> f64 {
        (self.viewport.height - config.taskbar_height).max(0.0)
    }

    fn maximized_geometry(&self, config: &ManagerConfig) -> Geometry {
        Geometry {
            position: Position::new(0.0, 0.0),
            size: Size::new(self.viewport.width, self.usable_height(config))
                .at_least(config.min_size),
        }
    }

    fn cascade_position(&self, config: &ManagerConfig) -> Position {
        let cascade = &config.cascade;
        let Some(anchor) = self
            .cascade_anchor
            .as_deref()
            .and_then(|id| self.store.get(id))
        else {
            return cascade.origin;
        };

        let next = anchor.restore_geometry().position.offset(cascade.offset_x, cascade.offset_y);
        let limit_x = self.viewport.width * cascade.reset_ratio;
        let limit_y = self.viewport.height * cascade.reset_ratio;
        if next.x > limit_x || next.y > limit_y {
            cascade.origin
        } else {
            next
        }
    }
}
