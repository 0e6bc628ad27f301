// Window Manager API: the single mutation surface for presentation code.
// Every method that changes the persisted projection ends with an explicit persist().

use crate::config::ManagerConfig;
use crate::persistence::{project, PersistenceAdapter, PersistedWindow, Persister};
use crate::reducer::{self, WindowAction};
use crate::routes::route_window;
use crate::state::window::{Position, Size, SnapSide, Viewport, WindowRecord};
use crate::state::{DesktopSnapshot, DesktopState, GeometryUpdate, OpenOptions};
use tracing::{debug, info};

pub struct WindowManager {
    state: DesktopState,
    config: ManagerConfig,
    persister: Box<dyn Persister>,
}

impl WindowManager {
    /// Empty desktop
    pub fn new(config: ManagerConfig, persister: impl Persister + 'static) -> Self {
        Self {
            state: DesktopState::new(&config),
            config,
            persister: Box::new(persister),
        }
    }

    /// Desktop rebuilt from the entries a previous session saved
    pub fn with_entries(
        config: ManagerConfig,
        entries: Vec<PersistedWindow>,
        persister: impl Persister + 'static,
    ) -> Self {
        Self {
            state: DesktopState::hydrate(entries, &config),
            config,
            persister: Box::new(persister),
        }
    }

    /// Load the previous session from `adapter` and keep persisting through it
    pub fn restore(config: ManagerConfig, adapter: PersistenceAdapter) -> Self {
        let entries = adapter.load();
        info!(count = entries.len(), "Restoring window session");
        Self::with_entries(config, entries, adapter)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    /// Windows from back to front
    pub fn windows(&self) -> Vec<&WindowRecord> {
        self.state.windows()
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.state.get(id)
    }

    pub fn focused(&self) -> Option<&str> {
        self.state.focused()
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        self.state.snapshot()
    }

    /// Open a window of `kind`, or bring the existing one with the same identity forward.
    /// Returns the window id.
    pub fn open(&mut self, kind: &str, options: OpenOptions) -> String {
        let outcome = self.state.open(kind, options, &self.config);
        if outcome.created {
            self.persist();
        }
        outcome.id
    }

    pub fn close(&mut self, id: &str) {
        if self.state.close(id) {
            self.persist();
        }
    }

    /// Close the frontmost window, returning its id
    pub fn close_top(&mut self) -> Option<String> {
        let closed = self.state.close_top();
        if closed.is_some() {
            self.persist();
        }
        closed
    }

    pub fn close_all(&mut self) {
        if self.state.close_all() > 0 {
            self.persist();
        }
    }

    pub fn bring_to_front(&mut self, id: &str) {
        self.state.bring_to_front(id);
    }

    pub fn toggle_maximize(&mut self, id: &str) {
        if self.state.toggle_maximize(id, &self.config) {
            self.persist();
        }
    }

    pub fn toggle_minimize(&mut self, id: &str) {
        self.state.toggle_minimize(id);
    }

    pub fn update_geometry(&mut self, id: &str, position: Option<Position>, size: Option<Size>) {
        let update = GeometryUpdate { position, size };
        if self.state.update_geometry(id, update, &self.config) {
            self.persist();
        }
    }

    pub fn set_title(&mut self, id: &str, title: &str) {
        if self.state.set_title(id, title) {
            self.persist();
        }
    }

    pub fn snap_to_side(&mut self, id: &str, side: SnapSide) {
        if self.state.snap_to_side(id, side, &self.config) {
            self.persist();
        }
    }

    /// Maximized windows refill the new viewport. Their restore geometry is what gets
    /// persisted, so nothing is written.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport, &self.config);
    }

    pub fn focus_next(&mut self) {
        self.state.focus_next();
    }

    pub fn focus_previous(&mut self) {
        self.state.focus_previous();
    }

    /// Open (or promote) the window a URL path maps to, maximized.
    /// Unknown paths leave the desktop alone.
    pub fn sync_route(&mut self, path: &str) -> Option<String> {
        let route = route_window(path)?;
        if self.state.store().top().map(|w| route.matches(w)).unwrap_or(false) {
            return self.state.store().top().map(|w| w.id.clone());
        }
        Some(self.open(&route.kind, route.open_options()))
    }

    /// Apply an action through the reducer, persisting when it changed the projection
    pub fn dispatch(&mut self, action: &WindowAction) {
        if reducer::apply(&mut self.state, action, &self.config) {
            self.persist();
        }
    }

    fn persist(&self) {
        let projection = project(self.state.windows());
        debug!(count = projection.len(), "Persisting window state");
        self.persister.persist(projection);
    }
}
