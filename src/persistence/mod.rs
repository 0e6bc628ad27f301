// Durable storage of the reduced window projection.
// Stacking order and minimized state are session-only and never written.

use crate::error::PersistError;
use crate::state::window::{Position, Size, WindowRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub mod slot;
pub mod writer;

pub use slot::{FileSlot, MemorySlot, StorageSlot};
pub use writer::PersistWriter;

/// The persisted subset of a [`WindowRecord`]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    pub id: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub is_maximized: bool,
}

impl From<&WindowRecord> for PersistedWindow {
    /// Maximized windows store the geometry they restore to, not the viewport fill
    fn from(record: &WindowRecord) -> Self {
        let geometry = record.restore_geometry();
        Self {
            id: record.id.clone(),
            kind: record.kind.clone(),
            key: record.key.clone(),
            title: record.title.clone(),
            position: geometry.position,
            size: geometry.size,
            is_maximized: record.is_maximized,
        }
    }
}

/// Project records, keeping their order
pub fn project<'a>(records: impl IntoIterator<Item = &'a WindowRecord>) -> Vec<PersistedWindow> {
    records.into_iter().map(PersistedWindow::from).collect()
}

/// Destination for projections produced by the window manager
pub trait Persister: Send {
    /// Store `projection`. Never fails from the caller's point of view.
    fn persist(&self, projection: Vec<PersistedWindow>);
}

/// Reads and writes the projection under one key of a [`StorageSlot`]
#[derive(Clone)]
pub struct PersistenceAdapter {
    slot: Arc<dyn StorageSlot>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(slot: Arc<dyn StorageSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Save the projection of `records`; failures are logged and dropped
    pub fn save<'a>(&self, records: impl IntoIterator<Item = &'a WindowRecord>) {
        self.save_projection(&project(records));
    }

    pub fn save_projection(&self, projection: &[PersistedWindow]) {
        match self.try_save(projection) {
            Ok(()) => debug!(key = %self.key, count = projection.len(), "Saved window state"),
            Err(e) => warn!(key = %self.key, "Failed to save window state: {}", e),
        }
    }

    pub fn try_save(&self, projection: &[PersistedWindow]) -> Result<(), PersistError> {
        let data = serde_json::to_string(projection)?;
        self.slot.write(&self.key, &data)
    }

    /// Stored projection, or empty when absent, unreadable, or malformed
    pub fn load(&self) -> Vec<PersistedWindow> {
        let data = match self.slot.read(&self.key) {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!(key = %self.key, "No saved window state");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, "Failed to read window state: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, "Discarding malformed window state: {}", e);
                Vec::new()
            }
        }
    }

    pub fn clear(&self) -> Result<(), PersistError> {
        self.slot.clear(&self.key)
    }
}

impl Persister for PersistenceAdapter {
    fn persist(&self, projection: Vec<PersistedWindow>) {
        self.save_projection(&projection);
    }
}
