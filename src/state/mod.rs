use crate::error::StoreError;
use self::window::{WindowPatch, WindowRecord};

pub mod desktop;
pub mod window;

pub use desktop::{DesktopSnapshot, DesktopState, GeometryUpdate, OpenOptions, OpenOutcome};

/// Authoritative list of window records plus the z-order counter
#[derive(Debug, Clone, Default)]
pub struct WindowStore {
    records: Vec<WindowRecord>, // Insertion order
    next_z_order: u64,          // Last value handed out
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Ids are unique; a clash is a caller bug.
    pub fn insert(&mut self, record: WindowRecord) -> Result<(), StoreError> {
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        // Keep future allocations above anything inserted directly
        self.next_z_order = self.next_z_order.max(record.z_order);
        self.records.push(record);
        Ok(())
    }

    /// Remove and return the record, if present
    pub fn remove(&mut self, id: &str) -> Option<WindowRecord> {
        let index = self.records.iter().position(|w| w.id == id)?;
        Some(self.records.remove(index))
    }

    /// Merge `patch` into the record with `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, patch: WindowPatch) -> Option<&WindowRecord> {
        let record = self.records.iter_mut().find(|w| w.id == id)?;
        if let Some(z_order) = patch.z_order {
            self.next_z_order = self.next_z_order.max(z_order);
        }
        patch.apply(record);
        Some(&*record)
    }

    /// Hand out a z-order strictly above every value seen so far
    pub fn allocate_z_order(&mut self) -> u64 {
        self.next_z_order += 1;
        self.next_z_order
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.records.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_identity(&self, kind: &str, key: Option<&str>) -> Option<&WindowRecord> {
        self.records.iter().find(|w| w.matches_identity(kind, key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.records.iter()
    }

    /// Frontmost window
    pub fn top(&self) -> Option<&WindowRecord> {
        self.records.iter().max_by_key(|w| w.z_order)
    }

    /// Records from back to front
    pub fn by_z_order(&self) -> Vec<&WindowRecord> {
        let mut ordered: Vec<&WindowRecord> = self.records.iter().collect();
        ordered.sort_by_key(|w| w.z_order);
        ordered
    }

    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::window::{Position, Size};
    use super::*;

    fn record(id: &str, z_order: u64) -> WindowRecord {
        WindowRecord {
            id: id.to_string(),
            kind: "home".to_string(),
            key: None,
            title: "Home".to_string(),
            position: Position::new(50.0, 80.0),
            size: Size::new(700.0, 500.0),
            z_order,
            is_maximized: false,
            is_minimized: false,
            previous_geometry: None,
        }
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut store = WindowStore::new();
        store.insert(record("a", 1)).unwrap();

        let err = store.insert(record("a", 2)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_noop_for_unknown_id() {
        let mut store = WindowStore::new();
        store.insert(record("a", 1)).unwrap();

        assert!(store.remove("missing").is_none());
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn update_is_noop_for_unknown_id() {
        let mut store = WindowStore::new();
        let patch = WindowPatch {
            title: Some("x".to_string()),
            ..WindowPatch::default()
        };
        assert!(store.update("missing", patch).is_none());
    }

    #[test]
    fn allocation_stays_above_inserted_values() {
        let mut store = WindowStore::new();
        assert_eq!(store.allocate_z_order(), 1);

        store.insert(record("a", 40)).unwrap();
        assert_eq!(store.allocate_z_order(), 41);
        assert_eq!(store.allocate_z_order(), 42);
    }

    #[test]
    fn top_and_ordering_follow_z_order() {
        let mut store = WindowStore::new();
        store.insert(record("a", 3)).unwrap();
        store.insert(record("b", 1)).unwrap();
        store.insert(record("c", 2)).unwrap();

        assert_eq!(store.top().unwrap().id, "a");
        let ids: Vec<&str> = store.by_z_order().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
