use crate::error::PersistError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A durable key-value slot holding serialized window state
pub trait StorageSlot: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn clear(&self, key: &str) -> Result<(), PersistError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/wim-os`, or a relative fallback when the platform has no data dir
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("wim-os")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl Default for FileSlot {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl StorageSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so readers never see a partial file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), PersistError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process slot for headless hosts and tests
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, PersistError> {
        self.entries
            .lock()
            .map_err(|e| PersistError::Unavailable(e.to_string()))
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), PersistError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_slot_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("state"));

        assert!(slot.read("wim-windows").unwrap().is_none());
        slot.write("wim-windows", "[]").unwrap();
        assert_eq!(slot.read("wim-windows").unwrap().as_deref(), Some("[]"));

        slot.clear("wim-windows").unwrap();
        assert!(slot.read("wim-windows").unwrap().is_none());
        // Clearing twice is fine
        slot.clear("wim-windows").unwrap();
    }

    #[test]
    fn file_slot_sanitizes_keys() {
        let slot = FileSlot::new("/tmp/wim");
        assert_eq!(
            slot.path_for("../escape me"),
            PathBuf::from("/tmp/wim/___escape_me.json")
        );
    }

    #[test]
    fn memory_slot_overwrites() {
        let slot = MemorySlot::new();
        slot.write("k", "one").unwrap();
        slot.write("k", "two").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("two"));
    }
}
