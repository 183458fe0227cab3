use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::PersistenceError;
use crate::inventory::Registry;
use crate::persistence::snapshot;

/// Reads and writes the registry snapshot at a fixed path.
///
/// Saves go to a temporary file in the same directory which is then renamed
/// over the target, so the last good snapshot survives a failed or
/// interrupted write.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot. A missing file yields an empty registry.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Registry, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot on disk, starting empty");
                return Ok(Registry::new());
            }
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let registry = snapshot::decode(&self.path, &bytes)?;
        debug!(products = registry.len(), "Snapshot loaded");
        Ok(registry)
    }

    /// Writes every entry of `registry`, replacing any previous snapshot.
    #[instrument(skip(self, registry), fields(path = %self.path.display(), products = registry.len()))]
    pub fn save(&self, registry: &Registry) -> Result<(), PersistenceError> {
        let bytes = snapshot::encode(registry)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Dropping `tmp` on any early return removes the temporary file.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PersistenceError::io(dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| PersistenceError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e.error))?;

        debug!(bytes = bytes.len(), "Snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductDraft;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry
            .create(1, ProductDraft::new("A", 2, Decimal::from_str("10.00").unwrap()))
            .unwrap();
        registry
            .create(2, ProductDraft::new("B", 3, Decimal::from_str("5.50").unwrap()))
            .unwrap();
        registry
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("absent.json"));

        let registry = store.load().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("inventory.json"));
        let registry = sample();

        store.save(&registry).unwrap();
        assert_eq!(store.load().unwrap(), registry);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("inventory.json"));

        store.save(&sample()).unwrap();
        let mut smaller = sample();
        smaller.delete(1).unwrap();
        store.save(&smaller).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded.contains(1));
    }

    #[test]
    fn test_save_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("inventory.json"));
        store.save(&sample()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("inventory.json")]);
    }

    #[test]
    fn test_corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, b"\xac\xed\x00\x05not json at all").unwrap();

        let store = SnapshotStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Corrupt { .. })));
    }

    #[test]
    fn test_failed_save_keeps_last_good_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let store = SnapshotStore::new(&path);
        store.save(&sample()).unwrap();

        // A target inside a directory that does not exist cannot be written.
        let broken = SnapshotStore::new(dir.path().join("missing").join("inventory.json"));
        assert!(matches!(broken.save(&Registry::new()), Err(PersistenceError::Io { .. })));

        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // Reading a directory as a file fails with something other than NotFound.
        let store = SnapshotStore::new(dir.path());
        assert!(matches!(store.load(), Err(PersistenceError::Io { .. })));
    }
}
