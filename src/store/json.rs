//! JSON file-backed state store.

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use tracing::debug;

use super::{StateStore, TraderState};
use crate::error::{Result, StoreError};

/// Stores [`TraderState`] as a JSON document on disk.
///
/// Writes go through a temp file and rename so a crash mid-write never
/// leaves a truncated document. The mutex serializes in-process
/// read-modify-write sequences; other processes writing the same file
/// are not coordinated.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file and its parent
    /// directories are created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_state(&self) -> Result<TraderState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(TraderState::default());
            }
            Err(err) => return Err(StoreError::Io(err).into()),
        };

        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        TraderState::from_document(value)
    }

    fn write_state(&self, state: &TraderState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(StoreError::Io)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::Io)?;

        debug!(path = %self.path.display(), "State persisted");
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<TraderState> {
        let _guard = self.lock.lock();
        self.read_state()
    }

    fn update(&self, mutate: &mut dyn FnMut(&mut TraderState)) -> Result<TraderState> {
        let _guard = self.lock.lock();
        let mut state = self.read_state()?;
        mutate(&mut state);
        self.write_state(&state)?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;
    use crate::store::RecentMarketEntry;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default_state() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let state = store.load().unwrap();
        assert!(state.pnl.is_none());
        assert!(state.recent_markets.is_empty());
    }

    #[test]
    fn update_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::new(&path);
        store
            .update(&mut |state| {
                state.recent_markets.push(RecentMarketEntry {
                    name: "Market".into(),
                    market_id: MarketId::from("m1"),
                });
            })
            .unwrap();

        let reopened = JsonFileStore::new(&path);
        let state = reopened.load().unwrap();
        assert_eq!(state.recent_markets.len(), 1);
    }

    #[test]
    fn corrupt_file_surfaces_as_store_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn legacy_document_is_migrated_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"pnlDay":"2025-01-20","pnlBase":"7.5","recentMarkets":{"Q":"m9"}}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        let state = store.load().unwrap();
        assert!(state.pnl.is_some());
        assert_eq!(state.recent_markets[0].market_id, MarketId::from("m9"));
    }
}
