use crate::snapshot::Snapshot;
use crate::storage::{KeyValueStorage, StorageError};

/// What a read found under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRecord {
    Absent,
    Text(String),
    /// Present but unreadable; treat like a record that does not parse.
    Corrupt,
}

impl StoredRecord {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Absent | Self::Corrupt => None,
        }
    }
}

/// Reads and writes the single serialized snapshot in durable storage.
///
/// None of the operations fail outward: a failed hydration or persist must
/// never stop the host from running, so backend errors are logged here.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    storage: S,
}

impl<S: KeyValueStorage> PersistenceGateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Serialize `snapshot` and store it under `key`.
    pub fn write(&mut self, key: &str, snapshot: &Snapshot) {
        let record = match snapshot.to_record() {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(key, "failed to encode snapshot: {e}");
                return;
            }
        };
        match self.storage.set_item(key, &record) {
            Ok(()) => tracing::debug!(key, bytes = record.len(), "snapshot persisted"),
            Err(e) => tracing::error!(key, "failed to persist snapshot: {e}"),
        }
    }

    /// The record stored under `key`.
    ///
    /// Backend read errors are logged and reported as absence; a record that
    /// exists but is not text is reported as corrupt.
    pub fn read(&self, key: &str) -> StoredRecord {
        match self.storage.get_item(key) {
            Ok(Some(text)) => StoredRecord::Text(text),
            Ok(None) => StoredRecord::Absent,
            Err(e @ StorageError::Corrupt { .. }) => {
                tracing::warn!(key, "persisted record is corrupt: {e}");
                StoredRecord::Corrupt
            }
            Err(e) => {
                tracing::warn!(key, "failed to read persisted record: {e}");
                StoredRecord::Absent
            }
        }
    }

    /// Best-effort removal of the record under `key`.
    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            tracing::warn!(key, "failed to remove persisted record: {e}");
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{parse_snapshot, strip};
    use crate::storage::{FileStorage, MemoryStorage};
    use serde_json::json;
    use shellstate_common::into_state_tree;

    #[test]
    fn write_then_read() {
        let mut gateway = PersistenceGateway::new(MemoryStorage::new());
        let state = into_state_tree(json!({"flight": {"items": []}, "router": {"url": "/"}})).unwrap();
        gateway.write("globalState", &strip(&state, "router"));
        assert_eq!(
            gateway.read("globalState").text(),
            Some(r#"{"flight":{"items":[]}}"#)
        );
    }

    #[test]
    fn read_absent_is_none() {
        let gateway = PersistenceGateway::new(MemoryStorage::new());
        assert_eq!(gateway.read("globalState"), StoredRecord::Absent);
    }

    #[test]
    fn remove_clears_record() {
        let mut gateway = PersistenceGateway::new(MemoryStorage::with_item("globalState", "{"));
        gateway.remove("globalState");
        assert_eq!(gateway.read("globalState"), StoredRecord::Absent);
        // Best effort: a second removal is silent.
        gateway.remove("globalState");
    }

    #[test]
    fn backend_errors_are_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gateway = PersistenceGateway::new(FileStorage::open(tmp.path()).unwrap());
        gateway.write("bad/key", &Snapshot::empty());
        assert_eq!(gateway.read("bad/key"), StoredRecord::Absent);
        gateway.remove("bad/key");
    }

    #[test]
    fn record_roundtrip_is_noop() {
        let record = r#"{"flight":{"items":[{"date":"2026-10-14T08:00:00Z","id":1}]}}"#;
        let mut gateway = PersistenceGateway::new(MemoryStorage::with_item("globalState", record));
        let snap = parse_snapshot(gateway.read("globalState").text().unwrap(), "router").unwrap();
        gateway.write("globalState", &snap);
        assert_eq!(gateway.read("globalState").text(), Some(record));
    }

    #[test]
    fn non_utf8_record_reads_as_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        std::fs::write(storage.record_path("globalState").unwrap(), [b'{', 0xff, b'}']).unwrap();
        let gateway = PersistenceGateway::new(storage);
        assert_eq!(gateway.read("globalState"), StoredRecord::Corrupt);
    }
}
