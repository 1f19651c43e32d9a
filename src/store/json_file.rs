//! Flat-file JSON backend: one `<kind>.json` per collection.
//!
//! This is the `mock/` directory layout the dashboard was first built
//! against. List collections are stored as a JSON array; single-document
//! collections (time off, time tracking, groups) are stored as a bare
//! object.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::StoreError;
use crate::store::traits::{RecordKind, RecordStore};

/// Directory of pretty-printed JSON files.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.as_str()))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_records(&self, kind: RecordKind) -> Result<Vec<serde_json::Value>, StoreError> {
        let path = self.path_for(kind);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::MissingCollection {
                    kind: kind.to_string(),
                });
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;

        match value {
            serde_json::Value::Array(records) => Ok(records),
            serde_json::Value::Object(_) if kind.is_document() => Ok(vec![value]),
            other => {
                let expected = if kind.is_document() { "array or object" } else { "array" };
                Err(StoreError::Serialization(format!(
                    "{}: expected {expected}, found {}",
                    path.display(),
                    json_type_name(&other)
                )))
            }
        }
    }

    async fn save_records(
        &self,
        kind: RecordKind,
        records: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;

        let body = match records {
            [document] if kind.is_document() => serde_json::to_string_pretty(document)?,
            _ => serde_json::to_string_pretty(records)?,
        };

        // Write-then-rename so a crash never leaves a truncated collection.
        let path = self.path_for(kind);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &path).await?;

        debug!(kind = %kind, count = records.len(), path = %path.display(), "Saved collection");
        Ok(())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, JsonFileStore) {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("mock"));
        (tmp, store)
    }

    #[tokio::test]
    async fn missing_file_is_missing_collection() {
        let (_tmp, store) = test_store();
        let err = store.load_records(RecordKind::Contracts).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingCollection { .. }));
        assert!(!store.has_collection(RecordKind::Contracts).await.unwrap());
    }

    #[tokio::test]
    async fn saved_empty_collection_loads_empty() {
        let (_tmp, store) = test_store();
        store.save_records(RecordKind::Uploads, &[]).await.unwrap();
        assert!(store.load_records(RecordKind::Uploads).await.unwrap().is_empty());
        assert!(store.has_collection(RecordKind::Uploads).await.unwrap());
    }

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let (_tmp, store) = test_store();
        let records = vec![json!({"id": "C002"}), json!({"id": "C001"})];
        store.save_records(RecordKind::Contracts, &records).await.unwrap();

        let loaded = store.load_records(RecordKind::Contracts).await.unwrap();
        assert_eq!(loaded, records);
        assert!(store.dir().join("contracts.json").exists());
        assert!(!store.dir().join("contracts.json.tmp").exists());
    }

    #[tokio::test]
    async fn document_kinds_are_written_as_objects() {
        let (_tmp, store) = test_store();
        let doc = json!({"departments": [], "teams": []});
        store
            .save_records(RecordKind::Groups, std::slice::from_ref(&doc))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.dir().join("groups.json")).unwrap();
        assert!(raw.trim_start().starts_with('{'));
        assert_eq!(store.load_records(RecordKind::Groups).await.unwrap(), vec![doc]);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_not_empty() {
        let (_tmp, store) = test_store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("resources.json"), "{not json").unwrap();

        let err = store.load_records(RecordKind::Resources).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));

        std::fs::write(store.dir().join("resources.json"), "42").unwrap();
        let err = store.load_records(RecordKind::Resources).await.unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[tokio::test]
    async fn list_collection_stored_as_object_is_rejected() {
        let (_tmp, store) = test_store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("contracts.json"), r#"{"id": "C001"}"#).unwrap();

        let err = store.load_records(RecordKind::Contracts).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert!(err.to_string().contains("expected array, found object"));
    }
}
