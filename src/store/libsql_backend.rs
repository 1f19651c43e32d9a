//! libSQL backend for `RecordStore`.
//!
//! Each collection is a set of rows in `documents`, keyed by kind and
//! position. A row in `collections` marks that a kind has been saved at
//! least once, so an empty collection is distinguishable from a missing one.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::migrations;
use crate::store::traits::{RecordKind, RecordStore};

/// libSQL record store.
///
/// Stores a single connection that is reused for all operations.
/// Saves are serialized so two collections never open overlapping
/// transactions on it.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
    write_lock: Mutex<()>,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;
        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
            write_lock: Mutex::new(()),
        })
    }

    async fn collection_exists(&self, kind: RecordKind) -> Result<bool, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM collections WHERE kind = ?1",
                params![kind.as_str()],
            )
            .await
            .map_err(|e| StoreError::Query(format!("collection_exists: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let count: i64 = row
                    .get(0)
                    .map_err(|e| StoreError::Query(format!("collection_exists: {e}")))?;
                Ok(count > 0)
            }
            Ok(None) => Ok(false),
            Err(e) => Err(StoreError::Query(format!("collection_exists: {e}"))),
        }
    }
}

#[async_trait]
impl RecordStore for LibSqlStore {
    async fn load_records(&self, kind: RecordKind) -> Result<Vec<serde_json::Value>, StoreError> {
        if !self.collection_exists(kind).await? {
            return Err(StoreError::MissingCollection {
                kind: kind.to_string(),
            });
        }

        let mut rows = self
            .conn
            .query(
                "SELECT body FROM documents WHERE kind = ?1 ORDER BY position",
                params![kind.as_str()],
            )
            .await
            .map_err(|e| StoreError::Query(format!("load_records: {e}")))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::Query(format!("load_records: {e}")))?
        {
            let body: String = row
                .get(0)
                .map_err(|e| StoreError::Query(format!("load_records: {e}")))?;
            let value = serde_json::from_str(&body)
                .map_err(|e| StoreError::Serialization(format!("{kind}: {e}")))?;
            records.push(value);
        }
        Ok(records)
    }

    async fn save_records(
        &self,
        kind: RecordKind,
        records: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        let _write = self.write_lock.lock().await;
        let tx = self
            .conn
            .transaction()
            .await
            .map_err(|e| StoreError::Query(format!("save_records: begin: {e}")))?;

        tx.execute(
            "INSERT INTO collections (kind, saved_at) VALUES (?1, ?2)
             ON CONFLICT (kind) DO UPDATE SET saved_at = ?2",
            params![kind.as_str(), Utc::now().to_rfc3339()],
        )
        .await
        .map_err(|e| StoreError::Query(format!("save_records: mark collection: {e}")))?;

        tx.execute(
            "DELETE FROM documents WHERE kind = ?1",
            params![kind.as_str()],
        )
        .await
        .map_err(|e| StoreError::Query(format!("save_records: clear: {e}")))?;

        for (position, record) in records.iter().enumerate() {
            let body = serde_json::to_string(record)?;
            tx.execute(
                "INSERT INTO documents (kind, position, body) VALUES (?1, ?2, ?3)",
                params![kind.as_str(), position as i64, body],
            )
            .await
            .map_err(|e| StoreError::Query(format!("save_records: insert: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Query(format!("save_records: commit: {e}")))?;

        debug!(kind = %kind, count = records.len(), "Saved collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn test_db() -> LibSqlStore {
        LibSqlStore::new_memory().await.unwrap()
    }

    #[tokio::test]
    async fn unsaved_collection_is_missing() {
        let db = test_db().await;
        let err = db.load_records(RecordKind::Onboarding).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingCollection { .. }));
    }

    #[tokio::test]
    async fn empty_collection_is_not_missing() {
        let db = test_db().await;
        db.save_records(RecordKind::Uploads, &[]).await.unwrap();
        assert!(db.load_records(RecordKind::Uploads).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_replaces_previous_contents() {
        let db = test_db().await;
        db.save_records(
            RecordKind::Contracts,
            &[json!({"id": "C001"}), json!({"id": "C002"}), json!({"id": "C003"})],
        )
        .await
        .unwrap();
        db.save_records(RecordKind::Contracts, &[json!({"id": "C009"})])
            .await
            .unwrap();

        let loaded = db.load_records(RecordKind::Contracts).await.unwrap();
        assert_eq!(loaded, vec![json!({"id": "C009"})]);
    }

    #[tokio::test]
    async fn collections_are_isolated_and_ordered() {
        let db = test_db().await;
        let staff = vec![json!({"id": "S002"}), json!({"id": "S001"})];
        db.save_records(RecordKind::Onboarding, &staff).await.unwrap();
        db.save_records(RecordKind::Entities, &[json!({"id": "E1"})])
            .await
            .unwrap();

        assert_eq!(db.load_records(RecordKind::Onboarding).await.unwrap(), staff);
        assert_eq!(db.load_records(RecordKind::Entities).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_saves_to_different_collections() {
        let db = Arc::new(test_db().await);
        let a = {
            let db = Arc::clone(&db);
            tokio::spawn(async move {
                db.save_records(RecordKind::Onboarding, &[json!({"id": "S001"})])
                    .await
            })
        };
        let b = {
            let db = Arc::clone(&db);
            tokio::spawn(async move {
                db.save_records(RecordKind::Uploads, &[json!({"id": "U1"})]).await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(db.load_records(RecordKind::Onboarding).await.unwrap().len(), 1);
        assert_eq!(db.load_records(RecordKind::Uploads).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn file_database_persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data").join("muvhr.db");
        {
            let db = LibSqlStore::new_local(&path).await.unwrap();
            db.save_records(RecordKind::Users, &[json!({"username": "azril"})])
                .await
                .unwrap();
        }
        let db = LibSqlStore::new_local(&path).await.unwrap();
        let users = db.load_records(RecordKind::Users).await.unwrap();
        assert_eq!(users[0]["username"], "azril");
    }
}
