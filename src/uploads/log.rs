//! Append-only upload archive, persisted after every append.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{StoreError, UploadError};
use crate::store::{RecordKind, RecordStore, load, save};

use super::model::UploadRecord;

/// Same locking discipline as the onboarding task store: `writer` spans
/// copy, flush and commit; `records` is never held across an await.
pub struct UploadLog {
    records: RwLock<Vec<UploadRecord>>,
    writer: Mutex<()>,
    backend: Arc<dyn RecordStore>,
}

impl UploadLog {
    pub fn new(backend: Arc<dyn RecordStore>, records: Vec<UploadRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            writer: Mutex::new(()),
            backend,
        }
    }

    pub async fn load(backend: Arc<dyn RecordStore>) -> Result<Self, StoreError> {
        let records: Vec<UploadRecord> = load(backend.as_ref(), RecordKind::Uploads).await?;
        info!(count = records.len(), "Loaded upload archive");
        Ok(Self::new(backend, records))
    }

    pub fn list(&self) -> Vec<UploadRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &str) -> Result<UploadRecord, UploadError> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| UploadError::NotFound { id: id.to_string() })
    }

    /// Append `record` and flush. The record becomes visible only once the
    /// flush has succeeded.
    pub async fn append(&self, record: UploadRecord) -> Result<UploadRecord, UploadError> {
        let _writer = self.writer.lock().await;

        let mut next = self.list();
        next.push(record.clone());

        if let Err(e) = save(self.backend.as_ref(), RecordKind::Uploads, &next).await {
            warn!(id = %record.id, error = %e, "Failed to persist upload");
            return Err(UploadError::Persistence(e));
        }
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = next;

        info!(
            id = %record.id,
            title = %record.title,
            uploaded_by = %record.uploaded_by,
            size = %record.file_size,
            "Upload recorded"
        );
        Ok(record)
    }
}
