//! In-memory `RecordStore` for tests and throwaway runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::traits::{RecordKind, RecordStore};

/// Keeps collections in a map. Saves can be made to fail or to hang on
/// demand so callers' error and cancellation paths can be exercised.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<RecordKind, Vec<serde_json::Value>>>,
    fail_saves: AtomicBool,
    stall_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save_records` fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `save_records` hang until this is cleared.
    /// Saves already hanging stay pending.
    pub fn set_stall_saves(&self, stall: bool) {
        self.stall_saves.store(stall, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_records(&self, kind: RecordKind) -> Result<Vec<serde_json::Value>, StoreError> {
        self.collections
            .read()
            .await
            .get(&kind)
            .cloned()
            .ok_or_else(|| StoreError::MissingCollection {
                kind: kind.to_string(),
            })
    }

    async fn save_records(
        &self,
        kind: RecordKind,
        records: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        if self.stall_saves.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other(format!(
                "simulated write failure for {kind}"
            ))));
        }
        self.collections.write().await.insert(kind, records.to_vec());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
