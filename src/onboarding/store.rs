//! The shared, persisted onboarding collection.
//!
//! Two locks guard the collection:
//! - `writer` serializes whole mutations (copy, flip, flush, commit), so
//!   flushes land in mutation order.
//! - `staff` guards the in-memory records. It is a blocking lock held only
//!   to copy or replace the vector, never across an await.
//!
//! A mutation flips a private copy, flushes it, and only then replaces the
//! shared records. If the caller is dropped mid-flush the shared records
//! are untouched.
//!
//! The store does no role checks. Callers go through the access gate first.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{OnboardingError, StoreError};
use crate::store::{RecordKind, RecordStore, load, save};

use super::model::StaffRecord;

pub struct TaskStore {
    staff: RwLock<Vec<StaffRecord>>,
    writer: Mutex<()>,
    backend: Arc<dyn RecordStore>,
}

impl TaskStore {
    /// Build a store over already-loaded records.
    ///
    /// Fails if two records share an id.
    pub fn new(backend: Arc<dyn RecordStore>, staff: Vec<StaffRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for record in &staff {
            if !seen.insert(record.id.as_str()) {
                return Err(StoreError::Serialization(format!(
                    "{}: duplicate staff id {}",
                    RecordKind::Onboarding,
                    record.id
                )));
            }
        }
        Ok(Self {
            staff: RwLock::new(staff),
            writer: Mutex::new(()),
            backend,
        })
    }

    /// Load the onboarding collection from the backing store.
    pub async fn load(backend: Arc<dyn RecordStore>) -> Result<Self, StoreError> {
        let staff: Vec<StaffRecord> = load(backend.as_ref(), RecordKind::Onboarding).await?;
        info!(count = staff.len(), "Loaded onboarding records");
        Self::new(backend, staff)
    }

    /// Snapshot of every staff record, in load order.
    pub fn list_staff(&self) -> Vec<StaffRecord> {
        self.staff
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Flip one task's completed flag and persist the change.
    ///
    /// Returns the new value. The shared records change only once the flush
    /// has succeeded; on a failed flush the store error is returned.
    pub async fn toggle_task(&self, staff_id: &str, task_id: u32) -> Result<bool, OnboardingError> {
        let _writer = self.writer.lock().await;

        let mut next = self.list_staff();
        let completed = flip(&mut next, staff_id, task_id)?;

        if let Err(e) = save(self.backend.as_ref(), RecordKind::Onboarding, &next).await {
            warn!(staff_id, task_id, error = %e, "Failed to persist task toggle");
            return Err(OnboardingError::Persistence(e));
        }
        *self.staff.write().unwrap_or_else(PoisonError::into_inner) = next;

        info!(staff_id, task_id, completed, "Onboarding task toggled");
        Ok(completed)
    }
}

fn flip(staff: &mut [StaffRecord], staff_id: &str, task_id: u32) -> Result<bool, OnboardingError> {
    let record = staff
        .iter_mut()
        .find(|s| s.id == staff_id)
        .ok_or_else(|| OnboardingError::StaffNotFound {
            staff_id: staff_id.to_string(),
        })?;
    let task = record
        .task_mut(task_id)
        .ok_or_else(|| OnboardingError::TaskNotFound {
            staff_id: staff_id.to_string(),
            task_id,
        })?;
    Ok(task.toggle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::Task;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use std::time::Duration;
    use tokio::time::timeout;

    fn sample_staff() -> Vec<StaffRecord> {
        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        vec![
            StaffRecord::new("S001", "Aisha Rahman", "Software Engineer", start)
                .with_task(Task::new(1, "Sign employment contract").done())
                .with_task(Task::new(2, "Set up laptop"))
                .with_task(Task::new(3, "Meet the team")),
            StaffRecord::new("S002", "Daniel Lee", "Designer", start)
                .with_task(Task::new(1, "Sign employment contract")),
        ]
    }

    fn store_with(backend: Arc<MemoryStore>) -> TaskStore {
        TaskStore::new(backend, sample_staff()).unwrap()
    }

    fn task_state(staff: &[StaffRecord], staff_id: &str, task_id: u32) -> bool {
        staff
            .iter()
            .find(|s| s.id == staff_id)
            .and_then(|s| s.task(task_id))
            .map(|t| t.completed)
            .unwrap()
    }

    #[tokio::test]
    async fn toggle_flips_and_is_visible_in_list() {
        let store = store_with(Arc::new(MemoryStore::new()));
        assert!(!task_state(&store.list_staff(), "S001", 2));

        assert!(store.toggle_task("S001", 2).await.unwrap());
        assert!(task_state(&store.list_staff(), "S001", 2));
    }

    #[tokio::test]
    async fn double_toggle_restores_original_state() {
        let store = store_with(Arc::new(MemoryStore::new()));
        let original = store.list_staff();

        assert!(store.toggle_task("S001", 2).await.unwrap());
        assert!(task_state(&store.list_staff(), "S001", 2));
        assert!(!store.toggle_task("S001", 2).await.unwrap());

        assert_eq!(store.list_staff(), original);
    }

    #[tokio::test]
    async fn unknown_staff_and_task_are_not_found() {
        let store = store_with(Arc::new(MemoryStore::new()));

        let err = store.toggle_task("S999", 0).await.unwrap_err();
        assert!(matches!(err, OnboardingError::StaffNotFound { .. }));
        assert!(err.is_not_found());

        let err = store.toggle_task("S001", 999).await.unwrap_err();
        assert!(matches!(err, OnboardingError::TaskNotFound { task_id: 999, .. }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn task_ids_are_scoped_per_staff() {
        let store = store_with(Arc::new(MemoryStore::new()));
        store.toggle_task("S002", 1).await.unwrap();

        let staff = store.list_staff();
        assert!(task_state(&staff, "S002", 1));
        // S001's task 1 is untouched.
        assert!(task_state(&staff, "S001", 1));
    }

    #[tokio::test]
    async fn toggle_is_persisted_before_returning() {
        let backend = Arc::new(MemoryStore::new());
        let store = store_with(Arc::clone(&backend));

        store.toggle_task("S001", 3).await.unwrap();

        let persisted: Vec<StaffRecord> = load(backend.as_ref(), RecordKind::Onboarding)
            .await
            .unwrap();
        assert!(task_state(&persisted, "S001", 3));
    }

    #[tokio::test]
    async fn failed_flush_leaves_records_unchanged() {
        let backend = Arc::new(MemoryStore::new());
        let store = store_with(Arc::clone(&backend));
        backend.set_fail_saves(true);

        let err = store.toggle_task("S001", 2).await.unwrap_err();
        assert!(matches!(err, OnboardingError::Persistence(_)));
        assert!(!err.is_not_found());
        assert!(!task_state(&store.list_staff(), "S001", 2));

        backend.set_fail_saves(false);
        assert!(store.toggle_task("S001", 2).await.unwrap());
    }

    #[tokio::test]
    async fn not_found_does_not_flush() {
        let backend = Arc::new(MemoryStore::new());
        let store = store_with(Arc::clone(&backend));
        let _ = store.toggle_task("S404", 1).await;
        assert_eq!(backend.save_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_toggles_report_opposite_transitions() {
        let store = Arc::new(store_with(Arc::new(MemoryStore::new())));

        let a = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.toggle_task("S001", 2).await.unwrap() }
        });
        let b = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.toggle_task("S001", 2).await.unwrap() }
        });

        let mut results = vec![a.await.unwrap(), b.await.unwrap()];
        results.sort();
        assert_eq!(results, vec![false, true]);
        assert!(!task_state(&store.list_staff(), "S001", 2));
    }

    #[tokio::test]
    async fn many_concurrent_toggles_stay_consistent() {
        let backend = Arc::new(MemoryStore::new());
        let store = Arc::new(store_with(Arc::clone(&backend)));

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.toggle_task("S001", 3).await.unwrap() })
            })
            .collect();

        let mut became_complete = 0;
        for handle in handles {
            if handle.await.unwrap() {
                became_complete += 1;
            }
        }

        // 25 flips from false: 13 report true, 12 report false, final true.
        assert_eq!(became_complete, 13);
        assert!(task_state(&store.list_staff(), "S001", 3));

        let persisted: Vec<StaffRecord> = load(backend.as_ref(), RecordKind::Onboarding)
            .await
            .unwrap();
        assert!(task_state(&persisted, "S001", 3));
    }

    #[test]
    fn duplicate_staff_ids_are_rejected() {
        let mut staff = sample_staff();
        staff.push(staff[0].clone());
        let result = TaskStore::new(Arc::new(MemoryStore::new()), staff);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn load_requires_an_existing_collection() {
        let backend: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let result = TaskStore::load(Arc::clone(&backend)).await;
        assert!(matches!(result, Err(StoreError::MissingCollection { .. })));

        save(backend.as_ref(), RecordKind::Onboarding, &sample_staff())
            .await
            .unwrap();
        let store = TaskStore::load(backend).await.unwrap();
        assert_eq!(store.list_staff().len(), 2);
    }

    #[tokio::test]
    async fn dropped_toggle_leaves_memory_matching_storage() {
        let backend = Arc::new(MemoryStore::new());
        save(backend.as_ref(), RecordKind::Onboarding, &sample_staff())
            .await
            .unwrap();
        let store = store_with(Arc::clone(&backend));

        backend.set_stall_saves(true);
        let attempt = timeout(Duration::from_millis(50), store.toggle_task("S001", 2)).await;
        assert!(attempt.is_err(), "save should still be pending");

        let persisted: Vec<StaffRecord> = load(backend.as_ref(), RecordKind::Onboarding)
            .await
            .unwrap();
        assert!(!task_state(&persisted, "S001", 2));
        assert_eq!(store.list_staff(), persisted);

        // The dropped call released the writer lock.
        backend.set_stall_saves(false);
        assert!(store.toggle_task("S001", 2).await.unwrap());
        let persisted: Vec<StaffRecord> = load(backend.as_ref(), RecordKind::Onboarding)
            .await
            .unwrap();
        assert!(task_state(&persisted, "S001", 2));
        assert_eq!(store.list_staff(), persisted);
    }
}
