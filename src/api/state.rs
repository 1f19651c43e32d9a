//! Shared application state handed to every route.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::access::AccessGate;
use crate::auth::{SessionStore, UserRecord};
use crate::contracts::{ContractCatalog, ContractorRecord};
use crate::error::StoreError;
use crate::onboarding::TaskStore;
use crate::resources::{ResourceCatalog, ResourceRecord};
use crate::store::{RecordKind, RecordStore, load, load_document};
use crate::uploads::UploadLog;
use crate::workforce::{Entity, WorkforceCatalog};

/// Read-only catalogs, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub contracts: ContractCatalog,
    pub resources: ResourceCatalog,
    pub workforce: WorkforceCatalog,
}

impl Catalog {
    pub async fn load(store: &dyn RecordStore) -> Result<Self, StoreError> {
        let (contracts, resources, entities, time_off, time_tracking, groups) = futures::try_join!(
            load::<ContractorRecord>(store, RecordKind::Contracts),
            load::<ResourceRecord>(store, RecordKind::Resources),
            load::<Entity>(store, RecordKind::Entities),
            load_document(store, RecordKind::TimeOff),
            load_document(store, RecordKind::TimeTracking),
            load_document(store, RecordKind::Groups),
        )?;
        let workforce = WorkforceCatalog {
            time_off,
            time_tracking,
            groups,
            entities,
        };
        info!(
            contracts = contracts.len(),
            resources = resources.len(),
            entities = workforce.entities.len(),
            "Loaded catalogs"
        );
        Ok(Self {
            contracts: ContractCatalog::new(contracts),
            resources: ResourceCatalog::new(resources),
            workforce,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AccessGate>,
    pub catalog: Arc<Catalog>,
    pub onboarding: Arc<TaskStore>,
    pub uploads: Arc<UploadLog>,
    pub sessions: Arc<SessionStore>,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    /// Load every collection from `store` and assemble the state.
    ///
    /// Missing collections are an error here; seed the store first.
    pub async fn load(
        store: Arc<dyn RecordStore>,
        gate: AccessGate,
        upload_dir: PathBuf,
    ) -> Result<Self, StoreError> {
        let catalog = Catalog::load(store.as_ref()).await?;
        let users: Vec<UserRecord> = load(store.as_ref(), RecordKind::Users).await?;
        let onboarding = TaskStore::load(Arc::clone(&store)).await?;
        let uploads = UploadLog::load(store).await?;

        Ok(Self {
            gate: Arc::new(gate),
            catalog: Arc::new(catalog),
            onboarding: Arc::new(onboarding),
            uploads: Arc::new(uploads),
            sessions: Arc::new(SessionStore::new(users)),
            upload_dir: Arc::new(upload_dir),
        })
    }
}
