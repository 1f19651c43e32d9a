//! `RecordStore` trait: generic load/save over named collections.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// The named collections the service persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Contracts,
    Onboarding,
    Resources,
    Uploads,
    TimeOff,
    TimeTracking,
    Groups,
    Entities,
    Users,
}

impl RecordKind {
    pub const ALL: [RecordKind; 9] = [
        RecordKind::Contracts,
        RecordKind::Onboarding,
        RecordKind::Resources,
        RecordKind::Uploads,
        RecordKind::TimeOff,
        RecordKind::TimeTracking,
        RecordKind::Groups,
        RecordKind::Entities,
        RecordKind::Users,
    ];

    /// Collection name; also the JSON file stem and the libSQL `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contracts => "contracts",
            Self::Onboarding => "onboarding",
            Self::Resources => "resources",
            Self::Uploads => "uploads",
            Self::TimeOff => "time_off",
            Self::TimeTracking => "time_tracking",
            Self::Groups => "groups",
            Self::Entities => "entities",
            Self::Users => "users",
        }
    }

    /// Collections that hold one structured document rather than a list.
    pub fn is_document(&self) -> bool {
        matches!(self, Self::TimeOff | Self::TimeTracking | Self::Groups)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-agnostic persistence for record collections.
///
/// A collection that has never been saved fails with
/// [`StoreError::MissingCollection`]; one saved empty loads as an empty vec.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every record of a collection, in saved order.
    async fn load_records(&self, kind: RecordKind) -> Result<Vec<serde_json::Value>, StoreError>;

    /// Replace a collection with `records`.
    async fn save_records(
        &self,
        kind: RecordKind,
        records: &[serde_json::Value],
    ) -> Result<(), StoreError>;

    /// Whether the collection has ever been saved.
    async fn has_collection(&self, kind: RecordKind) -> Result<bool, StoreError> {
        match self.load_records(kind).await {
            Ok(_) => Ok(true),
            Err(StoreError::MissingCollection { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Load a collection and deserialize each record as `T`.
pub async fn load<T: DeserializeOwned>(
    store: &dyn RecordStore,
    kind: RecordKind,
) -> Result<Vec<T>, StoreError> {
    store
        .load_records(kind)
        .await?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| StoreError::Serialization(format!("{kind}: {e}")))
        })
        .collect()
}

/// Serialize `records` and replace the collection with them.
pub async fn save<T: Serialize>(
    store: &dyn RecordStore,
    kind: RecordKind,
    records: &[T],
) -> Result<(), StoreError> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.save_records(kind, &values).await
}

/// Load a collection that holds a single document (e.g. the time-off
/// catalog). An empty collection is reported as a serialization error.
pub async fn load_document<T: DeserializeOwned>(
    store: &dyn RecordStore,
    kind: RecordKind,
) -> Result<T, StoreError> {
    let mut records = store.load_records(kind).await?;
    if records.is_empty() {
        return Err(StoreError::Serialization(format!(
            "{kind}: expected one document, found none"
        )));
    }
    serde_json::from_value(records.swap_remove(0))
        .map_err(|e| StoreError::Serialization(format!("{kind}: {e}")))
}

/// Save a single-document collection.
pub async fn save_document<T: Serialize>(
    store: &dyn RecordStore,
    kind: RecordKind,
    document: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(document)?;
    store.save_records(kind, std::slice::from_ref(&value)).await
}
