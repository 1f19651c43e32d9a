//! Contractor records and the expiring-contracts view.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Contracts expiring within this many days (inclusive) count as expiring.
pub const EXPIRY_WINDOW_DAYS: u64 = 30;

/// A contractor and their contract expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorRecord {
    pub id: String,
    pub name: String,
    pub position: String,
    pub contract_expiry: NaiveDate,
}

impl ContractorRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        contract_expiry: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            contract_expiry,
        }
    }

    /// Already expired contracts are included.
    pub fn expires_by(&self, cutoff: NaiveDate) -> bool {
        self.contract_expiry <= cutoff
    }
}

/// Immutable contractor catalog, in load order.
#[derive(Debug, Clone, Default)]
pub struct ContractCatalog {
    records: Vec<ContractorRecord>,
}

impl ContractCatalog {
    pub fn new(records: Vec<ContractorRecord>) -> Self {
        Self { records }
    }

    pub fn all(&self) -> &[ContractorRecord] {
        &self.records
    }

    /// Records whose expiry is on or before `today + EXPIRY_WINDOW_DAYS`.
    pub fn expiring(&self, today: NaiveDate) -> Vec<ContractorRecord> {
        let cutoff = today
            .checked_add_days(Days::new(EXPIRY_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);
        self.records
            .iter()
            .filter(|r| r.expires_by(cutoff))
            .cloned()
            .collect()
    }
}
