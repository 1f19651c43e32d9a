//! Resource library records and per-role visibility.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::error::ResourceError;

/// A document in the shared resource library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub filename: String,
    pub file_type: String,
    pub file_size: String,
    pub upload_date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub allowed_roles: Vec<Role>,
}

impl ResourceRecord {
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// Immutable resource catalog, in load order.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    records: Vec<ResourceRecord>,
}

impl ResourceCatalog {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }

    pub fn all(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Records whose `allowed_roles` include `role`.
    pub fn visible_to(&self, role: Role) -> Vec<ResourceRecord> {
        self.records
            .iter()
            .filter(|r| r.is_visible_to(role))
            .cloned()
            .collect()
    }

    pub fn find_by_filename(&self, filename: &str) -> Option<&ResourceRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }

    /// Look up a file for `role`: unknown files are `NotFound`, files the
    /// role may not see are `Forbidden`.
    pub fn access_file(&self, filename: &str, role: Role) -> Result<&ResourceRecord, ResourceError> {
        let record = self
            .find_by_filename(filename)
            .ok_or_else(|| ResourceError::NotFound {
                filename: filename.to_string(),
            })?;
        if !record.is_visible_to(role) {
            return Err(ResourceError::Forbidden {
                filename: filename.to_string(),
            });
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, filename: &str, roles: &[Role]) -> ResourceRecord {
        ResourceRecord {
            id: id.into(),
            title: format!("Doc {id}"),
            description: String::new(),
            filename: filename.into(),
            file_type: "pdf".into(),
            file_size: "1.0 MB".into(),
            upload_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            category: "Policy".into(),
            allowed_roles: roles.to_vec(),
        }
    }

    fn catalog() -> ResourceCatalog {
        ResourceCatalog::new(vec![
            record("R1", "handbook.pdf", &Role::ALL),
            record("R2", "salary_bands.xlsx", &[Role::Admin, Role::Hr]),
            record("R3", "runbook.pdf", &[Role::Admin, Role::Engineer]),
        ])
    }

    #[test]
    fn visibility_follows_allowed_roles() {
        let catalog = catalog();
        let ids = |role| {
            catalog
                .visible_to(role)
                .into_iter()
                .map(|r| r.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Role::Admin), vec!["R1", "R2", "R3"]);
        assert_eq!(ids(Role::Engineer), vec!["R1", "R3"]);
        assert_eq!(ids(Role::Intern), vec!["R1"]);
    }

    #[test]
    fn access_file_distinguishes_missing_and_forbidden() {
        let catalog = catalog();
        assert_eq!(
            catalog.access_file("handbook.pdf", Role::Intern).unwrap().id,
            "R1"
        );
        assert!(matches!(
            catalog.access_file("salary_bands.xlsx", Role::Intern),
            Err(ResourceError::Forbidden { .. })
        ));
        assert!(matches!(
            catalog.access_file("nope.pdf", Role::Admin),
            Err(ResourceError::NotFound { .. })
        ));
    }

    #[test]
    fn allowed_roles_accept_loose_spellings() {
        let json = r#"{
            "id": "R9", "title": "Benefits", "filename": "benefits.pdf",
            "file_type": "pdf", "file_size": "240.0 KB", "upload_date": "2025-03-02",
            "category": "HR", "allowed_roles": ["Admin", "HR Specialist"]
        }"#;
        let record: ResourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.allowed_roles, vec![Role::Admin, Role::Hr]);
        assert!(record.description.is_empty());
    }
}
