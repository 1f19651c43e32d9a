//! Role → feature permission table.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::ConfigError;

use super::{Feature, Role};

/// Static mapping from role to the set of features it may use.
///
/// Built once at startup and never mutated. A role with no entry is
/// denied everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: HashMap<Role, BTreeSet<Feature>>,
}

impl PermissionTable {
    /// An empty table (every role denied everything).
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builder: grant a role a set of features, replacing any prior entry.
    pub fn with_role(mut self, role: Role, features: impl IntoIterator<Item = Feature>) -> Self {
        self.entries.insert(role, features.into_iter().collect());
        self
    }

    /// Whether the table has an entry for `role` (even an empty one).
    pub fn contains_role(&self, role: Role) -> bool {
        self.entries.contains_key(&role)
    }

    pub fn allows(&self, role: Role, feature: Feature) -> bool {
        self.entries
            .get(&role)
            .is_some_and(|features| features.contains(&feature))
    }

    /// Features granted to `role`, in canonical order. Empty when the role
    /// has no entry.
    pub fn features_for(&self, role: Role) -> Vec<Feature> {
        self.entries
            .get(&role)
            .map(|features| features.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Parse a `{ "role": ["feature", ...] }` JSON document.
    ///
    /// Unknown role or feature names are rejected rather than skipped, as
    /// are two keys naming the same role.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(format!("permission table: {e}")))?;

        let mut table = Self::empty();
        for (role_name, feature_names) in raw {
            let role = Role::canonicalize(&role_name).ok_or_else(|| ConfigError::InvalidValue {
                key: "permissions".to_string(),
                message: format!("unknown role '{role_name}'"),
            })?;
            let mut features = BTreeSet::new();
            for name in feature_names {
                let feature =
                    Feature::parse_lenient(&name).ok_or_else(|| ConfigError::InvalidValue {
                        key: "permissions".to_string(),
                        message: format!("unknown feature '{name}' for role '{role_name}'"),
                    })?;
                features.insert(feature);
            }
            if table.entries.insert(role, features).is_some() {
                return Err(ConfigError::InvalidValue {
                    key: "permissions".to_string(),
                    message: format!("role '{role_name}' is listed more than once"),
                });
            }
        }
        Ok(table)
    }

    /// Load a table from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl Default for PermissionTable {
    /// The dashboard's role/module matrix.
    fn default() -> Self {
        use Feature::*;
        Self::empty()
            .with_role(
                Role::Admin,
                [
                    Contracts,
                    Onboarding,
                    Resources,
                    Uploads,
                    TimeOff,
                    TimeTracking,
                    Groups,
                    Entities,
                    RolesPermissions,
                    Billing,
                ],
            )
            .with_role(
                Role::Hr,
                [
                    Contracts,
                    Onboarding,
                    Resources,
                    Uploads,
                    TimeOff,
                    TimeTracking,
                    Groups,
                ],
            )
            .with_role(Role::Manager, [Contracts, Resources, Uploads, TimeOff])
            .with_role(Role::Engineer, [Resources, Uploads])
            .with_role(Role::Marketing, [Resources, Uploads])
            .with_role(Role::Intern, [Resources])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_role() {
        let table = PermissionTable::default();
        for role in Role::ALL {
            assert!(table.contains_role(role), "{role} missing");
        }
    }

    #[test]
    fn admin_has_every_feature() {
        let table = PermissionTable::default();
        assert_eq!(table.features_for(Role::Admin), Feature::ALL.to_vec());
    }

    #[test]
    fn intern_only_sees_resources() {
        let table = PermissionTable::default();
        assert_eq!(table.features_for(Role::Intern), vec![Feature::Resources]);
    }

    #[test]
    fn from_json_accepts_labels_and_aliases() {
        let table = PermissionTable::from_json(
            r#"{"Admin": ["Contractors", "Billing & Payments"], "engineer": []}"#,
        )
        .unwrap();
        assert!(table.allows(Role::Admin, Feature::Contracts));
        assert!(table.allows(Role::Admin, Feature::Billing));
        assert!(table.contains_role(Role::Engineer));
        assert!(table.features_for(Role::Engineer).is_empty());
        assert!(!table.contains_role(Role::Intern));
    }

    #[test]
    fn from_json_rejects_unknown_names() {
        let err = PermissionTable::from_json(r#"{"ceo": ["contracts"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = PermissionTable::from_json(r#"{"admin": ["payroll"]}"#).unwrap_err();
        assert!(err.to_string().contains("payroll"));

        let err = PermissionTable::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn from_json_rejects_duplicate_roles() {
        let err = PermissionTable::from_json(r#"{"admin": ["contracts"], "Admin": []}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("more than once"));

        let err = PermissionTable::from_json(r#"{"hr": [], "HR Specialist": ["groups"]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions.json");
        std::fs::write(&path, r#"{"manager": ["groups"]}"#).unwrap();

        let table = PermissionTable::from_file(&path).unwrap();
        assert!(table.allows(Role::Manager, Feature::Groups));
        assert!(!table.allows(Role::Manager, Feature::Contracts));
    }
}
