//! The access gate every endpoint routes through.

use tracing::{debug, warn};

use crate::error::AccessError;

use super::{Feature, PermissionTable, Role};

/// Decides whether a caller's role may use a feature.
///
/// Holds an immutable [`PermissionTable`]; share it behind an `Arc` and
/// call it from any number of requests concurrently.
#[derive(Debug, Clone)]
pub struct AccessGate {
    table: PermissionTable,
}

impl AccessGate {
    pub fn new(table: PermissionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// `true` iff `role` canonicalizes to a known role whose feature set
    /// contains `feature`.
    pub fn check_access(&self, role: &str, feature: Feature) -> bool {
        Role::canonicalize(role).is_some_and(|role| self.table.allows(role, feature))
    }

    /// Resolve and check a caller-supplied role.
    ///
    /// An absent or blank role is a caller error, not a denial. A role that
    /// does not canonicalize, or that has no table entry, is `UnknownRole`.
    pub fn authorize(&self, role: Option<&str>, feature: Feature) -> Result<Role, AccessError> {
        let raw = match role.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                warn!(feature = %feature, "No role provided in request");
                return Err(AccessError::MissingParameter {
                    name: "role".to_string(),
                });
            }
        };

        let role = match Role::canonicalize(raw).filter(|r| self.table.contains_role(*r)) {
            Some(role) => role,
            None => {
                warn!(role = raw, feature = %feature, "Invalid role");
                return Err(AccessError::UnknownRole {
                    role: raw.to_lowercase(),
                });
            }
        };

        if !self.table.allows(role, feature) {
            warn!(role = %role, feature = %feature, "Access denied");
            return Err(AccessError::AccessDenied {
                role: role.to_string(),
                feature,
            });
        }

        debug!(role = %role, feature = %feature, "Access granted");
        Ok(role)
    }

    /// Resolve a role without checking any feature. Used by endpoints that
    /// only need a known caller (e.g. the module listing).
    pub fn identify(&self, role: Option<&str>) -> Result<Role, AccessError> {
        let raw = role.map(str::trim).filter(|r| !r.is_empty()).ok_or_else(|| {
            AccessError::MissingParameter {
                name: "role".to_string(),
            }
        })?;
        Role::canonicalize(raw)
            .filter(|r| self.table.contains_role(*r))
            .ok_or_else(|| AccessError::UnknownRole {
                role: raw.to_lowercase(),
            })
    }

    pub fn features_for(&self, role: Role) -> Vec<Feature> {
        self.table.features_for(role)
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(PermissionTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE_SPELLINGS: &[&str] = &[
        "admin",
        "Admin",
        "hr",
        "HR Specialist",
        "manager",
        "ENGINEER",
        "marketing",
        "intern",
        "ceo",
        "",
        "root",
    ];

    #[test]
    fn check_access_matches_table_for_every_pair() {
        let gate = AccessGate::default();
        for raw in ROLE_SPELLINGS {
            for feature in Feature::ALL {
                let expected = Role::canonicalize(raw)
                    .is_some_and(|role| gate.table().features_for(role).contains(&feature));
                assert_eq!(gate.check_access(raw, feature), expected, "{raw}/{feature}");
            }
        }
    }

    #[test]
    fn engineer_cannot_see_contracts() {
        let gate = AccessGate::default();
        assert!(!gate.check_access("engineer", Feature::Contracts));
    }

    #[test]
    fn admin_can_see_billing() {
        let gate = AccessGate::default();
        assert!(gate.check_access("admin", Feature::Billing));
    }

    #[test]
    fn authorize_distinguishes_missing_unknown_denied() {
        let gate = AccessGate::default();

        assert!(matches!(
            gate.authorize(None, Feature::Contracts),
            Err(AccessError::MissingParameter { .. })
        ));
        assert!(matches!(
            gate.authorize(Some("   "), Feature::Contracts),
            Err(AccessError::MissingParameter { .. })
        ));
        assert!(matches!(
            gate.authorize(Some("wizard"), Feature::Contracts),
            Err(AccessError::UnknownRole { .. })
        ));
        assert_eq!(
            gate.authorize(Some("engineer"), Feature::Contracts),
            Err(AccessError::AccessDenied {
                role: "engineer".to_string(),
                feature: Feature::Contracts,
            })
        );
        assert_eq!(
            gate.authorize(Some("HR Specialist"), Feature::Onboarding),
            Ok(Role::Hr)
        );
    }

    #[test]
    fn role_without_table_entry_is_unknown_not_allowed() {
        let gate = AccessGate::new(PermissionTable::empty().with_role(Role::Admin, Feature::ALL));
        assert!(!gate.check_access("intern", Feature::Resources));
        assert!(matches!(
            gate.authorize(Some("intern"), Feature::Resources),
            Err(AccessError::UnknownRole { .. })
        ));
    }

    #[test]
    fn identify_requires_known_role() {
        let gate = AccessGate::default();
        assert_eq!(gate.identify(Some("Intern")), Ok(Role::Intern));
        assert!(gate.identify(None).is_err());
        assert!(gate.identify(Some("nobody")).is_err());
    }
}
