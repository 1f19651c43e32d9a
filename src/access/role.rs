//! Caller roles.

use serde::{Deserialize, Serialize};

/// A caller role. Input spellings are case-insensitive; the wire form is
/// always the lower-case canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Engineer,
    Marketing,
    Intern,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Hr,
        Role::Manager,
        Role::Engineer,
        Role::Marketing,
        Role::Intern,
    ];

    /// Canonicalize a free-form role string.
    ///
    /// Accepts `admin`, `Admin`, `HR`, `HR Specialist`, `hr_specialist`, etc.
    /// Returns `None` for anything that is not a known role.
    pub fn canonicalize(raw: &str) -> Option<Role> {
        let normalized = raw
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "admin" | "administrator" => Some(Role::Admin),
            "hr" | "hr specialist" => Some(Role::Hr),
            "manager" => Some(Role::Manager),
            "engineer" => Some(Role::Engineer),
            "marketing" => Some(Role::Marketing),
            "intern" => Some(Role::Intern),
            _ => None,
        }
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Manager => "manager",
            Self::Engineer => "engineer",
            Self::Marketing => "marketing",
            Self::Intern => "intern",
        }
    }

    /// Human-facing label, as shown in the dashboard's role picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Hr => "HR Specialist",
            Self::Manager => "Manager",
            Self::Engineer => "Engineer",
            Self::Marketing => "Marketing",
            Self::Intern => "Intern",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::canonicalize(s).ok_or_else(|| format!("Unknown role: {}", s))
    }
}

impl TryFrom<String> for Role {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_is_case_insensitive() {
        assert_eq!(Role::canonicalize("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::canonicalize("  Engineer "), Some(Role::Engineer));
        assert_eq!(Role::canonicalize("intern"), Some(Role::Intern));
    }

    #[test]
    fn hr_specialist_spellings() {
        for raw in ["hr", "HR", "HR Specialist", "hr_specialist", "hr-specialist"] {
            assert_eq!(Role::canonicalize(raw), Some(Role::Hr), "{raw}");
        }
    }

    #[test]
    fn unknown_roles_do_not_canonicalize() {
        assert_eq!(Role::canonicalize(""), None);
        assert_eq!(Role::canonicalize("ceo"), None);
        assert_eq!(Role::canonicalize("admin2"), None);
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        let parsed: Role = serde_json::from_str("\"HR Specialist\"").unwrap();
        assert_eq!(parsed, Role::Hr);
        assert!(serde_json::from_str::<Role>("\"janitor\"").is_err());
    }
}
