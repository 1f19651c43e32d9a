//! Protected capabilities.

use serde::{Deserialize, Serialize};

/// A protected capability that the gate checks roles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Feature {
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
}

impl Feature {
    /// All features in dashboard order.
    pub const ALL: [Feature; 10] = [
        Feature::Contracts,
        Feature::Onboarding,
        Feature::Resources,
        Feature::Uploads,
        Feature::TimeOff,
        Feature::TimeTracking,
        Feature::Groups,
        Feature::Entities,
        Feature::RolesPermissions,
        Feature::Billing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contracts => "contracts",
            Self::Onboarding => "onboarding",
            Self::Resources => "resources",
            Self::Uploads => "uploads",
            Self::TimeOff => "time-off",
            Self::TimeTracking => "time-tracking",
            Self::Groups => "groups",
            Self::Entities => "entities",
            Self::RolesPermissions => "roles-permissions",
            Self::Billing => "billing",
        }
    }

    /// Dashboard module title.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contracts => "Contractors",
            Self::Onboarding => "Onboarding",
            Self::Resources => "Resources",
            Self::Uploads => "Upload",
            Self::TimeOff => "Time Off",
            Self::TimeTracking => "Time Tracking",
            Self::Groups => "Groups",
            Self::Entities => "Entities",
            Self::RolesPermissions => "Roles & Permissions",
            Self::Billing => "Billing & Payments",
        }
    }

    /// Parse a feature name or dashboard label.
    pub fn parse_lenient(raw: &str) -> Option<Feature> {
        let mut slug = String::with_capacity(raw.len());
        for c in raw.trim().chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_matches('-');

        match slug {
            "contracts" | "contract" | "contractors" => Some(Self::Contracts),
            "onboarding" => Some(Self::Onboarding),
            "resources" | "resource" => Some(Self::Resources),
            "uploads" | "upload" => Some(Self::Uploads),
            "time-off" | "timeoff" => Some(Self::TimeOff),
            "time-tracking" | "timetracking" => Some(Self::TimeTracking),
            "groups" => Some(Self::Groups),
            "entities" => Some(Self::Entities),
            "roles-permissions" | "roles-and-permissions" => Some(Self::RolesPermissions),
            "billing" | "billing-payments" | "billing-and-payments" => Some(Self::Billing),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::parse_lenient(s).ok_or_else(|| format!("Unknown feature: {}", s))
    }
}

impl TryFrom<String> for Feature {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
