use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::policy::Role::{self, Admin, Finance, Operations, RiderApplicant};

/// PermissionCategory
///
/// The three groups of feature switches the dashboard consults: settings tabs,
/// navigation entries, and individual actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PermissionCategory {
    Settings,
    Navigation,
    Features,
}

impl PermissionCategory {
    pub const ALL: [PermissionCategory; 3] = [
        PermissionCategory::Settings,
        PermissionCategory::Navigation,
        PermissionCategory::Features,
    ];

    /// Returns `None` for any label outside the three known categories.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "settings" => Some(PermissionCategory::Settings),
            "navigation" => Some(PermissionCategory::Navigation),
            "features" => Some(PermissionCategory::Features),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PermissionCategory::Settings => "settings",
            PermissionCategory::Navigation => "navigation",
            PermissionCategory::Features => "features",
        }
    }

    const fn table(self) -> FeatureTable {
        match self {
            PermissionCategory::Settings => SETTINGS,
            PermissionCategory::Navigation => NAVIGATION,
            PermissionCategory::Features => FEATURES,
        }
    }
}

type FeatureTable = &'static [(&'static str, &'static [Role])];

const ALL_ROLES: &[Role] = &[Admin, Operations, Finance, RiderApplicant];
const STAFF: &[Role] = &[Admin, Operations, Finance];

const SETTINGS: FeatureTable = &[
    ("budget", &[Admin, Finance]),
    ("notifications", ALL_ROLES),
    ("categories", &[Admin]),
    ("bikes", &[Admin, Operations]),
    ("apiKeys", &[Admin]),
    ("sync", &[Admin]),
    ("personal", &[RiderApplicant]),
];

const NAVIGATION: FeatureTable = &[
    ("dashboard", STAFF),
    ("riders", STAFF),
    ("expenses", STAFF),
    ("visas", &[Admin, Finance]),
    ("bikeTracker", &[Admin, Operations]),
    ("activity", &[Admin, Operations]),
    ("reports", STAFF),
    ("notifications", ALL_ROLES),
    ("settings", ALL_ROLES),
    ("profile", ALL_ROLES),
];

const FEATURES: FeatureTable = &[
    // Expenses
    ("createExpense", &[Admin, Operations]),
    ("approveExpense", &[Admin, Finance]),
    ("viewExpenses", STAFF),
    ("deleteExpense", &[Admin]),
    // Riders
    ("createRider", &[Admin, Operations]),
    ("updateRider", &[Admin, Operations]),
    ("viewRiders", STAFF),
    ("deleteRider", &[Admin]),
    // Documents
    ("uploadDocuments", &[Admin, Operations, RiderApplicant]),
    ("viewDocuments", STAFF),
    ("deleteDocuments", &[Admin]),
    // Budget
    ("setBudget", &[Admin, Finance]),
    ("viewBudget", &[Admin, Finance, Operations]),
    // Bikes
    ("assignBike", &[Admin, Operations]),
    ("trackBike", &[Admin, Operations]),
    ("updateBikeStatus", &[Admin, Operations]),
];

/// has_permission
///
/// Checks whether `role` may use `feature` within `category`. Unknown features
/// and unrecognized roles are denied.
pub fn has_permission(role: Role, feature: &str, category: PermissionCategory) -> bool {
    category
        .table()
        .iter()
        .find(|(name, _)| *name == feature)
        .is_some_and(|(_, roles)| roles.contains(&role))
}

/// Lists every feature in `category` granted to `role`, in table order.
pub fn permitted_features(role: Role, category: PermissionCategory) -> Vec<&'static str> {
    category
        .table()
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(name, _)| *name)
        .collect()
}
