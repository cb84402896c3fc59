use serde::{Deserialize, Serialize};
use std::fmt;

/// Role
///
/// The access-control classification of an authenticated identity, as supplied
/// by the upstream identity service. The wire form is the exact, case-sensitive
/// label used by the dashboard (`"Admin"`, `"Operations"`, `"Finance"`,
/// `"Rider-Applicant"`).
///
/// Any other label parses to [`Role::Unrecognized`]. That branch carries no
/// accessible routes, so every match over `Role` has to decide explicitly what an
/// unknown identity gets, and the tables below give it nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Operations,
    Finance,
    RiderApplicant,
    Unrecognized,
}

impl Role {
    /// The four roles the dashboard defines, in table order.
    pub const DEFINED: [Role; 4] = [
        Role::Admin,
        Role::Operations,
        Role::Finance,
        Role::RiderApplicant,
    ];

    /// Parses a wire label. Never fails: unknown labels become `Unrecognized`.
    pub fn parse(label: &str) -> Self {
        match label {
            "Admin" => Role::Admin,
            "Operations" => Role::Operations,
            "Finance" => Role::Finance,
            "Rider-Applicant" => Role::RiderApplicant,
            _ => Role::Unrecognized,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Operations => "Operations",
            Role::Finance => "Finance",
            Role::RiderApplicant => "Rider-Applicant",
            Role::Unrecognized => "Unrecognized",
        }
    }

    pub const fn is_recognized(self) -> bool {
        !matches!(self, Role::Unrecognized)
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Role::parse(label)
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Role::parse(&label)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Static Route Tables ---

const ADMIN_ROUTES: &[&str] = &[
    "/",
    "/reports",
    "/riders",
    "/expenses",
    "/visas",
    "/settings",
    "/activity",
    "/notifications",
    "/bike-tracker",
    "/profile",
];

const OPERATIONS_ROUTES: &[&str] = &[
    "/",
    "/reports",
    "/riders",
    "/settings",
    "/activity",
    "/notifications",
    "/bike-tracker",
    "/profile",
];

const FINANCE_ROUTES: &[&str] = &[
    "/",
    "/reports",
    "/riders",
    "/expenses",
    "/visas",
    "/settings",
    "/notifications",
    "/profile",
];

const RIDER_APPLICANT_ROUTES: &[&str] = &["/", "/profile", "/notifications", "/settings"];

/// NavigationDecision
///
/// The outcome of guarding a single navigation attempt. A denied attempt always
/// carries the caller's landing route so the router can redirect without a
/// second lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect { to: &'static str },
}

impl NavigationDecision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

/// AccessPolicy
///
/// Pure decision functions over `(Role, path)` pairs. The tables are compiled-in
/// constants selected by an exhaustive match on [`Role`]; nothing here performs
/// I/O, allocates, or logs, so it can be called from any number of request tasks
/// at once.
pub struct AccessPolicy;

impl AccessPolicy {
    /// The route prefixes a role may navigate into, including their children.
    /// Empty for an unrecognized role.
    pub const fn accessible_routes(role: Role) -> &'static [&'static str] {
        match role {
            Role::Admin => ADMIN_ROUTES,
            Role::Operations => OPERATIONS_ROUTES,
            Role::Finance => FINANCE_ROUTES,
            Role::RiderApplicant => RIDER_APPLICANT_ROUTES,
            Role::Unrecognized => &[],
        }
    }

    /// The canonical landing path used right after authentication.
    ///
    /// An unrecognized role lands on `/` even though `can_access` denies it
    /// that path; the router is expected to surface the invalid session.
    pub const fn default_route_for(role: Role) -> &'static str {
        match role {
            Role::Admin | Role::Operations | Role::Finance => "/",
            Role::RiderApplicant => "/profile",
            Role::Unrecognized => "/",
        }
    }

    /// True iff `path` equals, or is a `/`-separated child of, one of the
    /// role's accessible routes. Malformed paths (empty, or not starting with
    /// `/`) are never accessible.
    pub fn can_access(role: Role, path: &str) -> bool {
        if !is_well_formed(path) {
            return false;
        }

        Self::accessible_routes(role)
            .iter()
            .any(|route| covers(route, path))
    }

    /// Guards a navigation attempt, redirecting denied attempts to the role's
    /// landing route.
    pub fn decide(role: Role, path: &str) -> NavigationDecision {
        if Self::can_access(role, path) {
            NavigationDecision::Allow
        } else {
            NavigationDecision::Redirect {
                to: Self::default_route_for(role),
            }
        }
    }
}

fn is_well_formed(path: &str) -> bool {
    path.starts_with('/')
}

/// `path == route || path.starts_with(route + "/")`, without building the
/// joined string. `/riders2` is not covered by `/riders`.
fn covers(route: &str, path: &str) -> bool {
    path == route
        || path
            .strip_prefix(route)
            .is_some_and(|rest| rest.starts_with('/'))
}
