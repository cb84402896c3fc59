use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    permissions::{PermissionCategory, permitted_features},
    policy::{AccessPolicy, NavigationDecision, Role},
};

// --- Identity Records ---

/// User
///
/// The identity record resolved from the user directory. The `role` is trusted
/// as supplied by the identity service and drives every access decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Rider-Applicant")]
    pub role: Role,
}

/// UserProfile
///
/// Response for `GET /me`: the caller's identity plus the landing route the
/// dashboard should open after login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Admin")]
    pub role: Role,
    #[schema(example = "/")]
    pub default_route: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            default_route: AccessPolicy::default_route_for(user.role).to_string(),
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

// --- Policy Responses ---

/// DefaultRouteResponse
///
/// Landing route for a role, returned by `GET /roles/{role}/default-route`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DefaultRouteResponse {
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Rider-Applicant")]
    pub role: Role,
    #[schema(example = "/profile")]
    pub default_route: String,
}

impl DefaultRouteResponse {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            default_route: AccessPolicy::default_route_for(role).to_string(),
        }
    }
}

/// RoleRoutes
///
/// The full route-table row for one role.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RoleRoutes {
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Operations")]
    pub role: Role,
    pub default_route: String,
    pub accessible_routes: Vec<String>,
}

impl RoleRoutes {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            default_route: AccessPolicy::default_route_for(role).to_string(),
            accessible_routes: AccessPolicy::accessible_routes(role)
                .iter()
                .map(|route| route.to_string())
                .collect(),
        }
    }
}

/// AccessDecision
///
/// The answer to "may this role open this path?". `redirect_to` is only present
/// when access is denied, and points at the role's landing route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AccessDecision {
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Finance")]
    pub role: Role,
    #[schema(example = "/riders/42")]
    pub path: String,
    pub allowed: bool,
    #[schema(example = "/")]
    pub redirect_to: Option<String>,
}

impl AccessDecision {
    pub fn evaluate(role: Role, path: &str) -> Self {
        let redirect_to = match AccessPolicy::decide(role, path) {
            NavigationDecision::Allow => None,
            NavigationDecision::Redirect { to } => Some(to.to_string()),
        };

        Self {
            role,
            path: path.to_string(),
            allowed: redirect_to.is_none(),
            redirect_to,
        }
    }
}

/// PermissionCheck
///
/// Result of a single feature lookup. Unknown categories and features are
/// reported as not allowed rather than as errors.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PermissionCheck {
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Finance")]
    pub role: Role,
    #[schema(example = "features")]
    pub category: String,
    #[schema(example = "approveExpense")]
    pub feature: String,
    pub allowed: bool,
}

/// RoleAccessSummary
///
/// Everything the dashboard needs to build its navigation for one role: the
/// route table row and the permitted features per category.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RoleAccessSummary {
    #[ts(type = "string")]
    #[schema(value_type = String, example = "Admin")]
    pub role: Role,
    pub default_route: String,
    pub accessible_routes: Vec<String>,
    pub settings: Vec<String>,
    pub navigation: Vec<String>,
    pub features: Vec<String>,
}

impl RoleAccessSummary {
    pub fn for_role(role: Role) -> Self {
        let features_in = |category: PermissionCategory| -> Vec<String> {
            permitted_features(role, category)
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        let RoleRoutes {
            default_route,
            accessible_routes,
            ..
        } = RoleRoutes::for_role(role);

        Self {
            role,
            default_route,
            accessible_routes,
            settings: features_in(PermissionCategory::Settings),
            navigation: features_in(PermissionCategory::Navigation),
            features: features_in(PermissionCategory::Features),
        }
    }
}

// --- Request Payloads ---

/// NavigateRequest
///
/// Input payload for `POST /me/navigate`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigateRequest {
    #[schema(example = "/expenses/123")]
    pub path: String,
}
