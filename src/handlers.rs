use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{
        AccessDecision, DefaultRouteResponse, NavigateRequest, PermissionCheck,
        RoleAccessSummary, RoleRoutes, UserProfile,
    },
    permissions::{PermissionCategory, has_permission},
    policy::{AccessPolicy, Role},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

// --- Query Structs ---

/// AccessCheckQuery
///
/// Query parameters for `GET /access/check`. Both are taken as raw strings so an
/// unknown role or malformed path yields a denial instead of a 400.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct AccessCheckQuery {
    /// Role label, e.g. `Finance` or `Rider-Applicant`.
    pub role: String,
    /// Candidate route path, e.g. `/riders/42`.
    pub path: String,
}

/// RoleQuery
///
/// Query parameter naming the role a permission lookup is evaluated for.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct RoleQuery {
    pub role: String,
}

fn parse_role(label: &str) -> Role {
    let role = Role::parse(label);
    if !role.is_recognized() {
        tracing::warn!(role = %label, "unrecognized role label; evaluating with zero access");
    }
    role
}

// --- Public Handlers ---

/// list_roles
///
/// [Public Route] The four roles the dashboard defines.
#[utoipa::path(
    get,
    path = "/roles",
    responses((status = 200, description = "Defined roles", body = [String]))
)]
pub async fn list_roles() -> Json<Vec<String>> {
    Json(Role::DEFINED.iter().map(|role| role.to_string()).collect())
}

/// get_default_route
///
/// [Public Route] Landing route for a role. Unrecognized roles land on `/`.
#[utoipa::path(
    get,
    path = "/roles/{role}/default-route",
    params(("role" = String, Path, description = "Role label")),
    responses((status = 200, description = "Default route", body = DefaultRouteResponse))
)]
pub async fn get_default_route(Path(role): Path<String>) -> Json<DefaultRouteResponse> {
    Json(DefaultRouteResponse::for_role(parse_role(&role)))
}

/// get_role_routes
///
/// [Public Route] The accessible route prefixes for a role.
#[utoipa::path(
    get,
    path = "/roles/{role}/routes",
    params(("role" = String, Path, description = "Role label")),
    responses((status = 200, description = "Route table row", body = RoleRoutes))
)]
pub async fn get_role_routes(Path(role): Path<String>) -> Json<RoleRoutes> {
    Json(RoleRoutes::for_role(parse_role(&role)))
}

/// check_access
///
/// [Public Route] Evaluates the access policy for an explicit `(role, path)`
/// pair. Denials carry the role's landing route in `redirect_to`.
#[utoipa::path(
    get,
    path = "/access/check",
    params(AccessCheckQuery),
    responses((status = 200, description = "Access decision", body = AccessDecision))
)]
pub async fn check_access(Query(query): Query<AccessCheckQuery>) -> Json<AccessDecision> {
    Json(AccessDecision::evaluate(parse_role(&query.role), &query.path))
}

/// check_permission
///
/// [Public Route] Looks up a single feature switch. Unknown categories and
/// features report `allowed: false`.
#[utoipa::path(
    get,
    path = "/permissions/{category}/{feature}",
    params(
        ("category" = String, Path, description = "settings, navigation or features"),
        ("feature" = String, Path, description = "Feature key, e.g. approveExpense"),
        RoleQuery
    ),
    responses((status = 200, description = "Permission check", body = PermissionCheck))
)]
pub async fn check_permission(
    Path((category, feature)): Path<(String, String)>,
    Query(query): Query<RoleQuery>,
) -> Json<PermissionCheck> {
    let role = parse_role(&query.role);
    let allowed = PermissionCategory::parse(&category)
        .is_some_and(|category| has_permission(role, &feature, category));

    Json(PermissionCheck {
        role,
        category,
        feature,
        allowed,
    })
}

// --- Authenticated Handlers ---

/// get_me
///
/// [Authenticated Route] The caller's identity and landing route.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn get_me(AuthUser { id, email, name, role }: AuthUser) -> Json<UserProfile> {
    Json(UserProfile {
        id,
        email,
        name,
        role,
        default_route: AccessPolicy::default_route_for(role).to_string(),
    })
}

/// get_my_access
///
/// [Authenticated Route] Route table row and permitted features for the caller.
#[utoipa::path(
    get,
    path = "/me/access",
    responses((status = 200, description = "Access summary", body = RoleAccessSummary))
)]
pub async fn get_my_access(AuthUser { role, .. }: AuthUser) -> Json<RoleAccessSummary> {
    Json(RoleAccessSummary::for_role(role))
}

/// navigate
///
/// [Authenticated Route] Guards a navigation attempt by the caller. The router
/// calls this before rendering a route and follows `redirect_to` on denial.
#[utoipa::path(
    post,
    path = "/me/navigate",
    request_body = NavigateRequest,
    responses((status = 200, description = "Access decision", body = AccessDecision))
)]
pub async fn navigate(
    AuthUser { id, role, .. }: AuthUser,
    Json(payload): Json<NavigateRequest>,
) -> Json<AccessDecision> {
    let decision = AccessDecision::evaluate(role, &payload.path);

    if !decision.allowed {
        tracing::info!(
            user_id = %id,
            %role,
            path = %decision.path,
            redirect_to = ?decision.redirect_to,
            "navigation denied"
        );
    }

    Json(decision)
}

// --- Admin Handlers ---

fn require_admin(role: Role) -> Result<(), ApiError> {
    match role {
        Role::Admin => Ok(()),
        Role::Operations | Role::Finance | Role::RiderApplicant | Role::Unrecognized => {
            Err(ApiError::Forbidden)
        }
    }
}

/// get_access_table
///
/// [Admin Route] The complete access table for the four defined roles.
///
/// *Authorization*: Explicitly checks that the caller's role is `Admin`.
#[utoipa::path(
    get,
    path = "/admin/access-table",
    responses(
        (status = 200, description = "Access table", body = [RoleAccessSummary]),
        (status = 403, description = "Not Admin")
    )
)]
pub async fn get_access_table(
    AuthUser { role, .. }: AuthUser,
) -> Result<Json<Vec<RoleAccessSummary>>, ApiError> {
    require_admin(role)?;

    Ok(Json(
        Role::DEFINED
            .into_iter()
            .map(RoleAccessSummary::for_role)
            .collect(),
    ))
}

/// get_user_access
///
/// [Admin Route] Access summary for another user, resolved through the
/// identity directory.
#[utoipa::path(
    get,
    path = "/admin/users/{id}/access",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Access summary", body = RoleAccessSummary),
        (status = 403, description = "Not Admin"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_user_access(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<RoleAccessSummary>, ApiError> {
    require_admin(role)?;

    let user = state
        .identity
        .get_user(user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(RoleAccessSummary::for_role(user.role)))
}
