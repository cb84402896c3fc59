use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints that need no identity. They evaluate the static policy tables for
/// an explicitly supplied role, so the dashboard can resolve landing routes and
/// guard navigation before a session exists.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers; returns "ok".
        .route("/health", get(|| async { "ok" }))
        // GET /roles
        .route("/roles", get(handlers::list_roles))
        // GET /roles/{role}/default-route
        // Landing route used immediately after login.
        .route(
            "/roles/{role}/default-route",
            get(handlers::get_default_route),
        )
        // GET /roles/{role}/routes
        .route("/roles/{role}/routes", get(handlers::get_role_routes))
        // GET /access/check?role=...&path=...
        // Pure policy evaluation; denials carry the redirect target.
        .route("/access/check", get(handlers::check_access))
        // GET /permissions/{category}/{feature}?role=...
        .route(
            "/permissions/{category}/{feature}",
            get(handlers::check_permission),
        )
}
