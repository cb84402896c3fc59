use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Oversight endpoints for the `Admin` role. The router is nested under `/admin`
/// behind the authentication layer; the role check itself happens inside each
/// handler.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/access-table
        // The full policy for all four roles, for auditing.
        .route("/access-table", get(handlers::get_access_table))
        // GET /admin/users/{id}/access
        // What a specific user can reach, resolved through the directory.
        .route("/users/{id}/access", get(handlers::get_user_access))
}
