use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Authenticated Router Module
///
/// Routes evaluated for the caller's own role. Every handler here receives an
/// `AuthUser` resolved from the `x-user-id` header, and the `auth_middleware`
/// layered above rejects unknown callers before they reach a handler.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // Identity plus landing route.
        .route("/me", get(handlers::get_me))
        // GET /me/access
        // Route table row and permitted features, used to build the sidebar.
        .route("/me/access", get(handlers::get_my_access))
        // POST /me/navigate
        // Navigation guard: allowed, or redirect to the caller's landing route.
        .route("/me/navigate", post(handlers::navigate))
}
