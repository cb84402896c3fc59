use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Pure access core: no I/O, no logging.
pub mod permissions;
pub mod policy;

// Service layer around the core.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod models;

// Routing segregated by access level (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use identity::{IdentityState, InMemoryDirectory, PostgresDirectory};
pub use policy::{AccessPolicy, NavigationDecision, Role};

/// ApiDoc
///
/// OpenAPI document for every route, served at `/api-docs/openapi.json` and
/// rendered by the Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_roles, handlers::get_default_route, handlers::get_role_routes,
        handlers::check_access, handlers::check_permission, handlers::get_me,
        handlers::get_my_access, handlers::navigate, handlers::get_access_table,
        handlers::get_user_access
    ),
    components(
        schemas(
            models::User, models::UserProfile, models::DefaultRouteResponse,
            models::RoleRoutes, models::AccessDecision, models::PermissionCheck,
            models::RoleAccessSummary, models::NavigateRequest,
            permissions::PermissionCategory,
        )
    ),
    tags(
        (name = "yellowbox-access", description = "Yellow Box role-based route authorization API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single shared state container: the identity directory and the immutable
/// configuration. Cheap to clone; handlers pull the pieces they need via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// Resolves user ids to identity records (and their Role).
    pub identity: IdentityState,
    pub config: AppConfig,
}

impl FromRef<AppState> for IdentityState {
    fn from_ref(app_state: &AppState) -> IdentityState {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Rejects requests whose identity cannot be resolved. `AuthUser` implements
/// `FromRequestParts`, so an unknown or missing user short-circuits with its
/// rejection status before the handler runs.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies the scoped authentication layer
/// and the global observability layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // The Admin role check happens inside the handlers once the caller is authenticated.
        .nest(
            "/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span so every log line for one request carries the
/// same `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
