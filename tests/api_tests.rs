use std::sync::Arc;
use tokio::net::TcpListener;
use yellowbox_access::{
    AppConfig, AppState, InMemoryDirectory, create_router,
    identity::SEED_ADMIN_ID,
    models::{AccessDecision, DefaultRouteResponse, PermissionCheck, RoleRoutes, UserProfile},
};

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app() -> TestApp {
    let state = AppState {
        identity: Arc::new(InMemoryDirectory::seeded()),
        config: AppConfig::default(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let response = reqwest::get(format!("{}/health", app.address))
        .await
        .expect("req fail");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_list_roles() {
    let app = spawn_app().await;
    let roles: Vec<String> = reqwest::get(format!("{}/roles", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(roles, ["Admin", "Operations", "Finance", "Rider-Applicant"]);
}

#[tokio::test]
async fn test_post_login_flow_for_rider() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // 1. Landing route after login
    let landing: DefaultRouteResponse = client
        .get(format!("{}/roles/Rider-Applicant/default-route", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(landing.default_route, "/profile");

    // 2. The landing route passes the guard
    let decision: AccessDecision = client
        .get(format!("{}/access/check", app.address))
        .query(&[("role", "Rider-Applicant"), ("path", landing.default_route.as_str())])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(decision.allowed);

    // 3. A staff-only page does not
    let decision: AccessDecision = client
        .get(format!("{}/access/check", app.address))
        .query(&[("role", "Rider-Applicant"), ("path", "/riders/42")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!decision.allowed);
    assert_eq!(decision.redirect_to.as_deref(), Some("/profile"));
}

#[tokio::test]
async fn test_access_check_rejects_naive_prefix() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let decision: AccessDecision = client
        .get(format!("{}/access/check", app.address))
        .query(&[("role", "Finance"), ("path", "/riders2")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!decision.allowed);
}

#[tokio::test]
async fn test_role_routes_for_unrecognized_role_are_empty() {
    let app = spawn_app().await;
    let routes: RoleRoutes = reqwest::get(format!("{}/roles/Driver/routes", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(routes.accessible_routes.is_empty());
    assert_eq!(routes.default_route, "/");
}

#[tokio::test]
async fn test_permission_lookup() {
    let app = spawn_app().await;
    let check: PermissionCheck = reqwest::Client::new()
        .get(format!("{}/permissions/settings/budget", app.address))
        .query(&[("role", "Operations")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(check.feature, "budget");
    assert!(!check.allowed);
}

#[tokio::test]
async fn test_me_for_seeded_admin() {
    let app = spawn_app().await;
    let response = reqwest::Client::new()
        .get(format!("{}/me", app.address))
        .header("x-user-id", SEED_ADMIN_ID.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let profile: UserProfile = response.json().await.unwrap();
    assert_eq!(profile.email, "admin@yellowbox.ae");
    assert_eq!(profile.default_route, "/");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = spawn_app().await;
    let doc: serde_json::Value = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/access/check"].is_object());
    assert!(doc["paths"]["/me/navigate"].is_object());
}
