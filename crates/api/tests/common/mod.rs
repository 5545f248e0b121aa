#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use gestion_core::roles::Role;
use gestion_core::types::DbId;
use gestion_db::models::user::{CreateUser, User};
use gestion_db::repositories::UserRepo;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use gestion_api::auth::jwt::{generate_access_token, JwtConfig};
use gestion_api::auth::password::hash_password;
use gestion_api::config::ServerConfig;
use gestion_api::router::build_app_router;
use gestion_api::state::AppState;

/// Plaintext password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

/// Create a user (and its profile) directly in the database.
pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role,
    };
    let (user, _) = UserRepo::create_with_profile(pool, &input)
        .await
        .expect("user creation should succeed");
    user
}

/// Deactivate a user account in place. No endpoint does this, so tests set it
/// up directly.
pub async fn deactivate_user(pool: &PgPool, user_id: DbId) {
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("deactivating user should succeed");
}

/// Mint an access token signed with the test secret.
pub fn token_for(user_id: DbId, role: Role) -> String {
    generate_access_token(user_id, role, &test_jwt_config()).expect("token generation")
}

/// Create an admin user and return an access token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let user = create_user(pool, "admin", Role::Admin).await;
    token_for(user.id, Role::Admin)
}

/// Create a client-role user and return an access token for it.
pub async fn client_token(pool: &PgPool) -> String {
    let user = create_user(pool, "cliente", Role::Client).await;
    token_for(user.id, Role::Client)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Fixtures created through the API
// ---------------------------------------------------------------------------

pub async fn create_client(app: Router, token: &str, email: &str) -> Value {
    let body = serde_json::json!({
        "nombre": "Acme",
        "email": email,
        "empresa": "Acme SA",
    });
    let response = post_json_auth(app, "/api/clientes/", body, token).await;
    assert_eq!(response.status(), 201, "client fixture should be created");
    body_json(response).await
}

pub async fn create_project(app: Router, token: &str, cliente: i64) -> Value {
    let body = serde_json::json!({
        "nombre": "Portal",
        "descripcion": "Rediseño del portal",
        "cliente": cliente,
        "fecha_inicio": "2026-01-10",
        "fecha_entrega": "2026-03-31",
    });
    let response = post_json_auth(app, "/api/proyectos/", body, token).await;
    assert_eq!(response.status(), 201, "project fixture should be created");
    body_json(response).await
}

pub async fn create_task(app: Router, token: &str, proyecto: i64, progreso: i32) -> Value {
    let body = serde_json::json!({
        "titulo": "Tarea",
        "descripcion": "Implementar",
        "progreso": progreso,
        "proyecto": proyecto,
    });
    let response = post_json_auth(app, "/api/tareas/", body, token).await;
    assert_eq!(response.status(), 201, "task fixture should be created");
    body_json(response).await
}
