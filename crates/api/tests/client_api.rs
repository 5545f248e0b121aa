//! `/api/clientes/` endpoints: CRUD, filters, logical delete and visibility.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_client, create_project, delete_auth, get_auth, patch_json_auth,
    post_json_auth, put_json_auth,
};
use gestion_db::repositories::ClientRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_retrieve_client(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = create_client(app.clone(), &token, "acme@example.com").await;
    assert_eq!(created["activo"], true);
    assert!(created["fecha_creacion"].is_string());
    assert_eq!(created["proyectos"], json!([]));

    let id = created["id"].as_i64().unwrap();
    let response = get_auth(app, &format!("/api/clientes/{id}/"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "acme@example.com");
    assert_eq!(json["empresa"], "Acme SA");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_may_create_but_not_see(pool: PgPool) {
    let token = common::client_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = create_client(app.clone(), &token, "mine@example.com").await;
    let id = created["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/clientes/{id}/"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/clientes/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_cannot_modify_or_delete(pool: PgPool) {
    let admin = common::admin_token(&pool).await;
    let user = common::client_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = create_client(app.clone(), &admin, "x@example.com").await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/clientes/{id}/");

    let response = patch_json_auth(app.clone(), &uri, json!({ "nombre": "Hack" }), &user).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &user).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let client = ClientRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(client.nombre, "Acme");
    assert!(client.activo);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_and_patch_client(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let id = create_client(app.clone(), &token, "a@example.com").await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/clientes/{id}/");

    let body = json!({ "nombre": "Beta", "email": "b@example.com", "empresa": "Beta SL" });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["nombre"], "Beta");
    assert_eq!(json["email"], "b@example.com");

    let response = patch_json_auth(app, &uri, json!({ "empresa": "Gamma" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["empresa"], "Gamma");
    assert_eq!(json["nombre"], "Beta");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_deactivates_client(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let client = create_client(app.clone(), &token, "soft@example.com").await;
    let id = client["id"].as_i64().unwrap();
    create_project(app.clone(), &token, id).await;

    let response = delete_auth(app.clone(), &format!("/api/clientes/{id}/"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "detail": "Cliente desactivado exitosamente." })
    );

    let stored = ClientRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(!stored.activo);

    // Still retrievable, with its projects intact.
    let response = get_auth(app.clone(), &format!("/api/clientes/{id}/"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["activo"], false);
    assert_eq!(json["proyectos"].as_array().unwrap().len(), 1);

    // Deleting again is still a 200.
    let response = delete_auth(app, &format!("/api/clientes/{id}/"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_is_rejected_even_after_deactivation(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let id = create_client(app.clone(), &token, "dup@example.com").await["id"]
        .as_i64()
        .unwrap();
    delete_auth(app.clone(), &format!("/api/clientes/{id}/"), &token).await;

    let body = json!({ "nombre": "Otro", "email": "dup@example.com", "empresa": "Otro" });
    let response = post_json_auth(app, "/api/clientes/", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_nesting(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let first = create_client(app.clone(), &token, "one@example.com").await;
    let second = create_client(app.clone(), &token, "two@example.com").await;
    let second_id = second["id"].as_i64().unwrap();
    create_project(app.clone(), &token, second_id).await;
    delete_auth(
        app.clone(),
        &format!("/api/clientes/{}/", first["id"]),
        &token,
    )
    .await;

    let response = get_auth(app.clone(), "/api/clientes/", &token).await;
    let all = body_json(response).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], second["id"], "newest first");
    assert_eq!(all[0]["proyectos"][0]["tareas"], json!([]));

    let response = get_auth(app.clone(), "/api/clientes/?activo=true", &token).await;
    let active = body_json(response).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["id"], second["id"]);

    let response = get_auth(app, "/api/clientes/?empresa=Nadie", &token).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_client_payloads(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let bad_email = json!({ "nombre": "A", "email": "not-an-email", "empresa": "A" });
    let response = post_json_auth(app.clone(), "/api/clientes/", bad_email, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let blank_name = json!({ "nombre": "  ", "email": "a@example.com", "empresa": "A" });
    let response = post_json_auth(app, "/api/clientes/", blank_name, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_filters_list_everything(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let first = create_client(app.clone(), &token, "one@example.com").await;
    create_client(app.clone(), &token, "two@example.com").await;
    delete_auth(
        app.clone(),
        &format!("/api/clientes/{}/", first["id"]),
        &token,
    )
    .await;

    let response = get_auth(app.clone(), "/api/clientes/?empresa=&activo=", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get_auth(app, "/api/clientes/?empresa=&activo=false", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let inactive = body_json(response).await;
    assert_eq!(inactive.as_array().unwrap().len(), 1);
    assert_eq!(inactive[0]["id"], first["id"]);
}
