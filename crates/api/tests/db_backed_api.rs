//! End-to-end flows against PostgreSQL.
//!
//! Run with `cargo test -p aula-api -- --ignored` and `DATABASE_URL` set.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_db_test_app, get, post_json, post_multipart, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn register_login_and_me(pool: PgPool) {
    let app = build_db_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "name": "Luis Paz",
            "email": "Luis@Colegio.edu",
            "password": "cuaderno123",
            "password_confirmation": "cuaderno123"
        }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "estudiante");

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "name": "Otro",
            "email": "luis@colegio.edu",
            "password": "cuaderno123",
            "password_confirmation": "cuaderno123"
        }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "luis@colegio.edu", "password": "wrong-password" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "luis@colegio.edu", "password": "cuaderno123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(&app, "/api/v1/auth/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Luis Paz");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn project_lifecycle_and_report(pool: PgPool) {
    let app = build_db_test_app(pool);
    let token = app.token_for(1, "coordinador");

    let response = post_json(
        &app,
        "/api/v1/projects",
        json!({
            "title": "Huerta escolar",
            "institution": "Colegio Norte",
            "members": [{ "first_name": "Ana", "last_name": "Ruiz", "grade": "10" }]
        }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert!(body["data"]["current_status"].is_null());

    let response = put_json(
        &app,
        &format!("/api/v1/projects/{id}"),
        json!({ "teacher": "Marta Gil" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app,
        &format!("/api/v1/projects/{id}/status"),
        json!({ "status": "Activo", "observation": "Approved" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(
        &app,
        "/api/v1/reports/projects?field=status&search=activo",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body["data"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["teacher"], "Marta Gil");
    assert_eq!(rows[0]["status"], "Activo");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn field_log_is_attributed_to_caller(pool: PgPool) {
    let app = build_db_test_app(pool);
    let token = app.token_for(9, "estudiante");

    let response = post_multipart(
        &app,
        "/api/v1/field-logs",
        &[
            ("date", "2025-04-02"),
            ("location", "Huerta"),
            ("observations", "Germinaron 12 semillas"),
        ],
        &[("photo", "huerta.jpg", "image/jpeg", &b"jpeg-bytes"[..])],
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["user_email"], "user9@colegio.edu");
    assert!(body["data"]["photo_url"]
        .as_str()
        .unwrap()
        .starts_with("http://localhost/files/field-logs/"));
    assert_eq!(app.stored_file_count(), 1);
}
