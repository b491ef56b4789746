#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use medoh_api::auth::jwt::{generate_access_token, JwtConfig};
use medoh_api::config::ServerConfig;
use medoh_api::router::build_app_router;
use medoh_api::state::AppState;
use medoh_core::roles::{ROLE_ADMIN, ROLE_DOCTOR, ROLE_VIEWER};
use medoh_core::types::DbId;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

fn token(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

pub fn admin_token() -> String {
    token(1, ROLE_ADMIN)
}

pub fn doctor_token(doctor_id: DbId) -> String {
    token(doctor_id, ROLE_DOCTOR)
}

pub fn viewer_token(viewer_id: DbId) -> String {
    token(viewer_id, ROLE_VIEWER)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
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
    .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// POST as admin and return the created resource's `data` object.
pub async fn create_as_admin(pool: &PgPool, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(build_test_app(pool.clone()), uri, Some(&admin_token()), body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"].clone()
}

/// Create a video and place it at the end of a plain section.
pub async fn placed_video(pool: &PgPool, section_id: DbId, name: &str) -> DbId {
    let video = create_as_admin(
        pool,
        "/api/v1/videos",
        serde_json::json!({
            "name": name,
            "url": format!("https://cdn.example.com/{name}.mp4"),
        }),
    )
    .await;
    let id = video["id"].as_i64().expect("video id");
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/videos/{id}/placement"),
        Some(&admin_token()),
        serde_json::json!({"container_kind": "section", "container_id": section_id}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    id
}

/// A topic with two plain sections, returning `(topic_id, [section ids])`.
pub async fn topic_with_sections(pool: &PgPool, names: &[&str]) -> (DbId, Vec<DbId>) {
    let topic = create_as_admin(pool, "/api/v1/topics", serde_json::json!({"name": "Topic"})).await;
    let topic_id = topic["id"].as_i64().expect("topic id");
    let mut ids = Vec::new();
    for name in names {
        let section = create_as_admin(
            pool,
            &format!("/api/v1/topics/{topic_id}/sections"),
            serde_json::json!({"name": name}),
        )
        .await;
        ids.push(section["key"]["id"].as_i64().expect("section id"));
    }
    (topic_id, ids)
}
