use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use folio_admin::{
    AppState, LocalAuthProvider, MemoryAuditLog, MemoryContentStore, build_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_COST: u32 = 4;

fn app() -> axum::Router {
    let auth = LocalAuthProvider::with_admin("admin@example.com", "adminpass", TEST_COST)
        .expect("admin account should be created");
    let state = AppState::new(
        Arc::new(MemoryContentStore::new()),
        Arc::new(MemoryAuditLog::new()),
        Arc::new(auth),
    );
    build_router(state)
}

async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    payload: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

async fn sign_in(app: &axum::Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/sign-in",
        None,
        Some(json!({"email": "admin@example.com", "password": "adminpass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "admin@example.com");
    body["token"].as_str().expect("token expected").to_string()
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn admin_routes_require_a_session() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/admin/content", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = send(&app, Method::GET, "/api/admin/activity", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/sign-in",
        None,
        Some(json!({"email": "admin@example.com", "password": "wrong-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn save_section_flows_to_public_content_and_activity() {
    let app = app();
    let token = sign_in(&app).await;

    let (status, draft) = send(
        &app,
        Method::GET,
        "/api/admin/sections/skills/draft",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft, json!({"categories": [{"title": "", "skills": [""]}]}));

    let (status, committed) = send(
        &app,
        Method::PUT,
        "/api/admin/sections/skills",
        Some(&token),
        Some(json!({"categories": [
            {"title": "Languages", "skills": ["Go", ""]},
            {"title": "", "skills": [""]}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        committed,
        json!({"categories": [{"title": "Languages", "skills": ["Go"]}]})
    );

    let (status, public) = send(&app, Method::GET, "/api/content", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public["skills"], committed);

    let (_, admin) = send(&app, Method::GET, "/api/admin/content", Some(&token), None).await;
    assert_eq!(admin["skills"], committed);

    let (_, notifications) = send(
        &app,
        Method::GET,
        "/api/admin/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(
        notifications[0]["description"],
        "skills section updated successfully"
    );

    let (_, activity) = send(&app, Method::GET, "/api/admin/activity", Some(&token), None).await;
    assert_eq!(activity.as_array().map(Vec::len), Some(1));
    assert_eq!(activity[0]["summary"], "Updated skills section content");
    assert_eq!(activity[0]["relative_time"], "less than a minute ago");
}

#[tokio::test]
async fn invalid_content_is_rejected() {
    let app = app();
    let token = sign_in(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/admin/sections/contact",
        Some(&token),
        Some(json!({"email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "invalid_content");

    let (_, public) = send(&app, Method::GET, "/api/content", None, None).await;
    assert_eq!(public, json!({}));
}

#[tokio::test]
async fn unknown_section_is_not_found() {
    let app = app();
    let token = sign_in(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/sections/blog/schema",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "unknown_section");
}

#[tokio::test]
async fn schema_and_preview_describe_the_section() {
    let app = app();
    let token = sign_in(&app).await;

    let (status, schema) = send(
        &app,
        Method::GET,
        "/api/admin/sections/contact/schema",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema["fields"][0]["key"], "email");
    assert_eq!(schema["fields"][0]["kind"], "email");

    let (status, preview) = send(
        &app,
        Method::POST,
        "/api/admin/sections/contact/preview",
        Some(&token),
        Some(json!({"email": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["blocks"][0]["text"], "your.email@example.com");
}

#[tokio::test]
async fn sign_out_ends_the_session() {
    let app = app();
    let token = sign_in(&app).await;

    let (status, _) = send(&app, Method::POST, "/api/auth/sign-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/admin/content", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
