//! HTTP-level integration tests for the auth endpoints: registration,
//! login, and user search.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use sqlx::PgPool;

/// Register a user via the API and return the response JSON.
async fn register_user(app: axum::Router, name: &str, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": password,
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_public_profile_without_password(pool: PgPool) {
    let app = build_test_app(pool);

    let json = register_user(app, "Alice", "alice@x.com", "s3cret-pass").await;

    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["email"], "alice@x.com");
    assert!(json["phone"].is_null());
    assert!(
        json.get("password").is_none() && json.get("password_hash").is_none(),
        "no credential material may leak into the response"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_conflicts_case_insensitively(pool: PgPool) {
    let app = build_test_app(pool);

    register_user(app.clone(), "Alice", "alice@x.com", "s3cret-pass").await;

    let body = serde_json::json!({
        "name": "Impostor",
        "email": "ALICE@X.COM",
        "password": "other-pass",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["message"], "User with this email already exists.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_invalid_payloads_with_details(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({
        "name": "",
        "email": "not-an-email",
        "password": "pw",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed");
    assert!(json["errors"]["name"].is_array());
    assert!(json["errors"]["email"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_succeeds_with_correct_credentials(pool: PgPool) {
    let app = build_test_app(pool);
    register_user(app.clone(), "Alice", "alice@x.com", "s3cret-pass").await;

    let body = serde_json::json!({ "email": "Alice@X.com", "password": "s3cret-pass" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["email"], "alice@x.com");
}

/// A wrong password and a nonexistent email must be indistinguishable.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_share_one_generic_message(pool: PgPool) {
    let app = build_test_app(pool);
    register_user(app.clone(), "Alice", "alice@x.com", "s3cret-pass").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "email": "alice@x.com", "password": "wrong" }),
    )
    .await;
    let unknown_email = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": "ghost@x.com", "password": "whatever" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let first = body_json(wrong_password).await;
    let second = body_json(unknown_email).await;
    assert_eq!(first["message"], second["message"]);
    assert_eq!(first["message"], "Invalid credentials.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_requires_two_characters(pool: PgPool) {
    let app = build_test_app(pool);

    for uri in ["/api/auth/search", "/api/auth/search?q=a", "/api/auth/search?q=%20a%20"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "Search query must be at least 2 characters long."
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_substrings_in_any_field(pool: PgPool) {
    let app = build_test_app(pool.clone());
    register_user(app.clone(), "Alice", "alice@x.com", "pw-alice").await;
    register_user(app.clone(), "Albert", "al@y.com", "pw-albert").await;
    register_user(app.clone(), "Bob", "bob@z.com", "pw-bob").await;

    let response = get(app, "/api/auth/search?q=AL").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .expect("search returns an array")
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Albert", "Alice"]);
}
