mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, setup_test_app, token_for};
use http_body_util::BodyExt;
use proffinder::modules::users::model::Role;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": "Jane Doe",
                "email": email,
                "password": "password123",
                "role": "student"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "student");
    assert!(body.get("id").is_some());
    // The stored hash must never appear in a response body.
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let register = |role: &str| {
        json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": "Jane Doe",
                "email": email,
                "password": "password123",
                "role": role
            }),
        )
    };

    let first = app.clone().oneshot(register("student")).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.clone().oneshot(register("teacher")).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(second).await["message"],
        "Email already registered"
    );

    // The first registration is intact and can still log in.
    let login = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_admin_role_rejected(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": "Root",
                "email": generate_unique_email(),
                "password": "password123",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_invalid_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": "Jane Doe",
                "email": "not-an-email",
                "password": "password123",
                "role": "student"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_name(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": generate_unique_email(),
                "password": "password123",
                "role": "student"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, "Test User", &email, "testpass123", Role::Student).await;

    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "testpass123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, "Test User", &email, "rightpass", Role::Student).await;

    let app = setup_test_app(pool);

    let unknown_email = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": generate_unique_email(), "password": "rightpass" }),
        ))
        .await
        .unwrap();

    let wrong_password = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "wrongpass" }),
        ))
        .await
        .unwrap();

    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);

    // Same body for both causes so the API does not reveal which emails exist.
    assert_eq!(
        json_body(unknown_email).await,
        json_body(wrong_password).await
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_requires_token(pool: PgPool) {
    let target = create_test_user(
        &pool,
        "Test User",
        &generate_unique_email(),
        "pw",
        Role::Student,
    )
    .await;

    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/auth/delete/{}", target.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_forbidden_for_non_admins(pool: PgPool) {
    let target = create_test_user(
        &pool,
        "Test User",
        &generate_unique_email(),
        "pw",
        Role::Student,
    )
    .await;
    let student = create_test_user(
        &pool,
        "Test User",
        &generate_unique_email(),
        "pw",
        Role::Student,
    )
    .await;
    let teacher = create_test_user(
        &pool,
        "Test User",
        &generate_unique_email(),
        "pw",
        Role::Teacher,
    )
    .await;

    let app = setup_test_app(pool);

    for caller in [&student, &teacher] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/auth/delete/{}", target.id))
                    .header("authorization", format!("Bearer {}", token_for(caller)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_as_admin(pool: PgPool) {
    let target = create_test_user(
        &pool,
        "Test User",
        &generate_unique_email(),
        "pw",
        Role::Teacher,
    )
    .await;
    let admin = proffinder::cli::create_admin(&pool, "Root", &generate_unique_email(), "adminpw")
        .await
        .unwrap();
    let admin = common::TestUser {
        id: admin.id,
        email: admin.email,
        password: "adminpw".to_string(),
        role: Role::Admin,
    };

    let app = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/auth/delete/{}", target.id))
                .header("authorization", format!("Bearer {}", token_for(&admin)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["email"], target.email);

    // The account is gone; its credentials no longer work.
    let login = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": target.email, "password": target.password }),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unknown_user_as_admin(pool: PgPool) {
    let admin = proffinder::cli::create_admin(&pool, "Root", &generate_unique_email(), "adminpw")
        .await
        .unwrap();
    let admin = common::TestUser {
        id: admin.id,
        email: admin.email,
        password: "adminpw".to_string(),
        role: Role::Admin,
    };

    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/auth/delete/{}", uuid::Uuid::new_v4()))
                .header("authorization", format!("Bearer {}", token_for(&admin)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_of_deleted_user_is_rejected(pool: PgPool) {
    let student = create_test_user(
        &pool,
        "Test User",
        &generate_unique_email(),
        "pw",
        Role::Student,
    )
    .await;
    let token = token_for(&student);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(student.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);

    // The token is still validly signed, but its subject no longer exists.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/teachers")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
