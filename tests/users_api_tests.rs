use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use bloglist::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // Minimum bcrypt cost keeps the suite fast
    config.security.bcrypt_cost = 4;

    let state = bloglist::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    bloglist::api::router(state).await
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_test_user(app: &Router) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "Test User", "username": "testuser", "password": "sekret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_creation_succeeds_with_fresh_username() {
    let app = spawn_app().await;
    create_test_user(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "New User", "username": "newuser", "password": "password123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["username"], "newuser");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let usernames: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames.len(), 2);
    assert!(usernames.contains(&"newuser"));
}

#[tokio::test]
async fn test_creation_fails_for_taken_username() {
    let app = spawn_app().await;
    create_test_user(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "Another User", "username": "testuser", "password": "password123"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "expected `username` to be unique");
}

#[tokio::test]
async fn test_creation_fails_without_password() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "No Password", "username": "nopassword"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "password is required to create the user");
}

#[tokio::test]
async fn test_creation_fails_with_short_password() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "Short Password", "username": "shortpass", "password": "12"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "password must be at least 3 characters");
}

#[tokio::test]
async fn test_creation_fails_without_username() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "No Username", "password": "12343"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("username is required to create the user")
    );
}

#[tokio::test]
async fn test_creation_fails_with_short_username() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &json!({"name": "Short Username", "username": "sa", "password": "12343"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("minimum length is 3 characters")
    );
}

#[tokio::test]
async fn test_list_users_returns_json_array() {
    let app = spawn_app().await;
    create_test_user(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.is_array());
    assert_eq!(body[0]["username"], "testuser");
    assert!(body[0]["blogs"].is_array());
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = spawn_app().await;
    create_test_user(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            &json!({"username": "testuser", "password": "sekret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "testuser");
    assert!(body["id"].is_number());
    assert!(body["token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = spawn_app().await;
    create_test_user(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            &json!({"username": "testuser", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_unknown_username() {
    let app = spawn_app().await;
    create_test_user(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            &json!({"username": "ghost", "password": "sekret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "user not found");
}

#[tokio::test]
async fn test_unknown_endpoint_returns_json_404() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nothing-here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unknown endpoint");
}
