//! Parking lot, health, OpenAPI, token refresh and rate limit tests.

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use parking_management_api::api::routes::{AppState, create_api_router, create_app_state};
use parking_management_api::config::AppConfig;
use parking_management_api::models::Role;
use parking_management_api::storage::UserContext;
use serde_json::{Value, json};
use uuid::Uuid;

fn create_test_server(state: &AppState) -> TestServer {
    let router = create_api_router(state.clone()).with_state(state.clone());
    TestServer::new(router).unwrap()
}

fn user(role: Role) -> UserContext {
    UserContext {
        user_id: Uuid::new_v4(),
        email: "someone@pms.com".to_string(),
        role,
    }
}

fn bearer(state: &AppState, role: Role) -> HeaderValue {
    let token = state.jwt_service.issue_access_token(&user(role)).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

fn lot_body(name: &str, spaces: i32) -> Value {
    json!({
        "name": name,
        "location": "Nyarugenge",
        "totalSpaces": spaces,
        "chargingFeePerHour": 1.5
    })
}

#[tokio::test]
async fn test_health_check() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server.get("/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let doc: Value = response.json();
    assert!(doc["paths"]["/car-entry/{id}/exit"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_admin_creates_lot() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server
        .post("/parking")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::Admin))
        .json(&lot_body("Downtown", 25))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let lot = response.json::<Value>()["data"].clone();
    assert_eq!(lot["totalSpaces"], 25);
    assert_eq!(lot["availableSpaces"], 25);

    let listed = server
        .get("/parking")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::User))
        .await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    assert_eq!(listed.json::<Value>()["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_only_admin_creates_lots() {
    let state = create_app_state();
    let server = create_test_server(&state);

    for role in [Role::ParkingAttendant, Role::User] {
        let response = server
            .post("/parking")
            .add_header(header::AUTHORIZATION, bearer(&state, role))
            .json(&lot_body("Downtown", 25))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_invalid_lot_and_duplicate_name() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let negative = server
        .post("/parking")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::Admin))
        .json(&lot_body("Downtown", -3))
        .await;
    assert_eq!(negative.status_code(), StatusCode::BAD_REQUEST);

    let first = server
        .post("/parking")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::Admin))
        .json(&lot_body("Downtown", 3))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let duplicate = server
        .post("/parking")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::Admin))
        .json(&lot_body("Downtown", 5))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_lot_is_not_found() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server
        .get(&format!("/parking/{}", Uuid::new_v4()))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::User))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_from_another_secret_is_rejected() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let other = AppState::new(AppConfig {
        jwt_secret: "a-completely-different-secret-value-123".to_string(),
        ..AppConfig::development()
    });

    let response = server
        .get("/parking")
        .add_header(header::AUTHORIZATION, bearer(&other, Role::Admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_exchange() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let pair = state
        .jwt_service
        .generate_token_pair(&user(Role::ParkingAttendant))
        .unwrap();

    let response = server
        .post("/auth/refresh")
        .json(&json!({ "refreshToken": pair.refresh_token }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let access = response.json::<Value>()["data"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let listed = server
        .get("/car-entry")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", access)).unwrap(),
        )
        .await;
    assert_eq!(listed.status_code(), StatusCode::OK);

    let rejected = server
        .post("/auth/refresh")
        .json(&json!({ "refreshToken": pair.access_token }))
        .await;
    assert_eq!(rejected.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rate_limit_returns_too_many_requests() {
    let state = AppState::new(AppConfig {
        rate_limit_per_minute: 2,
        ..AppConfig::development()
    });
    let server = create_test_server(&state);

    assert_eq!(server.get("/health").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/health").await.status_code(), StatusCode::OK);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.json::<Value>()["status"], 429);
}
