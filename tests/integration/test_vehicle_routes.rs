//! Vehicle endpoint tests:
//! - POST /vehicle
//! - GET /vehicle
//! - PUT /vehicle/{id}
//! - DELETE /vehicle/{id}

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use parking_management_api::api::routes::{AppState, create_api_router, create_app_state};
use parking_management_api::models::Role;
use parking_management_api::storage::UserContext;
use serde_json::{Value, json};
use uuid::Uuid;

fn create_test_server(state: &AppState) -> TestServer {
    let router = create_api_router(state.clone()).with_state(state.clone());
    TestServer::new(router).unwrap()
}

/// Bearer header for a fresh user with the USER role
fn new_owner(state: &AppState) -> HeaderValue {
    let user = UserContext {
        user_id: Uuid::new_v4(),
        email: "driver@pms.com".to_string(),
        role: Role::User,
    };
    let token = state.jwt_service.issue_access_token(&user).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn create_vehicle(server: &TestServer, owner: &HeaderValue, plate: &str) -> Value {
    let response = server
        .post("/vehicle")
        .add_header(header::AUTHORIZATION, owner.clone())
        .json(&json!({ "plateNumber": plate, "type": "CAR" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

#[tokio::test]
async fn test_create_and_list_own_vehicles() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let owner = new_owner(&state);

    let vehicle = create_vehicle(&server, &owner, "RAB-123").await;
    assert_eq!(vehicle["plateNumber"], "RAB-123");
    assert_eq!(vehicle["type"], "CAR");

    let response = server
        .get("/vehicle")
        .add_header(header::AUTHORIZATION, owner)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_vehicles_are_isolated_by_owner() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let owner = new_owner(&state);
    let stranger = new_owner(&state);
    let vehicle = create_vehicle(&server, &owner, "RAB-123").await;
    let id = vehicle["id"].as_str().unwrap();

    let listed = server
        .get("/vehicle")
        .add_header(header::AUTHORIZATION, stranger.clone())
        .await
        .json::<Value>();
    assert!(listed["data"].as_array().unwrap().is_empty());

    let update = server
        .put(&format!("/vehicle/{}", id))
        .add_header(header::AUTHORIZATION, stranger.clone())
        .json(&json!({ "type": "BUS" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = server
        .delete(&format!("/vehicle/{}", id))
        .add_header(header::AUTHORIZATION, stranger)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_plate_is_rejected() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let owner = new_owner(&state);
    create_vehicle(&server, &owner, "RAB-123").await;

    let response = server
        .post("/vehicle")
        .add_header(header::AUTHORIZATION, new_owner(&state))
        .json(&json!({ "plateNumber": "RAB-123", "type": "TRUCK" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Vehicle with this plate number already exists"
    );
}

#[tokio::test]
async fn test_partial_update_and_delete() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let owner = new_owner(&state);
    let vehicle = create_vehicle(&server, &owner, "RAB-123").await;
    let path = format!("/vehicle/{}", vehicle["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .add_header(header::AUTHORIZATION, owner.clone())
        .json(&json!({ "type": "ELECTRIC" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated = response.json::<Value>()["data"].clone();
    assert_eq!(updated["plateNumber"], "RAB-123");
    assert_eq!(updated["type"], "ELECTRIC");

    let response = server
        .delete(&path)
        .add_header(header::AUTHORIZATION, owner.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let listed = server
        .get("/vehicle")
        .add_header(header::AUTHORIZATION, owner)
        .await
        .json::<Value>();
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_vehicle_input() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let owner = new_owner(&state);

    let bad_plate = server
        .post("/vehicle")
        .add_header(header::AUTHORIZATION, owner.clone())
        .json(&json!({ "plateNumber": "x", "type": "CAR" }))
        .await;
    assert_eq!(bad_plate.status_code(), StatusCode::BAD_REQUEST);

    let bad_type = server
        .post("/vehicle")
        .add_header(header::AUTHORIZATION, owner)
        .json(&json!({ "plateNumber": "RAB-123", "type": "SPACESHIP" }))
        .await;
    assert_eq!(bad_type.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_type.json::<Value>()["success"], false);
}
