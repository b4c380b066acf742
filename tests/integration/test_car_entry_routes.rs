//! Car-entry endpoint tests:
//! - POST /car-entry
//! - GET /car-entry
//! - PUT /car-entry/{id}/exit
//! - GET /car-entry/{id}/ticket
//! - GET /car-entry/{id}/bill

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use parking_management_api::api::routes::{AppState, create_api_router, create_app_state};
use parking_management_api::models::Role;
use parking_management_api::storage::UserContext;
use serde_json::{Value, json};
use uuid::Uuid;

fn create_test_server(state: &AppState) -> TestServer {
    let router = create_api_router(state.clone()).with_state(state.clone());
    TestServer::new(router).unwrap()
}

fn bearer(state: &AppState, role: Role) -> HeaderValue {
    let user = UserContext {
        user_id: Uuid::new_v4(),
        email: format!("{:?}@pms.com", role).to_lowercase(),
        role,
    };
    let token = state.jwt_service.issue_access_token(&user).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn create_lot(server: &TestServer, state: &AppState, spaces: i32, fee: f64) -> String {
    let response = server
        .post("/parking")
        .add_header(header::AUTHORIZATION, bearer(state, Role::Admin))
        .json(&json!({
            "name": format!("Lot {}", Uuid::new_v4()),
            "location": "Kigali",
            "totalSpaces": spaces,
            "chargingFeePerHour": fee
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn register(server: &TestServer, state: &AppState, plate: &str, lot_id: &str) -> Value {
    let response = server
        .post("/car-entry")
        .add_header(header::AUTHORIZATION, bearer(state, Role::ParkingAttendant))
        .json(&json!({ "plateNumber": plate, "parkingCode": lot_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server.get("/car-entry").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_plain_user_is_forbidden() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 3, 2.0).await;

    let response = server
        .post("/car-entry")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::User))
        .json(&json!({ "plateNumber": "ABC-123", "parkingCode": lot_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_entry_exit_and_bill() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 1, 2.0).await;

    let body = register(&server, &state, "ABC-123", &lot_id).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["carEntry"]["plateNumber"], "ABC-123");
    assert_eq!(body["data"]["carEntry"]["chargedAmount"], 0.0);
    assert!(body["data"]["carEntry"]["exitDateTime"].is_null());
    assert_eq!(body["data"]["ticket"]["chargingFeePerHour"], 2.0);

    let entry_id = body["data"]["carEntry"]["id"].as_str().unwrap().to_string();
    let entry_time: DateTime<Utc> =
        serde_json::from_value(body["data"]["carEntry"]["entryDateTime"].clone()).unwrap();

    let lot = server
        .get(&format!("/parking/{}", lot_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::User))
        .await
        .json::<Value>();
    assert_eq!(lot["data"]["availableSpaces"], 0);

    let response = server
        .put(&format!("/car-entry/{}/exit", entry_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .json(&json!({ "exitDateTime": (entry_time + Duration::hours(2)).to_rfc3339() }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let charged = body["data"]["carEntry"]["chargedAmount"].as_f64().unwrap();
    assert!((charged - 4.0).abs() < 1e-9);

    let bill = server
        .get(&format!("/car-entry/{}/bill", entry_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::Admin))
        .await;
    assert_eq!(bill.status_code(), StatusCode::OK);
    let bill: Value = bill.json();
    assert!((bill["data"]["durationHours"].as_f64().unwrap() - 2.0).abs() < 1e-9);

    let lot = server
        .get(&format!("/parking/{}", lot_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::User))
        .await
        .json::<Value>();
    assert_eq!(lot["data"]["availableSpaces"], 1);
}

#[tokio::test]
async fn test_exit_with_empty_body_uses_now() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 2, 1.0).await;
    let body = register(&server, &state, "RAB-123", &lot_id).await;
    let entry_id = body["data"]["carEntry"]["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/car-entry/{}/exit", entry_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"]["carEntry"]["exitDateTime"].is_string());
    assert!(body["data"]["bill"]["chargedAmount"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_second_exit_is_rejected() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 2, 1.0).await;
    let body = register(&server, &state, "RAB-123", &lot_id).await;
    let entry_id = body["data"]["carEntry"]["id"].as_str().unwrap().to_string();
    let path = format!("/car-entry/{}/exit", entry_id);

    let first = server
        .put(&path)
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .json(&json!({}))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = server
        .put(&path)
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .json(&json!({}))
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(second.json::<Value>()["message"], "Car has already exited");
}

#[tokio::test]
async fn test_lowercase_plate_is_rejected() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 2, 1.0).await;

    let response = server
        .post("/car-entry")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .json(&json!({ "plateNumber": "ab-12", "parkingCode": lot_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = response.json::<Value>()["message"].as_str().unwrap().to_string();
    assert!(message.contains("uppercase"));
}

#[tokio::test]
async fn test_full_lot_is_rejected() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 1, 1.0).await;
    register(&server, &state, "AAA-111", &lot_id).await;

    let response = server
        .post("/car-entry")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .json(&json!({ "plateNumber": "BBB-222", "parkingCode": lot_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "No available spaces in the parking lot"
    );
}

#[tokio::test]
async fn test_unknown_entry_is_not_found() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server
        .put(&format!("/car-entry/{}/exit", Uuid::new_v4()))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_entry_id_is_bad_request() {
    let state = create_app_state();
    let server = create_test_server(&state);

    let response = server
        .get("/car-entry/not-a-uuid/ticket")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], false);
}

#[tokio::test]
async fn test_ticket_and_listing() {
    let state = create_app_state();
    let server = create_test_server(&state);
    let lot_id = create_lot(&server, &state, 4, 1.5).await;
    let body = register(&server, &state, "RAD-777", &lot_id).await;
    let entry_id = body["data"]["carEntry"]["id"].as_str().unwrap().to_string();

    let ticket = server
        .get(&format!("/car-entry/{}/ticket", entry_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .await;
    assert_eq!(ticket.status_code(), StatusCode::OK);
    assert_eq!(ticket.json::<Value>()["data"]["plateNumber"], "RAD-777");

    let bill = server
        .get(&format!("/car-entry/{}/bill", entry_id))
        .add_header(header::AUTHORIZATION, bearer(&state, Role::ParkingAttendant))
        .await;
    assert_eq!(bill.status_code(), StatusCode::BAD_REQUEST);

    let list = server
        .get("/car-entry")
        .add_header(header::AUTHORIZATION, bearer(&state, Role::Admin))
        .await;
    assert_eq!(list.status_code(), StatusCode::OK);
    let list: Value = list.json();
    let entries = list["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "ACTIVE");
    assert_eq!(entries[0]["chargedAmountDisplay"], "0.00");
    assert!(entries[0]["parkingName"].as_str().unwrap().starts_with("Lot "));
}
