//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        crate::routes::health::health_check,
        // Car entries
        crate::routes::car_entries::create_car_entry,
        crate::routes::car_entries::list_car_entries,
        crate::routes::car_entries::record_car_exit,
        crate::routes::car_entries::get_ticket,
        crate::routes::car_entries::get_bill,
        // Vehicles
        crate::routes::vehicles::create_vehicle,
        crate::routes::vehicles::list_my_vehicles,
        crate::routes::vehicles::update_vehicle,
        crate::routes::vehicles::delete_vehicle,
        // Parking
        crate::routes::parking::create_parking_lot,
        crate::routes::parking::list_parking_lots,
        crate::routes::parking::get_parking_lot,
        // Authentication
        crate::routes::auth::refresh_token,
        // OpenAPI
        crate::routes::openapi::serve_openapi_json,
    ),
    components(schemas(
        crate::models::CarEntry,
        crate::models::CarEntryView,
        crate::models::CarEntryStatus,
        crate::models::Ticket,
        crate::models::Bill,
        crate::models::ParkingLot,
        crate::models::Vehicle,
        crate::models::VehicleType,
        crate::models::Role,
        crate::services::CreateCarEntryRequest,
        crate::services::RecordExitRequest,
        crate::services::RegisteredEntry,
        crate::services::SettledEntry,
        crate::services::CreateVehicleRequest,
        crate::services::UpdateVehicleRequest,
        crate::services::CreateParkingLotRequest,
        crate::services::TokenPair,
        crate::routes::auth::RefreshTokenRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Car Entries", description = "Entry registration, exits, tickets and bills"),
        (name = "Vehicles", description = "Caller-owned vehicle registry"),
        (name = "Parking", description = "Parking lots and availability"),
        (name = "Authentication", description = "Token renewal"),
        (name = "OpenAPI", description = "OpenAPI specification"),
    ),
    info(
        title = "Parking Management API",
        description = "REST API for vehicles, car entries, tickets and bills",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8081/api/v1", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

        openapi.info.version = env!("CARGO_PKG_VERSION").to_string();

        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::new);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
