//! CORS middleware configuration.

use tower_http::cors::CorsLayer;

/// Permissive CORS in development; production only allows the methods the API serves.
pub fn create_cors_layer(is_development: bool) -> CorsLayer {
    use axum::http::{Method, header};
    use tower_http::cors::Any;

    if is_development {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
