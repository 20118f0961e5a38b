//! API module for the Vibent backend

pub mod handlers;
pub mod routes;
pub mod validation;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    Router,
};
use tower_http::cors::CorsLayer;

use crate::services::Services;

/// Creates the axum application with all routes and middleware
pub fn create_app(services: Services) -> Router {
    let router = routes::routes(services);

    // Add CORS layer for permissive access
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(false);

    router.layer(cors)
}

/// Creates services backed by a fresh in-memory store, configured for
/// tests
#[cfg(test)]
pub(crate) fn test_services() -> Services {
    use std::sync::Arc;

    use crate::config::Config;
    use crate::constants::test::TEST_JWT_SECRET;
    use crate::data::MemoryStore;

    let mut config = Config::default();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    Services::new(Arc::new(MemoryStore::new()), &config)
}

/// Creates a test application with in-memory services
#[cfg(test)]
pub(crate) fn test_app() -> Router {
    create_app(test_services())
}
