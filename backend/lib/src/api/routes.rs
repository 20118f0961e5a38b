//! Route definitions for the Vibent API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::constants::api::{
    HEALTH_ENDPOINT, LOGOUT_ENDPOINT, NONCE_ENDPOINT, ORG_CHECK_ENDPOINT, ORG_REGISTER_ENDPOINT,
    PROFILE_ENDPOINT, VERIFY_ENDPOINT,
};
use crate::services::Services;

/// Creates the router with all API routes
pub fn routes(services: Services) -> Router {
    Router::new()
        // Health check endpoint
        .route(HEALTH_ENDPOINT, get(handlers::health))
        // Wallet authentication
        .route(
            NONCE_ENDPOINT,
            get(handlers::auth::nonce_query).post(handlers::auth::nonce),
        )
        .route(VERIFY_ENDPOINT, post(handlers::auth::verify))
        .route(PROFILE_ENDPOINT, post(handlers::auth::update_profile))
        .route(LOGOUT_ENDPOINT, post(handlers::auth::logout))
        // Organizations
        .route(ORG_CHECK_ENDPOINT, post(handlers::orgs::check_membership))
        .route(ORG_REGISTER_ENDPOINT, post(handlers::orgs::register))
        // Add state to all routes
        .with_state(services)
}
