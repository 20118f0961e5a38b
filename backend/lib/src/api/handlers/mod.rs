use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::{error::Error, services::Services};

pub mod auth;
pub mod orgs;

pub async fn health(State(services): State<Services>) -> impl IntoResponse {
    Json(services.health.check_health().await)
}

/// Collapses every body deserialization failure to a single 400 so clients
/// see one error shape regardless of how the JSON was malformed.
fn invalid_json(_: JsonRejection) -> Error {
    Error::BadRequest("Invalid JSON body".to_string())
}
