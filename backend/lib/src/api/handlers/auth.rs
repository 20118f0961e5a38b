use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::debug;

use super::invalid_json;
use crate::{
    api::validation,
    error::Error,
    models::auth::{NonceRequest, ProfileUpdate, VerifyRequest},
    services::{auth::AuthenticatedUser, Services},
};

pub async fn nonce(
    State(services): State<Services>,
    payload: Result<Json<NonceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(payload) = payload.map_err(invalid_json)?;
    let address = validation::require(payload.address.as_deref(), "address")?;
    debug!(address = %address, "POST nonce");

    let response = services.auth.challenge(address).await?;
    Ok(Json(response))
}

pub async fn nonce_query(
    State(services): State<Services>,
    Query(query): Query<NonceRequest>,
) -> Result<impl IntoResponse, Error> {
    let address = validation::require(query.address.as_deref(), "address")?;
    debug!(address = %address, "GET nonce");

    let response = services.auth.challenge(address).await?;
    Ok(Json(response))
}

pub async fn verify(
    State(services): State<Services>,
    jar: CookieJar,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST verify");
    let Json(payload) = payload.map_err(invalid_json)?;
    let address = validation::require(payload.address.as_deref(), "address")?;
    let signature = validation::require(payload.signature.as_deref(), "signature")?;

    let (response, cookie) = services.auth.verify(address, signature).await?;
    Ok((jar.add(cookie), Json(response)))
}

pub async fn update_profile(
    State(services): State<Services>,
    AuthenticatedUser { address, .. }: AuthenticatedUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %address, "POST profile");
    let Json(changes) = payload.map_err(invalid_json)?;

    let response = services.auth.update_profile(&address, changes).await?;
    Ok(Json(response))
}

pub async fn logout(State(services): State<Services>, jar: CookieJar) -> impl IntoResponse {
    debug!("POST logout");
    (
        jar.add(services.auth.clear_session_cookie()),
        Json(json!({ "ok": true })),
    )
}
