//! Test utilities for wallet authentication
//!
//! Common helpers for generating wallets, producing personal_sign
//! signatures and running the login flow against a test server.

use alloy_core::primitives::{eip191_hash_message, Address};
use alloy_signer::{k256::ecdsa::SigningKey, utils::public_key_to_address};
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;

use crate::constants::{
    api::{NONCE_ENDPOINT, VERIFY_ENDPOINT},
    auth::DEFAULT_COOKIE_NAME,
};
use crate::models::auth::{NonceRequest, NonceResponse, VerifyRequest, VerifyResponse};

/// Generate a random ETH wallet
///
/// Returns the corresponding address and signing key
pub fn eth_wallet() -> (Address, SigningKey) {
    let signing_key = SigningKey::random(&mut rand::thread_rng());
    let verifying_key = signing_key.verifying_key();
    let address = public_key_to_address(verifying_key);

    (address, signing_key)
}

/// Sign a message using EIP-191 personal_sign format
pub fn sign_message(signing_key: &SigningKey, message: &str) -> String {
    let message_hash = eip191_hash_message(message.as_bytes());
    let (sig, recovery_id) = signing_key
        .sign_prehash_recoverable(&message_hash.0)
        .unwrap();

    let mut sig_bytes = [0u8; 65];
    sig_bytes[..64].copy_from_slice(&sig.to_bytes());
    sig_bytes[64] = recovery_id.to_byte();

    format!("0x{}", hex::encode(sig_bytes))
}

/// Runs the full nonce + verify flow against `server`, returning the
/// verify response together with the session cookie it set
pub async fn login(
    server: &TestServer,
    address: &Address,
    signing_key: &SigningKey,
) -> (VerifyResponse, Cookie<'static>) {
    let response = server
        .post(NONCE_ENDPOINT)
        .json(&NonceRequest {
            address: Some(address.to_string()),
        })
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let nonce_response: NonceResponse = response.json();

    let signature = sign_message(signing_key, &nonce_response.message);
    let response = server
        .post(VERIFY_ENDPOINT)
        .json(&VerifyRequest {
            address: Some(address.to_string()),
            signature: Some(signature),
        })
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie = response.cookie(DEFAULT_COOKIE_NAME);
    (response.json(), cookie)
}
