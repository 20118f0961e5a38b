//! Wallet authentication service.
//!
//! Implements the nonce challenge flow: a wallet requests a challenge
//! message, signs it with EIP-191 personal_sign, and exchanges the
//! signature for a session cookie. Challenges are single-use and
//! short-lived; sessions are stateless HS256 tokens.

pub mod axum;

pub use self::axum::AuthenticatedUser;

use std::sync::Arc;

use alloy_core::primitives::{eip191_hash_message, Address};
use alloy_signer::{
    k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey},
    utils::public_key_to_address,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use crate::{
    api::validation::parse_eth_address,
    config::AuthConfig,
    constants::auth::{CHAIN_LABEL, NONCE_BYTE_LENGTH, NONCE_VALIDITY_LABEL, SESSION_ROLE},
    data::CredentialStore,
    error::Error,
    models::auth::{
        NonceChallenge, NonceResponse, ProfileResponse, ProfileUpdate, SessionClaims, User,
        VerifyResponse,
    },
};

const INVALID_SIGNATURE: &str = "Invalid signature";

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // jsonwebtoken grants 60s of exp leeway by default; sessions end
        // exactly at their expiry claim
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            store,
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issues a nonce challenge for the wallet.
    ///
    /// Any previous challenge for the same address is replaced, so only
    /// the most recently issued message can be verified.
    pub async fn challenge(&self, address: &str) -> Result<NonceResponse, Error> {
        let address = parse_eth_address(address)?;

        let nonce = generate_nonce();
        let issued_at = Utc::now();
        let message = challenge_message(&address, &nonce, issued_at);

        self.store
            .put_challenge(NonceChallenge {
                address,
                nonce,
                message: message.clone(),
                expires_at: issued_at
                    + chrono::Duration::seconds(self.config.nonce_ttl_secs as i64),
            })
            .await?;

        debug!(target: "auth_service", address = %address, "Issued nonce challenge");

        Ok(NonceResponse { message })
    }

    /// Verifies a signature over the pending challenge and opens a
    /// session.
    ///
    /// The nonce is consumed only after the signature checks out, so a
    /// failed attempt leaves the challenge claimable.
    pub async fn verify(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<(VerifyResponse, Cookie<'static>), Error> {
        let address = parse_eth_address(address)?;

        let challenge = self
            .store
            .get_challenge(&address)
            .await?
            .ok_or(Error::NonceNotFound)?;

        if challenge.expires_at <= Utc::now() {
            debug!(target: "auth_service", address = %address, "Challenge expired");
            return Err(Error::NonceExpired);
        }

        let recovered = recover_address(&challenge.message, signature).map_err(|err| {
            warn!(target: "auth_service", address = %address, "Signature could not be recovered");
            err.with_detail(
                self.config.debug_errors,
                format!("signature {signature:?} is not a recoverable 65-byte secp256k1 signature"),
            )
        })?;

        if recovered != address {
            warn!(target: "auth_service", address = %address, recovered = %recovered, "Signature verification failed");
            return Err(Error::Unauthorized(INVALID_SIGNATURE.to_string()).with_detail(
                self.config.debug_errors,
                format!(
                    "recovered {recovered} over message {:?}, expected {address}",
                    challenge.message
                ),
            ));
        }

        if self
            .store
            .claim_challenge(&address, &challenge.nonce)
            .await?
            .is_none()
        {
            // Raced with a concurrent verification of the same nonce
            return Err(Error::NonceNotFound);
        }

        let (user, is_new) = self.store.ensure_user(&address).await?;
        info!(target: "auth_service", address = %address, user_id = %user.id, is_new, "Wallet authenticated");

        let token = self.issue_session(&user)?;
        let cookie = self.session_cookie(token);

        Ok((VerifyResponse { user, is_new }, cookie))
    }

    /// Applies a partial profile update for the session wallet
    pub async fn update_profile(
        &self,
        address: &Address,
        changes: ProfileUpdate,
    ) -> Result<ProfileResponse, Error> {
        let user = self
            .store
            .update_profile(address, changes)
            .await?
            .ok_or_else(|| Error::Unauthorized("Session is no longer valid".to_string()))?;

        debug!(target: "auth_service", address = %address, "Profile updated");

        Ok(ProfileResponse { user })
    }

    /// Creates a signed session token for the user
    pub fn issue_session(&self, user: &User) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.address,
            uid: user.id,
            role: SESSION_ROLE.to_string(),
            iat: now,
            exp: now + self.config.session_ttl_secs as i64,
        };

        self.encode_session(claims)
    }

    pub fn encode_session(&self, claims: SessionClaims) -> Result<String, Error> {
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|err| {
            error!(target: "auth_service", error = %err, "Failed to encode session token");
            Error::Internal
        })
    }

    /// Validates a session token, returning its claims.
    ///
    /// Expired, malformed and wrongly-signed tokens all collapse to
    /// `None`; callers treat that as "no identity".
    pub fn authenticate(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                debug!(target: "auth_service", error = %err, "Rejected session token");
                None
            }
        }
    }

    /// Builds the session cookie carrying `token`
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), token))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(self.config.session_ttl_secs as i64))
            .build()
    }

    /// Builds an immediately-expiring cookie that clears the session
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), ""))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }
}

fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTE_LENGTH];
    rand::thread_rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

fn challenge_message(address: &Address, nonce: &str, issued_at: DateTime<Utc>) -> String {
    format!(
        "Welcome to Vibent!\n\n\
         Sign this message to verify you own this wallet and log in.\n\n\
         Address: {address}\n\
         Chain: {CHAIN_LABEL}\n\
         Nonce: {nonce}\n\
         Issued At: {}\n\
         Valid For: {NONCE_VALIDITY_LABEL}",
        issued_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Recovers the signer address from an EIP-191 personal_sign signature
/// over `message`
pub(crate) fn recover_address(message: &str, signature: &str) -> Result<Address, Error> {
    let invalid = || Error::Unauthorized(INVALID_SIGNATURE.to_string());

    let raw = hex::decode(signature.trim_start_matches("0x")).map_err(|_| invalid())?;
    if raw.len() != 65 {
        return Err(invalid());
    }

    // Wallets encode the recovery id as 27/28 per the Ethereum
    // convention; some emit 0/1 directly
    let v = raw[64];
    let recovery_id = RecoveryId::from_byte(if v >= 27 { v - 27 } else { v }).ok_or_else(invalid)?;
    let sig = EcdsaSignature::from_slice(&raw[..64]).map_err(|_| invalid())?;

    let digest = eip191_hash_message(message.as_bytes());
    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
        .map_err(|_| invalid())?;

    Ok(public_key_to_address(&verifying_key))
}
