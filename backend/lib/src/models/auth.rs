use alloy_core::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body (or query string) of a nonce request
#[derive(Debug, Serialize, Deserialize)]
pub struct NonceRequest {
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NonceResponse {
    /// Full challenge message the wallet must sign
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub address: Option<String>,
    pub signature: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: User,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// A wallet-keyed user identity with its optional profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(address: Address) -> Self {
        Self {
            id: Uuid::now_v7(),
            address,
            name: None,
            username: None,
            profile_picker: None,
            bio: None,
            dob: None,
            binance_id: None,
            social_links: None,
            interests: None,
            created_at: Utc::now(),
        }
    }

    /// Applies a profile update. Absent fields are left unchanged.
    pub fn apply(&mut self, changes: ProfileUpdate) {
        if let Some(name) = changes.name {
            self.name = Some(name);
        }
        if let Some(username) = changes.username {
            self.username = Some(username);
        }
        if let Some(profile_picker) = changes.profile_picker {
            self.profile_picker = Some(profile_picker);
        }
        if let Some(bio) = changes.bio {
            self.bio = Some(bio);
        }
        if let Some(dob) = changes.dob {
            self.dob = Some(dob);
        }
        if let Some(binance_id) = changes.binance_id {
            self.binance_id = Some(binance_id);
        }
        if let Some(social_links) = changes.social_links {
            self.social_links = Some(social_links);
        }
        if let Some(interests) = changes.interests {
            self.interests = Some(interests);
        }
    }
}

/// Partial profile update; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_picker: Option<String>,
    pub bio: Option<String>,
    pub dob: Option<String>,
    pub binance_id: Option<String>,
    pub social_links: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

/// A pending nonce challenge awaiting signature verification
#[derive(Debug, Clone)]
pub struct NonceChallenge {
    pub address: Address,
    pub nonce: String,
    /// Exact message issued to the wallet; verification recovers the
    /// signer against these bytes
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Wallet address the session belongs to
    pub sub: Address,
    /// User record id
    pub uid: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}
