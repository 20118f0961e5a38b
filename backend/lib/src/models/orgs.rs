use alloy_core::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercased; unique across all organizations
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Links a wallet to an organization with a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub organization_id: Uuid,
    pub address: Address,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Body of an organization registration request
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterOrgRequest {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterOrgResponse {
    pub organization: Organization,
    pub member: Membership,
}

/// Result of an organization membership lookup
#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
