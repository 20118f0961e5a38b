//! Credential store abstraction for the Vibent backend.
//!
//! Defines the persistence interface behind the authentication and
//! organization services, plus the in-memory implementation that ships
//! with the service.
//!
//! ## Key Components
//! - [`CredentialStore`] - Trait defining all persistence operations
//! - [`StoreError`] - Error types for store operations
//! - [`MemoryStore`] - In-memory implementation
//!
//! A database-backed implementation only needs to implement
//! [`CredentialStore`]; the services are written against the trait.

use alloy_core::primitives::Address;
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryStore;

use crate::models::auth::{NonceChallenge, ProfileUpdate, User};
use crate::models::orgs::{Membership, Organization};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An organization with the same domain already exists
    #[error("duplicate organization domain: {0}")]
    DuplicateDomain(String),

    /// A multi-row write completed partially. Indicates a store
    /// implementation that failed to uphold atomicity.
    #[error("partial write: {0}")]
    PartialFailure(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ============ Input Types for Creating Records ============

/// Input type for creating an organization together with its owner
/// membership
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub domain: String,
    pub description: Option<String>,
    pub owner: Address,
    pub owner_role: String,
}

// ============ Store Trait ============

/// Persistence operations required by the authentication and
/// organization services.
///
/// ## Implementation Notes
/// - Challenges are keyed by wallet address; storing a new challenge
///   for an address replaces any previous one
/// - `claim_challenge` must atomically compare the nonce and remove the
///   row, so a challenge can never be consumed twice
/// - `create_organization` must write the organization and the owner
///   membership as one atomic unit, or fail with
///   [`StoreError::PartialFailure`]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Cheap liveness probe for the health endpoint
    async fn health_check(&self) -> StoreResult<()>;

    // ============ Nonce Challenges ============

    /// Store a challenge, replacing any existing challenge for the
    /// same address
    async fn put_challenge(&self, challenge: NonceChallenge) -> StoreResult<()>;

    /// Fetch the pending challenge for an address, expired or not
    async fn get_challenge(&self, address: &Address) -> StoreResult<Option<NonceChallenge>>;

    /// Atomically remove and return the challenge for `address` if its
    /// nonce matches.
    ///
    /// Returns `None` when there is no challenge or the nonce differs,
    /// in which case nothing is removed.
    async fn claim_challenge(
        &self,
        address: &Address,
        nonce: &str,
    ) -> StoreResult<Option<NonceChallenge>>;

    // ============ Users ============

    /// Fetch the user for `address`, creating a fresh record if none
    /// exists. The boolean is true when the record was just created.
    async fn ensure_user(&self, address: &Address) -> StoreResult<(User, bool)>;

    /// Apply a partial profile update, returning the updated record.
    /// Returns `None` if no user exists for `address`.
    async fn update_profile(
        &self,
        address: &Address,
        changes: ProfileUpdate,
    ) -> StoreResult<Option<User>>;

    // ============ Organizations ============

    /// Create an organization and its owner membership atomically.
    ///
    /// Fails with [`StoreError::DuplicateDomain`] when another
    /// organization already uses the domain (case-insensitive).
    async fn create_organization(
        &self,
        new_org: NewOrganization,
    ) -> StoreResult<(Organization, Membership)>;

    /// All memberships for a wallet, joined with their organizations,
    /// ordered by membership creation time (earliest first)
    async fn memberships_for(
        &self,
        address: &Address,
    ) -> StoreResult<Vec<(Membership, Organization)>>;
}
