//! In-memory credential store.
//!
//! Backs the service with plain maps behind async locks. This is the
//! implementation wired up by the binary; it also keeps unit tests free
//! of external dependencies.

use std::collections::HashMap;

use alloy_core::primitives::Address;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, NewOrganization, StoreError, StoreResult};
use crate::models::auth::{NonceChallenge, ProfileUpdate, User};
use crate::models::orgs::{Membership, Organization};

/// In-memory [`CredentialStore`] implementation.
///
/// Lock order is fixed: `orgs` before `memberships`. Every method that
/// touches both tables must take them in that order.
pub struct MemoryStore {
    challenges: RwLock<HashMap<Address, NonceChallenge>>,
    users: RwLock<HashMap<Address, User>>,
    orgs: RwLock<HashMap<Uuid, Organization>>,
    memberships: RwLock<Vec<Membership>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            challenges: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            orgs: RwLock::new(HashMap::new()),
            memberships: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    // ============ Nonce Challenges ============

    async fn put_challenge(&self, challenge: NonceChallenge) -> StoreResult<()> {
        let mut challenges = self.challenges.write().await;
        challenges.insert(challenge.address, challenge);
        Ok(())
    }

    async fn get_challenge(&self, address: &Address) -> StoreResult<Option<NonceChallenge>> {
        let challenges = self.challenges.read().await;
        Ok(challenges.get(address).cloned())
    }

    async fn claim_challenge(
        &self,
        address: &Address,
        nonce: &str,
    ) -> StoreResult<Option<NonceChallenge>> {
        let mut challenges = self.challenges.write().await;
        match challenges.get(address) {
            Some(challenge) if challenge.nonce == nonce => Ok(challenges.remove(address)),
            _ => Ok(None),
        }
    }

    // ============ Users ============

    async fn ensure_user(&self, address: &Address) -> StoreResult<(User, bool)> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get(address) {
            return Ok((user.clone(), false));
        }

        let user = User::new(*address);
        users.insert(*address, user.clone());
        Ok((user, true))
    }

    async fn update_profile(
        &self,
        address: &Address,
        changes: ProfileUpdate,
    ) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        match users.get_mut(address) {
            Some(user) => {
                user.apply(changes);
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    // ============ Organizations ============

    async fn create_organization(
        &self,
        new_org: NewOrganization,
    ) -> StoreResult<(Organization, Membership)> {
        let mut orgs = self.orgs.write().await;

        // Domains are stored lowercased, so this check is
        // case-insensitive against anything already inserted
        let domain = new_org.domain.to_lowercase();
        if orgs.values().any(|org| org.domain == domain) {
            return Err(StoreError::DuplicateDomain(domain));
        }

        let now = Utc::now();
        let organization = Organization {
            id: Uuid::now_v7(),
            name: new_org.name,
            domain,
            description: new_org.description,
            created_at: now,
        };
        let member = Membership {
            organization_id: organization.id,
            address: new_org.owner,
            role: new_org.owner_role,
            created_at: now,
        };

        // Both rows land while the orgs lock is held, so no other
        // writer can observe the organization without its membership
        let mut memberships = self.memberships.write().await;
        orgs.insert(organization.id, organization.clone());
        memberships.push(member.clone());

        Ok((organization, member))
    }

    async fn memberships_for(
        &self,
        address: &Address,
    ) -> StoreResult<Vec<(Membership, Organization)>> {
        let orgs = self.orgs.read().await;
        let memberships = self.memberships.read().await;

        let mut rows: Vec<(Membership, Organization)> = memberships
            .iter()
            .filter(|member| member.address == *address)
            .filter_map(|member| {
                orgs.get(&member.organization_id)
                    .map(|org| (member.clone(), org.clone()))
            })
            .collect();

        rows.sort_by(|a, b| {
            a.0.created_at
                .cmp(&b.0.created_at)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });

        Ok(rows)
    }
}
