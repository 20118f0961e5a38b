//! Organization access gateway.
//!
//! Lets authenticated wallets look up their organization membership and
//! register new organizations.

use std::sync::Arc;

use alloy_core::primitives::Address;
use tracing::{debug, info};

use crate::{
    constants::auth::ORG_OWNER_ROLE,
    data::{CredentialStore, NewOrganization},
    error::Error,
    models::orgs::{MembershipResponse, RegisterOrgResponse},
};

pub struct OrgService {
    store: Arc<dyn CredentialStore>,
}

impl OrgService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Reports whether the wallet belongs to any organization.
    ///
    /// A wallet with several memberships resolves to the earliest one.
    pub async fn check_membership(&self, address: &Address) -> Result<MembershipResponse, Error> {
        let rows = self.store.memberships_for(address).await?;
        debug!(target: "org_service", address = %address, memberships = rows.len(), "Checked membership");

        Ok(match rows.into_iter().next() {
            Some((member, organization)) => MembershipResponse {
                exists: true,
                organization: Some(organization),
                role: Some(member.role),
            },
            None => MembershipResponse {
                exists: false,
                organization: None,
                role: None,
            },
        })
    }

    /// Registers an organization owned by `address`
    pub async fn register(
        &self,
        address: &Address,
        name: &str,
        domain: &str,
        description: Option<String>,
    ) -> Result<RegisterOrgResponse, Error> {
        let (organization, member) = self
            .store
            .create_organization(NewOrganization {
                name: name.to_string(),
                domain: domain.to_string(),
                description,
                owner: *address,
                owner_role: ORG_OWNER_ROLE.to_string(),
            })
            .await?;

        info!(
            target: "org_service",
            address = %address,
            organization_id = %organization.id,
            domain = %organization.domain,
            "Organization registered"
        );

        Ok(RegisterOrgResponse {
            organization,
            member,
        })
    }
}
