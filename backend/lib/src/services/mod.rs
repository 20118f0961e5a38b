//! Services module for the Vibent backend

pub mod auth;
pub mod health;
pub mod orgs;

use std::sync::Arc;

use crate::config::Config;
use crate::data::CredentialStore;

#[derive(Clone)]
pub struct Services {
    pub auth: Arc<auth::AuthService>,
    pub orgs: Arc<orgs::OrgService>,
    pub health: Arc<health::HealthService>,
}

impl Services {
    pub fn new(store: Arc<dyn CredentialStore>, config: &Config) -> Self {
        let auth = Arc::new(auth::AuthService::new(store.clone(), config.auth.clone()));
        let orgs = Arc::new(orgs::OrgService::new(store.clone()));
        let health = Arc::new(health::HealthService::new(store));
        Self {
            auth,
            orgs,
            health,
        }
    }
}
