use std::sync::Arc;

use serde::Serialize;

use crate::constants::server::SERVICE_NAME;
use crate::data::CredentialStore;

#[derive(Serialize)]
pub struct DetailedHealthStatus {
    pub status: String,
    pub version: String,
    pub service: String,
    pub components: HealthComponents,
}

#[derive(Serialize)]
pub struct HealthComponents {
    pub store: ComponentHealth,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct HealthService {
    store: Arc<dyn CredentialStore>,
}

impl HealthService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn check_health(&self) -> DetailedHealthStatus {
        let store_health = self.check_store().await;

        let overall_status = if store_health.status == "healthy" {
            "healthy"
        } else {
            "unhealthy"
        };

        DetailedHealthStatus {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: SERVICE_NAME.to_string(),
            components: HealthComponents {
                store: store_health,
            },
        }
    }

    async fn check_store(&self) -> ComponentHealth {
        match self.store.health_check().await {
            Ok(()) => ComponentHealth {
                status: "healthy".to_string(),
                message: None,
            },
            Err(e) => ComponentHealth {
                status: "unhealthy".to_string(),
                message: Some(format!("Store error: {}", e)),
            },
        }
    }
}
