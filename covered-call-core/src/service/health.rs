use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::DashboardApi;

/// Health and status checks run on page load. Outcomes go to the log only.
pub struct HealthReporter {
    api: Arc<dyn DashboardApi>,
}

impl HealthReporter {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    /// Ping the health endpoint. Returns whether the backend reported healthy.
    pub async fn check_api_health(&self) -> bool {
        match self.api.health().await {
            Ok(health) if health.is_healthy() => {
                info!("API Health Check: ✅ {}", health.message);
                true
            }
            Ok(health) => {
                warn!("API Health Check: status '{}' {}", health.status, health.message);
                false
            }
            Err(e) => {
                error!("API Health Check: ❌ {}", e);
                false
            }
        }
    }

    /// Fetch the app status document; `None` on any failure.
    pub async fn get_app_status(&self) -> Option<serde_json::Value> {
        match self.api.status().await {
            Ok(status) => Some(status),
            Err(e) => {
                error!("Error fetching app status: {}", e);
                None
            }
        }
    }
}
