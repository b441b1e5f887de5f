// libs/appointment-cell/src/services/revalidation.rs
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::AppointmentError;

/// Path of the admin dashboard refreshed after every appointment update.
pub const ADMIN_PATH: &str = "/admin";

/// Tells the front-end that cached pages under `path` are stale.
#[async_trait]
pub trait PageRevalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str) -> Result<(), AppointmentError>;
}

/// Posts `{"path": ...}` to the front-end's revalidation hook.
pub struct HttpPageRevalidator {
    client: Client,
    enabled: bool,
    url: String,
    secret: String,
}

impl HttpPageRevalidator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            enabled: config.is_revalidation_configured(),
            url: config.revalidate_url.clone(),
            secret: config.revalidate_secret.clone(),
        }
    }
}

#[async_trait]
impl PageRevalidator for HttpPageRevalidator {
    async fn revalidate_path(&self, path: &str) -> Result<(), AppointmentError> {
        if !self.enabled {
            debug!("No revalidation endpoint configured, skipping {}", path);
            return Ok(());
        }

        let mut req = self.client.post(&self.url).json(&json!({ "path": path }));
        if !self.secret.is_empty() {
            req = req.bearer_auth(&self.secret);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppointmentError::ExternalServiceError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Revalidation of {} failed: {} - {}", path, status, body);
            return Err(AppointmentError::ExternalServiceError(format!(
                "revalidation returned HTTP {}",
                status
            )));
        }

        info!("Revalidated {}", path);
        Ok(())
    }
}
