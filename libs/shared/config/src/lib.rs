use std::env;
use tracing::warn;

pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
pub const DEFAULT_CLINIC_NAME: &str = "CarePulse";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub appwrite_endpoint: String,
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub database_id: String,
    pub appointment_collection_id: String,
    pub revalidate_url: String,
    pub revalidate_secret: String,
    pub clinic_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            appwrite_endpoint: env::var("APPWRITE_ENDPOINT")
                .unwrap_or_else(|_| {
                    warn!("APPWRITE_ENDPOINT not set, using default");
                    DEFAULT_APPWRITE_ENDPOINT.to_string()
                }),
            appwrite_project_id: env::var("APPWRITE_PROJECT_ID")
                .unwrap_or_else(|_| {
                    warn!("APPWRITE_PROJECT_ID not set, using empty value");
                    String::new()
                }),
            appwrite_api_key: env::var("APPWRITE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("APPWRITE_API_KEY not set, using empty value");
                    String::new()
                }),
            database_id: env::var("APPWRITE_DATABASE_ID")
                .unwrap_or_else(|_| {
                    warn!("APPWRITE_DATABASE_ID not set, using empty value");
                    String::new()
                }),
            appointment_collection_id: env::var("APPWRITE_APPOINTMENT_COLLECTION_ID")
                .unwrap_or_else(|_| {
                    warn!("APPWRITE_APPOINTMENT_COLLECTION_ID not set, using empty value");
                    String::new()
                }),
            revalidate_url: env::var("REVALIDATE_URL")
                .unwrap_or_else(|_| {
                    warn!("REVALIDATE_URL not set, page revalidation disabled");
                    String::new()
                }),
            revalidate_secret: env::var("REVALIDATE_SECRET").unwrap_or_default(),
            clinic_name: env::var("CLINIC_NAME")
                .unwrap_or_else(|_| DEFAULT_CLINIC_NAME.to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.appwrite_endpoint.is_empty()
            && !self.appwrite_project_id.is_empty()
            && !self.appwrite_api_key.is_empty()
            && !self.database_id.is_empty()
            && !self.appointment_collection_id.is_empty()
    }

    pub fn is_revalidation_configured(&self) -> bool {
        !self.revalidate_url.is_empty()
    }
}
