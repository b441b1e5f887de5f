// libs/appointment-cell/src/services/appointment.rs
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{is_valid_id, AppwriteClient, AppwriteError, DocumentStore, Messaging, Query};
use shared_utils::normalize;

use crate::models::{
    Appointment, AppointmentError, AppointmentSummary, CreateAppointmentRequest, SmsMessage,
    StatusCounts, ValidatedUpdate,
};
use crate::services::notification::{update_sms_content, NotificationService};
use crate::services::revalidation::{HttpPageRevalidator, PageRevalidator, ADMIN_PATH};

impl From<AppwriteError> for AppointmentError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::NotFound(_) => AppointmentError::NotFound,
            AppwriteError::InvalidId(id) => {
                AppointmentError::ValidationError(format!("invalid appointmentId {:?}", id))
            }
            other => AppointmentError::DatabaseError(other.to_string()),
        }
    }
}

pub struct AppointmentService {
    store: Arc<dyn DocumentStore>,
    notifications: NotificationService,
    revalidator: Arc<dyn PageRevalidator>,
    database_id: String,
    collection_id: String,
    clinic_name: String,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        let appwrite = Arc::new(AppwriteClient::new(config));
        Self::with_clients(
            config,
            appwrite.clone(),
            appwrite,
            Arc::new(HttpPageRevalidator::new(config)),
        )
    }

    pub fn with_clients(
        config: &AppConfig,
        store: Arc<dyn DocumentStore>,
        messaging: Arc<dyn Messaging>,
        revalidator: Arc<dyn PageRevalidator>,
    ) -> Self {
        Self {
            store,
            notifications: NotificationService::new(messaging),
            revalidator,
            database_id: config.database_id.clone(),
            collection_id: config.appointment_collection_id.clone(),
            clinic_name: config.clinic_name.clone(),
        }
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let document_id = Uuid::new_v4().simple().to_string();
        debug!("Creating appointment {} for user {}", document_id, request.user_id);

        let data = serde_json::to_value(&request)?;
        let document = self
            .store
            .create_document(&self.database_id, &self.collection_id, &document_id, data)
            .await
            .map_err(|e| {
                error!("Failed to create appointment: {}", e);
                AppointmentError::from(e)
            })?;

        let appointment: Appointment = normalize(&document)?;
        info!("Appointment {} created", appointment.id);

        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        if appointment_id.trim().is_empty() {
            return Err(AppointmentError::ValidationError("appointmentId is required".to_string()));
        }
        if !is_valid_id(appointment_id) {
            return Err(AppointmentError::ValidationError(format!(
                "invalid appointmentId {:?}",
                appointment_id
            )));
        }

        debug!("Fetching appointment {}", appointment_id);

        let document = self
            .store
            .get_document(&self.database_id, &self.collection_id, appointment_id)
            .await
            .map_err(|e| {
                error!("Failed to fetch appointment {}: {}", appointment_id, e);
                AppointmentError::from(e)
            })?;

        Ok(normalize(&document)?)
    }

    /// All appointments, newest first, with per-status counts.
    pub async fn get_recent_appointment_list(&self) -> Result<AppointmentSummary, AppointmentError> {
        debug!("Listing recent appointments");

        let list = self
            .store
            .list_documents(
                &self.database_id,
                &self.collection_id,
                &[Query::order_desc("$createdAt")],
            )
            .await
            .map_err(|e| {
                error!("Failed to list appointments: {}", e);
                AppointmentError::from(e)
            })?;

        let documents: Vec<Appointment> = normalize(&list.documents)?;
        let counts = StatusCounts::tally(&documents);

        info!(
            "Listed {} of {} appointments ({} scheduled, {} pending, {} cancelled)",
            documents.len(),
            list.total,
            counts.scheduled_count,
            counts.pending_count,
            counts.cancelled_count
        );

        Ok(AppointmentSummary {
            total_count: list.total,
            counts,
            documents,
        })
    }

    /// Applies the patch, then notifies the user and refreshes the admin
    /// view. Notification and refresh failures are logged, not returned.
    pub async fn update_appointment(&self, update: ValidatedUpdate) -> Result<Appointment, AppointmentError> {
        let ValidatedUpdate { appointment_id, user_id, patch, action } = update;
        debug!("Updating appointment {}", appointment_id);

        let data = serde_json::to_value(&patch)?;
        let document = self
            .store
            .update_document(&self.database_id, &self.collection_id, &appointment_id, data)
            .await
            .map_err(|e| {
                error!("Failed to update appointment {}: {}", appointment_id, e);
                AppointmentError::from(e)
            })?;

        let appointment: Appointment = normalize(&document)?;

        let content = update_sms_content(&self.clinic_name, &action);
        if let Err(e) = self.notifications.send_sms_notification(&user_id, &content).await {
            warn!("Appointment {} updated but SMS was not sent: {}", appointment_id, e);
        }

        if let Err(e) = self.revalidator.revalidate_path(ADMIN_PATH).await {
            warn!("Appointment {} updated but {} was not revalidated: {}", appointment_id, ADMIN_PATH, e);
        }

        info!("Appointment {} updated to status {}", appointment.id, appointment.status);
        Ok(appointment)
    }

    pub async fn send_sms_notification(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<SmsMessage, AppointmentError> {
        self.notifications.send_sms_notification(user_id, content).await
    }
}
