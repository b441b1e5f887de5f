// libs/appointment-cell/src/services/notification.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};
use uuid::Uuid;

use shared_database::Messaging;
use shared_utils::normalize;

use crate::models::{AppointmentError, AppointmentUpdate, SmsMessage};

/// Formats a schedule the way patients see it, e.g. `May 1, 2024, 10:00 AM`.
pub fn format_date_time(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Builds the SMS body sent after an appointment update.
pub fn update_sms_content(clinic_name: &str, update: &AppointmentUpdate) -> String {
    match update {
        AppointmentUpdate::Schedule { schedule, primary_physician } => format!(
            "Greetings from {}. Your appointment is confirmed for {} with Dr. {}.",
            clinic_name,
            format_date_time(*schedule),
            primary_physician
        ),
        AppointmentUpdate::Cancel { schedule, cancellation_reason } => format!(
            "Greetings from {}. We regret to inform that your appointment for {} is cancelled. Reason:  {}.",
            clinic_name,
            format_date_time(*schedule),
            cancellation_reason
        ),
    }
}

pub struct NotificationService {
    messaging: Arc<dyn Messaging>,
}

impl NotificationService {
    pub fn new(messaging: Arc<dyn Messaging>) -> Self {
        Self { messaging }
    }

    /// Sends `content` to exactly one user. No retry.
    pub async fn send_sms_notification(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<SmsMessage, AppointmentError> {
        if user_id.trim().is_empty() {
            return Err(AppointmentError::ValidationError("userId is required".to_string()));
        }

        let message_id = Uuid::new_v4().simple().to_string();
        debug!("Sending SMS {} to user {}", message_id, user_id);

        let message = self
            .messaging
            .create_sms(&message_id, content, &[], &[user_id.to_string()])
            .await
            .map_err(|e| {
                error!("Failed to send SMS to user {}: {}", user_id, e);
                AppointmentError::ExternalServiceError(e.to_string())
            })?;

        let message: SmsMessage = normalize(&message)?;
        info!("SMS {} queued for user {}", message.id, user_id);

        Ok(message)
    }
}
