// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use shared_database::is_valid_id;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    /// Patient id on write; the expanded patient document when the
    /// relationship is resolved on read.
    #[serde(default)]
    pub patient: Value,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    #[serde(default)]
    pub note: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Pending,
    Cancelled,
    /// Any stored value outside the three known ones, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub user_id: String,
    pub patient: String,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Partial appointment sent to the store on update. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_physician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Raw update body as posted by the admin UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub user_id: String,
    pub appointment: AppointmentPatch,
    #[serde(rename = "type")]
    pub update_type: String,
}

/// What an update does, with the fields each kind needs for its SMS.
#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentUpdate {
    Schedule {
        schedule: DateTime<Utc>,
        primary_physician: String,
    },
    Cancel {
        schedule: DateTime<Utc>,
        cancellation_reason: String,
    },
}

/// An update request whose required fields have been checked.
#[derive(Debug, Clone)]
pub struct ValidatedUpdate {
    pub appointment_id: String,
    pub user_id: String,
    pub patch: AppointmentPatch,
    pub action: AppointmentUpdate,
}

impl UpdateAppointmentRequest {
    /// `type == "schedule"` confirms; any other type cancels.
    pub fn validate(self, appointment_id: &str) -> Result<ValidatedUpdate, AppointmentError> {
        if appointment_id.trim().is_empty() {
            return Err(AppointmentError::ValidationError("appointmentId is required".to_string()));
        }
        if !is_valid_id(appointment_id) {
            return Err(AppointmentError::ValidationError(format!(
                "invalid appointmentId {:?}",
                appointment_id
            )));
        }

        let schedule = self.appointment.schedule.ok_or_else(|| {
            AppointmentError::ValidationError("appointment.schedule is required".to_string())
        })?;

        let action = if self.update_type == "schedule" {
            let primary_physician = self.appointment.primary_physician.clone().ok_or_else(|| {
                AppointmentError::ValidationError(
                    "appointment.primaryPhysician is required to schedule".to_string(),
                )
            })?;
            AppointmentUpdate::Schedule { schedule, primary_physician }
        } else {
            let cancellation_reason = self.appointment.cancellation_reason.clone().ok_or_else(|| {
                AppointmentError::ValidationError(
                    "appointment.cancellationReason is required to cancel".to_string(),
                )
            })?;
            AppointmentUpdate::Cancel { schedule, cancellation_reason }
        };

        Ok(ValidatedUpdate {
            appointment_id: appointment_id.to_string(),
            user_id: self.user_id,
            patch: self.appointment,
            action,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub scheduled_count: u64,
    pub pending_count: u64,
    pub cancelled_count: u64,
}

impl StatusCounts {
    /// Single pass over `appointments`; unrecognized statuses count nowhere.
    pub fn tally(appointments: &[Appointment]) -> Self {
        appointments.iter().fold(Self::default(), |mut counts, appointment| {
            match appointment.status {
                AppointmentStatus::Scheduled => counts.scheduled_count += 1,
                AppointmentStatus::Pending => counts.pending_count += 1,
                AppointmentStatus::Cancelled => counts.cancelled_count += 1,
                AppointmentStatus::Other(_) => {}
            }
            counts
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub total_count: u64,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub documents: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsRequest {
    pub user_id: String,
    pub content: String,
}

/// Message record returned by the messaging service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SmsMessage {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn appointment_with_status(status: &str) -> Appointment {
        serde_json::from_value(json!({
            "$id": "a1",
            "$createdAt": "2024-04-20T09:30:00.000+00:00",
            "$updatedAt": "2024-04-20T09:30:00.000+00:00",
            "userId": "user-1",
            "patient": "patient-1",
            "primaryPhysician": "Dr. Lee",
            "schedule": "2024-05-01T10:00:00.000+00:00",
            "reason": "Check-up",
            "status": status
        }))
        .unwrap()
    }

    fn patch(schedule: bool, physician: bool, reason: bool) -> AppointmentPatch {
        AppointmentPatch {
            primary_physician: physician.then(|| "Dr. Lee".to_string()),
            schedule: schedule.then(|| "2024-05-01T10:00:00Z".parse().unwrap()),
            status: None,
            cancellation_reason: reason.then(|| "Patient request".to_string()),
            note: None,
        }
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let appointment = appointment_with_status("rescheduled");
        assert_eq!(appointment.status, AppointmentStatus::Other("rescheduled".to_string()));
        assert_eq!(serde_json::to_value(&appointment.status).unwrap(), json!("rescheduled"));
    }

    #[test]
    fn test_known_status_round_trips_lowercase() {
        let appointment = appointment_with_status("cancelled");
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);
        assert_eq!(serde_json::to_value(&appointment.status).unwrap(), json!("cancelled"));
    }

    #[test]
    fn test_tally_skips_unrecognized_statuses() {
        let appointments: Vec<Appointment> = ["scheduled", "pending", "pending", "cancelled", "archived"]
            .iter()
            .map(|s| appointment_with_status(s))
            .collect();

        let counts = StatusCounts::tally(&appointments);

        assert_eq!(counts, StatusCounts { scheduled_count: 1, pending_count: 2, cancelled_count: 1 });
        assert_eq!(counts.scheduled_count + counts.pending_count + counts.cancelled_count, 4);
    }

    #[test]
    fn test_validate_schedule_requires_physician() {
        let request = UpdateAppointmentRequest {
            user_id: "user-1".to_string(),
            appointment: patch(true, false, false),
            update_type: "schedule".to_string(),
        };

        assert!(matches!(request.validate("a1"), Err(AppointmentError::ValidationError(_))));
    }

    #[test]
    fn test_validate_missing_schedule() {
        let request = UpdateAppointmentRequest {
            user_id: "user-1".to_string(),
            appointment: patch(false, true, true),
            update_type: "schedule".to_string(),
        };

        assert!(matches!(request.validate("a1"), Err(AppointmentError::ValidationError(_))));
    }

    #[test]
    fn test_validate_any_other_type_cancels() {
        let request = UpdateAppointmentRequest {
            user_id: "user-1".to_string(),
            appointment: patch(true, false, true),
            update_type: "whatever".to_string(),
        };

        let validated = request.validate("a1").unwrap();
        assert_eq!(
            validated.action,
            AppointmentUpdate::Cancel {
                schedule: "2024-05-01T10:00:00Z".parse().unwrap(),
                cancellation_reason: "Patient request".to_string(),
            }
        );
        assert_eq!(validated.appointment_id, "a1");
    }

    #[test]
    fn test_validate_rejects_path_like_id() {
        for id in ["../patients/documents/p1", "a/b", ".."] {
            let request = UpdateAppointmentRequest {
                user_id: "user-1".to_string(),
                appointment: patch(true, true, false),
                update_type: "schedule".to_string(),
            };

            assert!(matches!(request.validate(id), Err(AppointmentError::ValidationError(_))));
        }
    }

    #[test]
    fn test_update_request_deserializes_type_field() {
        let request: UpdateAppointmentRequest = serde_json::from_value(json!({
            "userId": "user-1",
            "type": "cancel",
            "appointment": {
                "status": "cancelled",
                "schedule": "2024-05-01T10:00:00Z",
                "cancellationReason": "Patient request"
            }
        }))
        .unwrap();

        assert_eq!(request.update_type, "cancel");
        assert_eq!(request.appointment.status, Some(AppointmentStatus::Cancelled));
    }

    #[test]
    fn test_summary_flattens_counts() {
        let summary = AppointmentSummary {
            total_count: 3,
            counts: StatusCounts { scheduled_count: 1, pending_count: 1, cancelled_count: 0 },
            documents: vec![],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["scheduledCount"], 1);
        assert_eq!(value["cancelledCount"], 0);
    }
}
