// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, CreateAppointmentRequest, SendSmsRequest, UpdateAppointmentRequest,
};
use crate::services::AppointmentService;

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
            AppointmentError::ExternalServiceError(msg) => AppError::ExternalService(msg),
            AppointmentError::SerializationError(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let appointment = service.create_appointment(request).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let appointment = service.get_appointment(&appointment_id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_recent_appointments(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let summary = service.get_recent_appointment_list().await?;

    Ok(Json(json!(summary)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let update = request.validate(&appointment_id)?;
    let service = AppointmentService::new(&config);

    let appointment = service.update_appointment(update).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn send_sms_notification(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<SendSmsRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let message = service
        .send_sms_notification(&request.user_id, &request.content)
        .await?;

    Ok(Json(json!(message)))
}
