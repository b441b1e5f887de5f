// libs/appointment-cell/src/lib.rs
//! # Appointment Cell
//!
//! Appointment records stored in an Appwrite collection, plus the SMS sent to
//! the patient when an appointment is confirmed or cancelled.
//!
//! ```text
//! handlers.rs          HTTP endpoint handlers
//! router.rs            Route definitions
//! models.rs            Records, requests, errors
//! services/
//!   appointment.rs     Create / get / list / update
//!   notification.rs    SMS templates and sending
//!   revalidation.rs    Admin page cache refresh
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /appointments` - Create an appointment
//! - `GET /appointments/recent` - All appointments, newest first, with status counts
//! - `GET /appointments/{id}` - Fetch one appointment
//! - `PUT /appointments/{id}` - Confirm or cancel, then notify the patient
//! - `POST /appointments/notifications/sms` - Send an SMS to one user

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Appointment, AppointmentError, AppointmentStatus, AppointmentSummary, AppointmentUpdate,
    CreateAppointmentRequest, UpdateAppointmentRequest,
};
pub use router::appointment_routes;
pub use services::AppointmentService;
