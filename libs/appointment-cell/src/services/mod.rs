// libs/appointment-cell/src/services/mod.rs

pub mod appointment;
pub mod notification;
pub mod revalidation;

pub use appointment::AppointmentService;
pub use notification::NotificationService;
pub use revalidation::{HttpPageRevalidator, PageRevalidator};
