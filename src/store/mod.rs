pub mod appointments;
pub mod doctors;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("a doctor account already exists")]
    DoctorExists,
    #[error("storage failure: {0}")]
    Unavailable(String),
}

pub use appointments::{AppointmentStore, InMemoryAppointmentStore};
pub use doctors::{DoctorDirectory, InMemoryDoctorDirectory};
