use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheduling status, owned by doctor/admin actions downstream of booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Payment linkage status. Only `Completed` appointments count as paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub seen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient: Uuid,
    pub doctor: Uuid,
    pub time: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    /// Gateway transaction id. Absent only under the payment-disabled
    /// configuration.
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub fee_cents: u64,
    /// Appended by notification logic outside the booking workflow.
    pub notifications: Vec<Notification>,
}

/// Insert payload for the appointment store. The id is assigned on create.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient: Uuid,
    pub doctor: Uuid,
    pub time: DateTime<Utc>,
    pub reason: Option<String>,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub fee_cents: u64,
}

/// Listing row with the doctor reference resolved to display fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub doctor_name: String,
    pub time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub payment_status: PaymentStatus,
    pub fee: f64,
}
