use crate::app::config::Config;
use crate::models::appointment::{
    Appointment, AppointmentSummary, NewAppointment, PaymentStatus,
};
use crate::models::doctor::Doctor;
use crate::models::payment::{PaymentIntentView, PublicConfig};
use crate::services::gateway::{GatewayError, PaymentGateway};
use crate::store::{AppointmentStore, DoctorDirectory, StoreError};
use crate::utils::money;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Caller identity, passed explicitly into every workflow call.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub patient_id: Uuid,
}

/// Stages of one booking attempt. `PaymentFailed` and `PersistFailed` are
/// terminal for the attempt; a new intent must be created to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    Draft,
    AwaitingPayment,
    PaymentVerifying,
    Persisted,
    PaymentFailed,
    PersistFailed,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
    #[error("payment not successful, status: {status}")]
    PaymentFailed { status: String },
    #[error("payment {payment_id} succeeded but the appointment was not recorded")]
    PersistFailed {
        payment_id: String,
        amount_cents: u64,
        doctor: Uuid,
        time: DateTime<Utc>,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<GatewayError> for BookingError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidAmount(amount) => {
                Self::Validation(format!("invalid payment amount: {amount}"))
            }
            GatewayError::NotFound(id) => Self::NotFound(format!("payment intent {id}")),
            GatewayError::Unavailable(msg) | GatewayError::Malformed(msg) => {
                Self::GatewayUnavailable(msg)
            }
        }
    }
}

/// Patient input opening a booking attempt.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub doctor_id: Uuid,
    pub time: DateTime<Utc>,
    pub reason: Option<String>,
    /// Overrides the configured appointment fee when present.
    pub amount: Option<f64>,
}

/// Input closing a booking attempt after the client-side payment widget ran.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub doctor_id: Uuid,
    pub time: DateTime<Utc>,
    pub reason: Option<String>,
    pub payment_id: Option<String>,
    pub fee: Option<f64>,
}

/// Handle the presentation layer needs to drive the payment widget.
#[derive(Debug, Clone)]
pub struct PaymentHandle {
    pub intent_id: String,
    pub client_secret: String,
    pub fee: f64,
}

/// Drives the booking workflow: create payment intent, verify the payment
/// once the client-side widget reports back, then persist the appointment.
/// Persistence happens strictly after verification, never before.
pub struct BookingService {
    gateway: Arc<dyn PaymentGateway>,
    appointments: Arc<dyn AppointmentStore>,
    doctors: Arc<dyn DoctorDirectory>,
    default_fee: f64,
    payments_enabled: bool,
}

impl BookingService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        appointments: Arc<dyn AppointmentStore>,
        doctors: Arc<dyn DoctorDirectory>,
        config: &Config,
    ) -> Self {
        Self {
            gateway,
            appointments,
            doctors,
            default_fee: config.appointment_fee,
            payments_enabled: config.payments_enabled,
        }
    }

    /// Opens a booking attempt: validates the draft and obtains a payment
    /// intent from the gateway. Nothing is persisted at this stage.
    pub async fn start_booking(
        &self,
        session: &Session,
        request: BookingRequest,
    ) -> Result<PaymentHandle, BookingError> {
        info!(
            patient = %session.patient_id,
            stage = ?BookingStage::Draft,
            "Opening booking attempt for doctor {}", request.doctor_id
        );
        let doctor = self.resolve_draft(&request.doctor_id, request.time).await?;

        let fee = request.amount.unwrap_or(self.default_fee);
        if money::to_minor_units(fee).is_none() {
            return Err(BookingError::Validation(format!(
                "invalid payment amount: {fee}"
            )));
        }

        let mut metadata = HashMap::new();
        metadata.insert("appointment".to_string(), "clinic_appointment".to_string());
        metadata.insert("doctor_id".to_string(), doctor.id.to_string());
        metadata.insert("time".to_string(), request.time.to_rfc3339());
        if let Some(reason) = &request.reason {
            metadata.insert("reason".to_string(), reason.clone());
        }

        let intent = match self.gateway.create_intent(fee, metadata).await {
            Ok(intent) => intent,
            Err(e) => {
                error!(
                    patient = %session.patient_id,
                    stage = ?BookingStage::PaymentFailed,
                    "Failed to create payment intent: {}", e
                );
                return Err(e.into());
            }
        };

        info!(
            patient = %session.patient_id,
            intent = %intent.intent_id,
            stage = ?BookingStage::AwaitingPayment,
            "Payment intent created for {}", money::format_currency(intent.amount_cents)
        );

        Ok(PaymentHandle {
            intent_id: intent.intent_id,
            client_secret: intent.client_secret,
            fee,
        })
    }

    /// Current remote status of a payment intent, for the verify endpoint.
    pub async fn verify_payment(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntentView, BookingError> {
        Ok(self.gateway.verify(intent_id).await?)
    }

    /// Closes a booking attempt. Under the payment-enabled configuration the
    /// intent is re-verified against the gateway and the appointment is
    /// persisted only on a succeeded status; otherwise the appointment is
    /// created directly with pending payment fields.
    pub async fn complete_booking(
        &self,
        session: &Session,
        request: CompletionRequest,
    ) -> Result<Uuid, BookingError> {
        if !self.payments_enabled {
            return self.complete_without_payment(session, request).await;
        }

        let doctor = self.resolve_draft(&request.doctor_id, request.time).await?;
        let payment_id = request
            .payment_id
            .ok_or_else(|| BookingError::Validation("missing payment intent ID".into()))?;

        info!(
            patient = %session.patient_id,
            intent = %payment_id,
            stage = ?BookingStage::PaymentVerifying,
            "Verifying payment before persisting appointment"
        );
        let intent = self.gateway.verify(&payment_id).await?;

        if !intent.status.is_succeeded() {
            warn!(
                patient = %session.patient_id,
                intent = %payment_id,
                stage = ?BookingStage::PaymentFailed,
                "Payment not successful, status: {}", intent.status.as_wire()
            );
            return Err(BookingError::PaymentFailed {
                status: intent.status.as_wire().to_string(),
            });
        }

        // The verified gateway amount is authoritative for the stored fee.
        let appointment = NewAppointment {
            patient: session.patient_id,
            doctor: doctor.id,
            time: request.time,
            reason: request.reason,
            payment_id: Some(payment_id.clone()),
            payment_status: PaymentStatus::Completed,
            fee_cents: intent.amount_cents,
        };

        match self.appointments.create(appointment).await {
            Ok(id) => {
                info!(
                    patient = %session.patient_id,
                    appointment = %id,
                    stage = ?BookingStage::Persisted,
                    "Appointment persisted with completed payment {}", payment_id
                );
                Ok(id)
            }
            Err(e) => {
                // Paid but not recorded. Log everything an operator needs
                // to reconcile the charge out of band.
                error!(
                    patient = %session.patient_id,
                    intent = %payment_id,
                    doctor = %doctor.id,
                    time = %request.time,
                    amount = %money::format_currency(intent.amount_cents),
                    stage = ?BookingStage::PersistFailed,
                    "Appointment write failed after successful payment: {}", e
                );
                Err(BookingError::PersistFailed {
                    payment_id,
                    amount_cents: intent.amount_cents,
                    doctor: doctor.id,
                    time: request.time,
                })
            }
        }
    }

    async fn complete_without_payment(
        &self,
        session: &Session,
        request: CompletionRequest,
    ) -> Result<Uuid, BookingError> {
        let doctor = self.resolve_draft(&request.doctor_id, request.time).await?;

        let fee = request.fee.unwrap_or(self.default_fee);
        let fee_cents = money::to_minor_units(fee)
            .ok_or_else(|| BookingError::Validation(format!("invalid payment amount: {fee}")))?;

        let appointment = NewAppointment {
            patient: session.patient_id,
            doctor: doctor.id,
            time: request.time,
            reason: request.reason,
            payment_id: None,
            payment_status: PaymentStatus::Pending,
            fee_cents,
        };

        let id = self
            .appointments
            .create(appointment)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;
        info!(
            patient = %session.patient_id,
            appointment = %id,
            stage = ?BookingStage::Persisted,
            "Appointment persisted without payment collection"
        );
        Ok(id)
    }

    async fn resolve_draft(
        &self,
        doctor_id: &Uuid,
        time: DateTime<Utc>,
    ) -> Result<Doctor, BookingError> {
        if time <= Utc::now() {
            return Err(BookingError::Validation(
                "scheduled time must be in the future".into(),
            ));
        }

        self.doctors
            .find(*doctor_id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(format!("doctor {doctor_id}")))
    }

    pub async fn appointments_for_patient(
        &self,
        patient: Uuid,
    ) -> Result<Vec<AppointmentSummary>, BookingError> {
        let appointments = self
            .appointments
            .list_for_patient(patient)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;
        self.summarize(appointments).await
    }

    pub async fn all_appointments(&self) -> Result<Vec<AppointmentSummary>, BookingError> {
        let appointments = self
            .appointments
            .list_all()
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;
        self.summarize(appointments).await
    }

    async fn summarize(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentSummary>, BookingError> {
        let mut summaries = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            let doctor_name = self
                .doctors
                .find(appointment.doctor)
                .await
                .map_err(|e| BookingError::Internal(e.to_string()))?
                .map(|doctor| doctor.name)
                .unwrap_or_else(|| "N/A".to_string());
            summaries.push(AppointmentSummary {
                id: appointment.id,
                doctor_name,
                time: appointment.time,
                status: appointment.status,
                reason: appointment.reason,
                payment_status: appointment.payment_status,
                fee: money::to_major_units(appointment.fee_cents),
            });
        }
        Ok(summaries)
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        self.doctors.list().await
    }

    pub async fn register_doctor(&self, name: String, email: String) -> Result<Doctor, StoreError> {
        self.doctors.register(name, email).await
    }

    pub fn payment_config(&self) -> PublicConfig {
        self.gateway.public_config()
    }
}
