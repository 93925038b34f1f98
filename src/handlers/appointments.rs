use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::handlers::{ApiError, ApiJson};
use crate::models::appointment::AppointmentSummary;
use crate::services::booking::CompletionRequest;
use crate::services::{BookingService, Session};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub time: DateTime<Utc>,
    pub reason: Option<String>,
    pub payment_id: Option<String>,
    pub fee: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentResponse {
    pub success: bool,
    pub appointment_id: Uuid,
}

pub async fn create(
    State(service): State<Arc<BookingService>>,
    ApiJson(request): ApiJson<CreateAppointmentRequest>,
) -> Result<Json<CreateAppointmentResponse>, ApiError> {
    info!(
        "Received appointment request from patient {}",
        request.patient_id
    );

    let session = Session {
        patient_id: request.patient_id,
    };
    let appointment_id = service
        .complete_booking(
            &session,
            CompletionRequest {
                doctor_id: request.doctor_id,
                time: request.time,
                reason: request.reason,
                payment_id: request.payment_id,
                fee: request.fee,
            },
        )
        .await?;

    Ok(Json(CreateAppointmentResponse {
        success: true,
        appointment_id,
    }))
}

pub async fn list_for_patient(
    State(service): State<Arc<BookingService>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentSummary>>, ApiError> {
    let summaries = service.appointments_for_patient(patient_id).await?;
    Ok(Json(summaries))
}

pub async fn list_all(
    State(service): State<Arc<BookingService>>,
) -> Result<Json<Vec<AppointmentSummary>>, ApiError> {
    let summaries = service.all_appointments().await?;
    Ok(Json(summaries))
}
