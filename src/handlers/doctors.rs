use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{ApiError, ApiJson};
use crate::models::doctor::Doctor;
use crate::services::BookingService;

#[derive(Debug, Serialize)]
pub struct DoctorListResponse {
    pub success: bool,
    pub doctors: Vec<Doctor>,
}

pub async fn list(
    State(service): State<Arc<BookingService>>,
) -> Result<Json<DoctorListResponse>, ApiError> {
    let doctors = service.list_doctors().await?;
    Ok(Json(DoctorListResponse {
        success: true,
        doctors,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RegisterDoctorRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterDoctorResponse {
    pub success: bool,
    pub doctor: Doctor,
}

pub async fn register(
    State(service): State<Arc<BookingService>>,
    ApiJson(request): ApiJson<RegisterDoctorRequest>,
) -> Result<Json<RegisterDoctorResponse>, ApiError> {
    let doctor = service.register_doctor(request.name, request.email).await?;
    info!("Registered doctor account {}", doctor.id);
    Ok(Json(RegisterDoctorResponse {
        success: true,
        doctor,
    }))
}
