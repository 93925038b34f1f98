use axum::extract::State;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::handlers::{ApiError, ApiJson};
use crate::models::payment::PublicConfig;
use crate::services::booking::BookingRequest;
use crate::services::{BookingService, Session};
use crate::utils::money;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub time: DateTime<Utc>,
    pub reason: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub success: bool,
    pub client_secret: String,
    pub payment_intent_id: String,
    pub fee: f64,
}

pub async fn create_intent(
    State(service): State<Arc<BookingService>>,
    ApiJson(request): ApiJson<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    info!(
        "Received create-intent request for doctor {}",
        request.doctor_id
    );

    let session = Session {
        patient_id: request.patient_id,
    };
    let handle = service
        .start_booking(
            &session,
            BookingRequest {
                doctor_id: request.doctor_id,
                time: request.time,
                reason: request.reason,
                amount: request.amount,
            },
        )
        .await?;

    Ok(Json(CreateIntentResponse {
        success: true,
        client_secret: handle.client_secret,
        payment_intent_id: handle.intent_id,
        fee: handle.fee,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

pub async fn verify(
    State(service): State<Arc<BookingService>>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let intent = service.verify_payment(&request.payment_intent_id).await?;

    Ok(Json(VerifyResponse {
        success: intent.status.is_succeeded(),
        status: intent.status.as_wire().to_string(),
        amount: Some(money::to_major_units(intent.amount_cents)),
        metadata: Some(intent.metadata),
    }))
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub success: bool,
    #[serde(flatten)]
    pub config: PublicConfig,
}

pub async fn get_config(State(service): State<Arc<BookingService>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        success: true,
        config: service.payment_config(),
    })
}
