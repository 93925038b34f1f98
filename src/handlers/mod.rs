pub mod appointments;
pub mod doctors;
pub mod payments;

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::de::DeserializeOwned;

use crate::services::BookingError;
use crate::store::StoreError;

/// Uniform error body for every endpoint. Raw transport errors are logged at
/// the call site and never forwarded to the client.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let (status, message) = match &err {
            BookingError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            BookingError::GatewayUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                "Payment gateway unavailable".to_string(),
            ),
            BookingError::PaymentFailed { .. } => (StatusCode::PAYMENT_REQUIRED, err.to_string()),
            BookingError::PersistFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            BookingError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            BookingError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        Self { status, message }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::DoctorExists => StatusCode::CONFLICT,
            StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Json extractor whose rejection carries the uniform error body, so
/// malformed or incomplete request bodies fail the same way every other
/// validation error does.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::payments::CreateIntentRequest;
    use axum::body::{to_bytes, Body};

    fn post_json(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_field_gets_uniform_error_body() {
        let req = post_json(r#"{"doctorId":"3f1a8c54-b8d2-4f0e-9a7e-1c2d3e4f5a6b"}"#);
        let err = ApiJson::<CreateIntentRequest>::from_request(req, &())
            .await
            .err()
            .expect("incomplete body must be rejected");

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], serde_json::json!(false));
        assert!(body["message"].as_str().unwrap().contains("patientId"));
    }

    #[tokio::test]
    async fn test_malformed_json_gets_uniform_error_body() {
        let req = post_json("{not json");
        let err = ApiJson::<CreateIntentRequest>::from_request(req, &())
            .await
            .err()
            .expect("malformed body must be rejected");

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], serde_json::json!(false));
        assert!(body["message"].is_string());
    }
}
