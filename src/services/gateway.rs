use crate::app::config::Config;
use crate::models::payment::{CreatedIntent, IntentStatus, PaymentIntentView, PublicConfig};
use crate::utils::money;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid payment amount: {0}")]
    InvalidAmount(f64),
    #[error("payment intent not found: {0}")]
    NotFound(String),
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected gateway response: {0}")]
    Malformed(String),
}

/// Stateless adapter over the remote payment-processor API. Amounts are in
/// major currency units at this interface and converted to cents on the wire.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(
        &self,
        amount: f64,
        metadata: HashMap<String, String>,
    ) -> Result<CreatedIntent, GatewayError>;

    async fn verify(&self, intent_id: &str) -> Result<PaymentIntentView, GatewayError>;

    fn public_config(&self) -> PublicConfig;
}

/// Payment-intent shape returned by the Stripe API. Only the fields the
/// booking workflow reads are kept.
#[derive(Debug, Deserialize)]
struct WireIntent {
    id: String,
    client_secret: Option<String>,
    amount: u64,
    currency: String,
    status: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
    publishable_key: String,
    currency: String,
}

impl StripeGateway {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(5000))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base: config.stripe_api_base.clone(),
            secret_key: config.stripe_secret_key.clone(),
            publishable_key: config.stripe_publishable_key.clone(),
            currency: config.currency.clone(),
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: f64,
        metadata: HashMap<String, String>,
    ) -> Result<CreatedIntent, GatewayError> {
        let amount_cents =
            money::to_minor_units(amount).ok_or(GatewayError::InvalidAmount(amount))?;

        let mut params = vec![
            ("amount".to_string(), amount_cents.to_string()),
            ("currency".to_string(), self.currency.clone()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];
        for (key, value) in metadata {
            params.push((format!("metadata[{key}]"), value));
        }

        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach payment gateway: {}", e);
                GatewayError::Unavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            warn!(
                "Gateway rejected intent creation with HTTP {}",
                response.status()
            );
            return Err(GatewayError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let intent: WireIntent = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        let client_secret = intent
            .client_secret
            .ok_or_else(|| GatewayError::Malformed("missing client_secret".to_string()))?;

        info!("Created payment intent {}", intent.id);
        Ok(CreatedIntent {
            intent_id: intent.id,
            client_secret,
            amount_cents: intent.amount,
        })
    }

    async fn verify(&self, intent_id: &str) -> Result<PaymentIntentView, GatewayError> {
        let response = self
            .client
            .get(format!("{}/{}", self.intents_url(), intent_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach payment gateway: {}", e);
                GatewayError::Unavailable(e.to_string())
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                warn!("Payment intent {} unknown to gateway", intent_id);
                Err(GatewayError::NotFound(intent_id.to_string()))
            }
            status if !status.is_success() => {
                warn!("Gateway verify returned HTTP {}", status);
                Err(GatewayError::Unavailable(format!("HTTP {status}")))
            }
            _ => {
                let intent: WireIntent = response
                    .json()
                    .await
                    .map_err(|e| GatewayError::Malformed(e.to_string()))?;
                info!(
                    "Verified payment intent {} with status {}",
                    intent.id, intent.status
                );
                Ok(PaymentIntentView {
                    intent_id: intent.id,
                    amount_cents: intent.amount,
                    currency: intent.currency,
                    status: IntentStatus::from_wire(&intent.status),
                    metadata: intent.metadata,
                })
            }
        }
    }

    fn public_config(&self) -> PublicConfig {
        PublicConfig {
            publishable_key: self.publishable_key.clone(),
        }
    }
}
