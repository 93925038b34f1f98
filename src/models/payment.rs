use serde::Serialize;
use std::collections::HashMap;

/// Remote payment-intent status as reported by the gateway. Statuses the
/// gateway may add later land in `Other` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    Canceled,
    Succeeded,
    Other(String),
}

impl IntentStatus {
    pub fn from_wire(status: &str) -> Self {
        match status {
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "processing" => Self::Processing,
            "canceled" => Self::Canceled,
            "succeeded" => Self::Succeeded,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresAction => "requires_action",
            Self::Processing => "processing",
            Self::Canceled => "canceled",
            Self::Succeeded => "succeeded",
            Self::Other(s) => s,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl Serialize for IntentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

/// Result of creating a payment intent at the gateway.
#[derive(Debug, Clone)]
pub struct CreatedIntent {
    pub intent_id: String,
    pub client_secret: String,
    pub amount_cents: u64,
}

/// Local read-only view of a gateway-owned payment intent.
#[derive(Debug, Clone)]
pub struct PaymentIntentView {
    pub intent_id: String,
    pub amount_cents: u64,
    pub currency: String,
    pub status: IntentStatus,
    pub metadata: HashMap<String, String>,
}

/// Non-secret gateway configuration the payment widget needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub publishable_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_mapping() {
        assert_eq!(
            IntentStatus::from_wire("succeeded"),
            IntentStatus::Succeeded
        );
        assert_eq!(
            IntentStatus::from_wire("requires_payment_method"),
            IntentStatus::RequiresPaymentMethod
        );
        assert_eq!(
            IntentStatus::from_wire("requires_capture"),
            IntentStatus::Other("requires_capture".to_string())
        );
    }

    #[test]
    fn test_status_round_trip() {
        for wire in ["succeeded", "processing", "canceled", "requires_action"] {
            assert_eq!(IntentStatus::from_wire(wire).as_wire(), wire);
        }
    }

    #[test]
    fn test_only_succeeded_counts() {
        assert!(IntentStatus::Succeeded.is_succeeded());
        assert!(!IntentStatus::Processing.is_succeeded());
        assert!(!IntentStatus::Other("succeeded_maybe".into()).is_succeeded());
    }
}
