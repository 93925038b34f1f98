use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub stripe_secret_key: String,
    pub stripe_publishable_key: String,
    pub stripe_api_base: String,
    pub appointment_fee: f64,
    pub currency: String,
    pub payments_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .unwrap_or_else(|_| "sk_test_your_key_here".to_string()),
            stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY")
                .unwrap_or_else(|_| "pk_test_your_key_here".to_string()),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            appointment_fee: env::var("APPOINTMENT_FEE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100.0),
            currency: env::var("CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            payments_enabled: env::var("PAYMENTS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            stripe_secret_key: "sk_test_your_key_here".to_string(),
            stripe_publishable_key: "pk_test_your_key_here".to_string(),
            stripe_api_base: "https://api.stripe.com".to_string(),
            appointment_fee: 100.0,
            currency: "usd".to_string(),
            payments_enabled: true,
        }
    }
}
