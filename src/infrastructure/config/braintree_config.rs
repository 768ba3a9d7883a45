use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Braintree gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraintreeConfig {
    /// `sandbox` or `production`
    pub environment: String,

    /// Merchant id
    pub merchant_id: String,

    /// API public key (Basic auth username)
    pub public_key: String,

    /// API private key (Basic auth password)
    pub private_key: String,

    /// Merchant sub-account used by the scoped token route
    pub merchant_account_id: Option<String>,

    /// GraphQL API base URL
    pub base_url: String,
}

impl BraintreeConfig {
    pub fn from_env() -> Arc<Self> {
        let environment =
            std::env::var("BRAINTREE_ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string());

        let default_url = if environment == "production" {
            "https://payments.braintree-api.com/graphql"
        } else {
            "https://payments.sandbox.braintree-api.com/graphql"
        };

        Arc::new(Self {
            base_url: std::env::var("BRAINTREE_BASE_URL")
                .unwrap_or_else(|_| default_url.to_string()),
            environment,
            merchant_id: std::env::var("BRAINTREE_MERCHANT_ID")
                .expect("BRAINTREE_MERCHANT_ID must be set"),
            public_key: std::env::var("BRAINTREE_PUBLIC_KEY")
                .expect("BRAINTREE_PUBLIC_KEY must be set"),
            private_key: std::env::var("BRAINTREE_PRIVATE_KEY")
                .expect("BRAINTREE_PRIVATE_KEY must be set"),
            merchant_account_id: std::env::var("BRAINTREE_MERCHANT_ACCOUNT_ID").ok(),
        })
    }
}
