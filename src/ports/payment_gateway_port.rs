use crate::domain::errors::CheckoutResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One-time charge submitted to the processor.
///
/// Settlement is always requested immediately and the payment method is
/// vaulted on success; the adapter owns those fixed options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub amount: String,
    pub payment_method_nonce: String,
}

/// Outcome of one sale attempt.
///
/// A business-level decline comes back with `success == false` and a
/// human-readable message; it is not an error. Callers must branch on
/// `success` before touching the other fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleResult {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub amount: Option<String>,
    pub customer_email: Option<String>,
    pub shipping_address: Option<serde_json::Value>,
    pub message: Option<String>,
}

/// Status of a prior transaction as the processor reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Normalized snake_case status, e.g. `settled`, `processor_declined`
    pub status: String,
    pub amount: Option<String>,
}

/// Payment gateway port.
///
/// Pure pass-through to the external processor; no local state. Transport
/// and protocol faults error, business declines do not.
#[async_trait]
pub trait PaymentGatewayPort: Send + Sync {
    /// Request a fresh client session token, optionally scoped to a
    /// merchant sub-account
    async fn generate_token(&self, merchant_account_id: Option<&str>) -> CheckoutResult<String>;

    /// Submit a one-time charge with immediate settlement
    async fn submit_sale(&self, request: SaleRequest) -> CheckoutResult<SaleResult>;

    /// Look up a prior transaction; `NotFound` when the processor has no
    /// record of it
    async fn find_transaction(&self, transaction_id: &str) -> CheckoutResult<TransactionStatus>;
}
