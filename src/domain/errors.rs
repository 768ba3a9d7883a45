use thiserror::Error;

/// Error taxonomy for the checkout relay.
///
/// Every failure a handler can see is one of these kinds; the HTTP status
/// mapping lives in a single table in the api layer keyed on this enum.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Missing or malformed input, rejected before any external call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The processor rejected the charge. A business outcome, not a fault
    #[error("Payment declined: {0}")]
    GatewayDecline(String),

    /// Cart or transaction absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport or processor fault while talking to the payment gateway
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The atomic store write did not apply after a successful charge.
    /// The payment is captured but no order exists; operators must reconcile
    #[error("Order commit failed after capture: {0}")]
    CommitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type used throughout the crate
pub type CheckoutResult<T> = Result<T, CheckoutError>;
