use crate::domain::errors::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// Payment request as it arrives on the wire.
///
/// Fields are optional so that presence is checked here, in one place,
/// before any gateway or store call is made; a missing field is a plain
/// rejection, never a half-processed request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub payment_method_nonce: Option<String>,
    pub amount: Option<String>,
    pub user_id: Option<String>,
    pub cart_id: Option<String>,
    pub session_id: Option<String>,
}

/// A payment request that passed presence validation
#[derive(Debug, Clone)]
pub struct PaymentAttempt {
    pub payment_method_nonce: String,
    pub amount: String,
    pub user_id: String,
    pub cart_id: String,
    pub session_id: Option<String>,
}

impl ProcessPaymentRequest {
    /// Validate presence of the required fields, naming every missing one
    pub fn validate(self) -> CheckoutResult<PaymentAttempt> {
        let mut missing = Vec::new();

        let required = [
            ("paymentMethodNonce", &self.payment_method_nonce),
            ("amount", &self.amount),
            ("userId", &self.user_id),
            ("cartId", &self.cart_id),
        ];
        for (name, value) in required {
            match value {
                Some(v) if !v.is_empty() => {}
                _ => missing.push(name),
            }
        }

        if !missing.is_empty() {
            return Err(CheckoutError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(PaymentAttempt {
            payment_method_nonce: self.payment_method_nonce.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
            cart_id: self.cart_id.unwrap_or_default(),
            session_id: self.session_id,
        })
    }
}

/// Response for a committed payment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentResponse {
    pub success: bool,
    pub transaction_id: String,
    pub amount: String,
}

/// Response for a transaction status lookup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub is_valid: bool,
    pub status: String,
    pub amount: Option<String>,
}

/// Response carrying a fresh client token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            payment_method_nonce: Some("nonce-1".to_string()),
            amount: Some("25.00".to_string()),
            user_id: Some("U1".to_string()),
            cart_id: Some("C1".to_string()),
            session_id: None,
        }
    }

    #[test]
    fn test_complete_request_validates() {
        let attempt = full_request().validate().unwrap();
        assert_eq!(attempt.payment_method_nonce, "nonce-1");
        assert_eq!(attempt.amount, "25.00");
        assert_eq!(attempt.user_id, "U1");
        assert_eq!(attempt.cart_id, "C1");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let request = ProcessPaymentRequest {
            amount: None,
            ..full_request()
        };

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let request = ProcessPaymentRequest {
            cart_id: Some(String::new()),
            ..full_request()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_all_missing_fields_are_named() {
        let err = ProcessPaymentRequest::default().validate().unwrap_err();
        let message = err.to_string();
        for name in ["paymentMethodNonce", "amount", "userId", "cartId"] {
            assert!(message.contains(name), "expected {name} in {message}");
        }
    }
}
