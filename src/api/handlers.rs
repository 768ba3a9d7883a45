use crate::application::{CheckoutService, ProcessPaymentRequest};
use crate::domain::errors::CheckoutError;
use crate::ports::{OrderStorePort, PaymentGatewayPort};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Shared application state
pub struct AppState<G: PaymentGatewayPort, S: OrderStorePort> {
    pub checkout_service: Arc<CheckoutService<G, S>>,
    /// Merchant sub-account used by the POST token route
    pub merchant_account_id: Option<String>,
    /// Gateway environment label, reported by the health endpoint
    pub environment: String,
}

impl<G: PaymentGatewayPort, S: OrderStorePort> Clone for AppState<G, S> {
    fn clone(&self) -> Self {
        Self {
            checkout_service: self.checkout_service.clone(),
            merchant_account_id: self.merchant_account_id.clone(),
            environment: self.environment.clone(),
        }
    }
}

/// The one place error kinds become HTTP statuses. `CommitFailed` stays a
/// distinct arm so the captured-but-unbooked case can never silently fold
/// into a validation 400.
fn status_for(error: &CheckoutError) -> StatusCode {
    match error {
        CheckoutError::Validation(_) => StatusCode::BAD_REQUEST,
        CheckoutError::GatewayDecline(_) => StatusCode::BAD_REQUEST,
        CheckoutError::NotFound(_) => StatusCode::NOT_FOUND,
        CheckoutError::GatewayUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CheckoutError::CommitFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CheckoutError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CheckoutError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Issue a client token, shared by the GET and POST routes
async fn issue_token<G: PaymentGatewayPort, S: OrderStorePort>(
    state: &AppState<G, S>,
    merchant_account_id: Option<&str>,
) -> impl IntoResponse + use<G, S> {
    match state
        .checkout_service
        .generate_token(merchant_account_id)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(json!({ "token": response.token }))),
        Err(e) => {
            error!("Token generation error: {}", e);
            (status_for(&e), Json(json!({ "error": e.to_string() })))
        }
    }
}

/// Token without a merchant sub-account scope
pub async fn generate_token<G: PaymentGatewayPort, S: OrderStorePort>(
    State(state): State<AppState<G, S>>,
) -> impl IntoResponse {
    issue_token(&state, None).await
}

/// Token scoped to the configured merchant sub-account
pub async fn generate_scoped_token<G: PaymentGatewayPort, S: OrderStorePort>(
    State(state): State<AppState<G, S>>,
) -> impl IntoResponse {
    issue_token(&state, state.merchant_account_id.as_deref()).await
}

/// Charge, then commit the cart into an order
pub async fn process_payment<G: PaymentGatewayPort, S: OrderStorePort>(
    State(state): State<AppState<G, S>>,
    Json(request): Json<ProcessPaymentRequest>,
) -> impl IntoResponse {
    match state.checkout_service.process_payment(request).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => {
            error!("Payment processing error: {}", e);
            let body = match &e {
                CheckoutError::Validation(message) | CheckoutError::NotFound(message) => {
                    json!({ "error": message })
                }
                CheckoutError::GatewayDecline(message) => {
                    json!({ "success": false, "message": message })
                }
                other => json!({ "success": false, "error": other.to_string() }),
            };
            (status_for(&e), Json(body))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentParams {
    pub transaction_id: Option<String>,
}

/// Look up a transaction and report whether it settled
pub async fn verify_payment<G: PaymentGatewayPort, S: OrderStorePort>(
    State(state): State<AppState<G, S>>,
    Query(params): Query<VerifyPaymentParams>,
) -> impl IntoResponse {
    let Some(transaction_id) = params.transaction_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required field: transactionId" })),
        );
    };

    match state.checkout_service.verify_payment(&transaction_id).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => {
            error!("Payment verification error: {}", e);
            (
                status_for(&e),
                Json(json!({ "isValid": false, "error": e.to_string() })),
            )
        }
    }
}

/// Health check
pub async fn health_check<G: PaymentGatewayPort, S: OrderStorePort>(
    State(state): State<AppState<G, S>>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "checkout-relay",
            "environment": state.environment,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_failed_is_never_a_client_error() {
        let status = status_for(&CheckoutError::CommitFailed("contention".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping_by_kind() {
        assert_eq!(
            status_for(&CheckoutError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&CheckoutError::GatewayDecline("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&CheckoutError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&CheckoutError::GatewayUnavailable("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
