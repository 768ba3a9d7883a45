use crate::application::dto::{
    ProcessPaymentRequest, ProcessPaymentResponse, TokenResponse, VerifyPaymentResponse,
};
use crate::domain::errors::{CheckoutError, CheckoutResult};
use crate::domain::{is_settled, Order};
use crate::ports::payment_gateway_port::SaleRequest;
use crate::ports::{OrderStorePort, PaymentGatewayPort};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Checkout service.
///
/// Sequences the gateway and store calls for one request; all state lives
/// in the external systems behind the two ports.
pub struct CheckoutService<G: PaymentGatewayPort, S: OrderStorePort> {
    gateway: Arc<G>,
    store: Arc<S>,
}

impl<G: PaymentGatewayPort, S: OrderStorePort> CheckoutService<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self { gateway, store }
    }

    /// Request a fresh client token from the gateway
    pub async fn generate_token(
        &self,
        merchant_account_id: Option<&str>,
    ) -> CheckoutResult<TokenResponse> {
        debug!(
            "Generating client token (merchant account: {})",
            merchant_account_id.unwrap_or("default")
        );

        let token = self.gateway.generate_token(merchant_account_id).await?;
        Ok(TokenResponse { token })
    }

    /// Run one checkout attempt: charge, read the cart, commit the order.
    ///
    /// Validation happens before any external call. After the charge is
    /// captured, any failure leaves money taken with no order on record;
    /// those paths log the transaction id for manual reconciliation.
    pub async fn process_payment(
        &self,
        request: ProcessPaymentRequest,
    ) -> CheckoutResult<ProcessPaymentResponse> {
        // 1. Reject incomplete requests before touching gateway or store
        let attempt = request.validate()?;

        info!(
            "Processing payment of {} for user {} cart {}",
            attempt.amount, attempt.user_id, attempt.cart_id
        );

        // 2. Submit the charge
        let sale = self
            .gateway
            .submit_sale(SaleRequest {
                amount: attempt.amount.clone(),
                payment_method_nonce: attempt.payment_method_nonce,
            })
            .await?;

        // 3. A decline is a business outcome, surfaced with the gateway's
        //    own message; nothing has been captured
        if !sale.success {
            let message = sale
                .message
                .unwrap_or_else(|| "Payment declined".to_string());
            info!("Sale declined for user {}: {}", attempt.user_id, message);
            return Err(CheckoutError::GatewayDecline(message));
        }

        let transaction_id = sale.transaction_id.ok_or_else(|| {
            CheckoutError::GatewayUnavailable(
                "Gateway reported success without a transaction id".to_string(),
            )
        })?;
        let amount = sale.amount.unwrap_or(attempt.amount);

        // 4. Read the cart that seeds the order. From here on the payment
        //    is already captured, so an absent cart is unbooked money
        let cart = self
            .store
            .get_cart(&attempt.user_id, &attempt.cart_id)
            .await?
            .ok_or_else(|| {
                error!(
                    "Cart {}/{} not found after capture; transaction {} ({}) needs manual reconciliation",
                    attempt.user_id, attempt.cart_id, transaction_id, amount
                );
                CheckoutError::NotFound(format!(
                    "Cart {} not found for user {}",
                    attempt.cart_id, attempt.user_id
                ))
            })?;

        // 5. Compose the order and commit it atomically with the cart delete
        let order = Order::new(
            transaction_id,
            amount,
            cart,
            attempt.session_id,
            sale.customer_email,
            sale.shipping_address,
        )?;

        self.store.commit_order(&order).await.inspect_err(|e| {
            error!(
                "Order commit failed after capture; transaction {} ({}) needs manual reconciliation: {}",
                order.transaction_id, order.amount, e
            );
        })?;

        info!(
            "Order {} committed for user {}",
            order.transaction_id, order.user_id
        );

        Ok(ProcessPaymentResponse {
            success: true,
            transaction_id: order.transaction_id,
            amount: order.amount,
        })
    }

    /// Look up a prior transaction and report whether it settled
    pub async fn verify_payment(&self, transaction_id: &str) -> CheckoutResult<VerifyPaymentResponse> {
        info!("Verifying transaction {}", transaction_id);

        let transaction = self.gateway.find_transaction(transaction_id).await?;

        Ok(VerifyPaymentResponse {
            is_valid: is_settled(&transaction.status),
            status: transaction.status,
            amount: transaction.amount,
        })
    }
}
