use crate::domain::errors::{CheckoutError, CheckoutResult};
use crate::domain::value_objects::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment method label written on every order this relay creates
pub const PAYMENT_METHOD_LABEL: &str = "Braintree";

/// A user's pending cart, read once at checkout and deleted on commit.
///
/// Line items are opaque structured data owned by the storefront; this
/// relay copies them into the order verbatim and never inspects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    pub cart_id: String,
    pub products: Vec<serde_json::Value>,
}

/// A committed order, keyed by the gateway transaction id.
///
/// Created exactly once per successful sale, atomically paired with the
/// deletion of the source cart, and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Gateway transaction id, doubles as the document primary key
    pub transaction_id: String,

    pub user_id: String,

    pub cart_id: String,

    /// Client session id, passed through when supplied
    pub session_id: Option<String>,

    /// Settled amount as the gateway's decimal string
    pub amount: String,

    /// Line items copied verbatim from the cart snapshot
    pub products: Vec<serde_json::Value>,

    /// Server-assigned creation time, never client-supplied
    pub created_at: DateTime<Utc>,

    pub status: OrderStatus,

    pub payment_method: String,

    pub customer_email: Option<String>,

    pub shipping_address: Option<serde_json::Value>,
}

impl Order {
    /// Compose an order from a successful sale and the cart it consumes.
    ///
    /// The caller has already branched on the sale's success flag; this
    /// constructor enforces the remaining preconditions of the commit.
    pub fn new(
        transaction_id: String,
        amount: String,
        cart: Cart,
        session_id: Option<String>,
        customer_email: Option<String>,
        shipping_address: Option<serde_json::Value>,
    ) -> CheckoutResult<Self> {
        if transaction_id.is_empty() {
            return Err(CheckoutError::Validation(
                "Transaction id must not be empty".to_string(),
            ));
        }

        if amount.is_empty() {
            return Err(CheckoutError::Validation(
                "Amount must not be empty".to_string(),
            ));
        }

        Ok(Self {
            transaction_id,
            user_id: cart.user_id,
            cart_id: cart.cart_id,
            session_id,
            amount,
            products: cart.products,
            created_at: Utc::now(),
            status: OrderStatus::Completed,
            payment_method: PAYMENT_METHOD_LABEL.to_string(),
            customer_email,
            shipping_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cart() -> Cart {
        Cart {
            user_id: "U1".to_string(),
            cart_id: "C1".to_string(),
            products: vec![json!({"sku": "A", "qty": 1})],
        }
    }

    #[test]
    fn test_order_composed_from_sale_and_cart() {
        let order = Order::new(
            "TX1".to_string(),
            "25.00".to_string(),
            sample_cart(),
            Some("sess-1".to_string()),
            Some("payer@example.com".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(order.transaction_id, "TX1");
        assert_eq!(order.user_id, "U1");
        assert_eq!(order.cart_id, "C1");
        assert_eq!(order.amount, "25.00");
        assert_eq!(order.products, vec![json!({"sku": "A", "qty": 1})]);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_method, "Braintree");
        assert_eq!(order.customer_email.as_deref(), Some("payer@example.com"));
    }

    #[test]
    fn test_order_rejects_empty_transaction_id() {
        let result = Order::new(
            String::new(),
            "25.00".to_string(),
            sample_cart(),
            None,
            None,
            None,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_order_rejects_empty_amount() {
        let result = Order::new(
            "TX1".to_string(),
            String::new(),
            sample_cart(),
            None,
            None,
            None,
        );

        assert!(result.is_err());
    }
}
