use crate::domain::errors::CheckoutResult;
use crate::domain::{Cart, Order};
use async_trait::async_trait;

/// Document store port for carts and orders.
///
/// The store is the only place the order-commit protocol's atomicity can be
/// enforced; `commit_order` must apply both writes or neither.
#[async_trait]
pub trait OrderStorePort: Send + Sync {
    /// Point read of a user's cart. Absent cart is `Ok(None)`, not an error
    async fn get_cart(&self, user_id: &str, cart_id: &str) -> CheckoutResult<Option<Cart>>;

    /// Atomically create the order document and delete its source cart.
    ///
    /// The order is keyed by transaction id with a must-not-exist
    /// precondition, so a retried commit collides instead of duplicating.
    /// Any failure maps to `CommitFailed` and leaves the store untouched.
    async fn commit_order(&self, order: &Order) -> CheckoutResult<()>;
}
