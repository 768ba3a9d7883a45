use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// This relay only ever writes orders on the success path, so `Completed`
/// is the only status it assigns; the enum exists so the document field is
/// typed rather than a free string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Transaction statuses the gateway reports that count as a valid payment.
/// Everything else (still processing, declined, voided) is not valid but is
/// not an error either.
const VALID_TRANSACTION_STATUSES: &[&str] = &["settled", "submitted_for_settlement"];

/// Whether a gateway transaction status represents a captured payment
pub fn is_settled(status: &str) -> bool {
    VALID_TRANSACTION_STATUSES.contains(&status)
}
