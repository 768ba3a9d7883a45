pub mod checkout_service;
pub mod dto;

pub use checkout_service::CheckoutService;
pub use dto::{
    PaymentAttempt, ProcessPaymentRequest, ProcessPaymentResponse, TokenResponse,
    VerifyPaymentResponse,
};
