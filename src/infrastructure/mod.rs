pub mod adapters;
pub mod config;

pub use adapters::{BraintreeGateway, FirestoreStore};
pub use config::{BraintreeConfig, FirestoreConfig};
