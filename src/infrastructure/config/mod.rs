pub mod braintree_config;
pub mod firestore_config;

pub use braintree_config::BraintreeConfig;
pub use firestore_config::FirestoreConfig;
