pub mod braintree_gateway;
pub mod firestore_store;

pub use braintree_gateway::BraintreeGateway;
pub use firestore_store::FirestoreStore;
