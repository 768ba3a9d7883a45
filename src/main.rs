mod api;
mod application;
mod domain;
mod infrastructure;
mod ports;

use api::AppState;
use application::CheckoutService;
use infrastructure::{BraintreeConfig, BraintreeGateway, FirestoreConfig, FirestoreStore};
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    info!("Starting checkout relay...");

    let braintree_config = BraintreeConfig::from_env();
    info!(
        "Braintree configured for merchant {} ({})",
        braintree_config.merchant_id, braintree_config.environment
    );

    let firestore_config = FirestoreConfig::from_env();
    info!(
        "Firestore configured for project {}",
        firestore_config.project_id
    );

    let gateway = Arc::new(BraintreeGateway::new(braintree_config.clone()));
    let store = Arc::new(FirestoreStore::new(firestore_config));

    let checkout_service = Arc::new(CheckoutService::new(gateway, store));

    let app_state = AppState {
        checkout_service,
        merchant_account_id: braintree_config.merchant_account_id.clone(),
        environment: braintree_config.environment.clone(),
    };

    let app = api::create_router(app_state);

    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    info!("Server listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET  / - Health check");
    info!("  GET  /generate-braintree-token - Client token");
    info!("  POST /generate-braintree-token - Client token (merchant account scope)");
    info!("  POST /process_payment - Charge and commit order");
    info!("  GET  /verify_payment - Transaction status lookup");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
