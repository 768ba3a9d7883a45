use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router<G, S>(state: AppState<G, S>) -> Router
where
    G: crate::ports::PaymentGatewayPort + 'static,
    S: crate::ports::OrderStorePort + 'static,
{
    Router::new()
        .route("/", get(health_check))
        .route(
            "/generate-braintree-token",
            get(generate_token).post(generate_scoped_token),
        )
        .route("/process_payment", post(process_payment))
        .route("/verify_payment", get(verify_payment))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
