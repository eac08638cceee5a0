//! Router assembly

use super::auth::login;
use super::entity_registry::EntityRegistry;
use super::handlers::{AppState, health};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// - GET /health - liveness probe, always public
/// - POST /login - token issuance, always public
/// - /{plural}, /{plural}/search, /{plural}/{id} - one set per registered entity
pub fn build_router(state: AppState, registry: &EntityRegistry) -> Router {
    let cors_permissive = state.config.server.cors_permissive;

    let router = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .merge(registry.build_routes(&state))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
