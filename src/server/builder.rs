//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::handlers::AppState;
use super::router::build_router;
use crate::config::AppConfig;
use crate::entities::{
    Brand, Category, Order, OrderItem, Payment, Product, Review, ShippingDetails, User,
};
use crate::storage::Stores;
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(AppConfig::default())
///     .with_stores(Stores::in_memory())
///     .build();
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    stores: Option<Stores>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder serving all nine catalog entities
    pub fn new(config: AppConfig) -> Self {
        let mut entity_registry = EntityRegistry::new();
        entity_registry.register_record::<User>();
        entity_registry.register_record::<Brand>();
        entity_registry.register_record::<Category>();
        entity_registry.register_record::<Product>();
        entity_registry.register_record::<Order>();
        entity_registry.register_record::<OrderItem>();
        entity_registry.register_record::<Payment>();
        entity_registry.register_record::<ShippingDetails>();
        entity_registry.register_record::<Review>();

        Self {
            config,
            stores: None,
            entity_registry,
            custom_routes: Vec::new(),
        }
    }

    /// Set the stores backing every entity
    ///
    /// Defaults to fresh in-memory stores.
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Add routes that don't fit the CRUD pattern
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        let stores = self.stores.unwrap_or_else(Stores::in_memory);
        let state = AppState::new(stores, self.config);

        self.custom_routes
            .into_iter()
            .fold(build_router(state, &self.entity_registry), |app, routes| {
                app.merge(routes)
            })
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured host and port and handles SIGTERM and
    /// SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let app = self.build();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
