//! Entity registry for managing entity descriptors and generating CRUD routes

use axum::{
    Router,
    middleware,
    routing::{MethodRouter, get, post},
};
use std::collections::BTreeMap;
use std::marker::PhantomData;

use super::auth::require_bearer;
use super::handlers::{self, AppState};
use crate::entities::record::Record;

/// Trait that describes how to build routes for an entity
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "order_item")
    fn entity_type(&self) -> &str;

    /// The plural form used in URLs (e.g., "order_items")
    fn plural(&self) -> &str;

    /// Build the CRUD and search routes for this entity
    ///
    /// Routes other than a public create are wrapped in the bearer guard.
    fn build_routes(&self, state: &AppState) -> Router<AppState>;
}

/// Descriptor serving one [`Record`] type through the generic handlers
pub struct RecordDescriptor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> RecordDescriptor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for RecordDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> EntityDescriptor for RecordDescriptor<T> {
    fn entity_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        T::resource_name()
    }

    fn build_routes(&self, state: &AppState) -> Router<AppState> {
        let guard = middleware::from_fn_with_state(state.clone(), require_bearer);
        let plural = T::resource_name();

        let collection: MethodRouter<AppState> = if T::PUBLIC_CREATE {
            get(handlers::list::<T>)
                .route_layer(guard.clone())
                .merge(post(handlers::create::<T>))
        } else {
            get(handlers::list::<T>)
                .post(handlers::create::<T>)
                .route_layer(guard.clone())
        };

        Router::new()
            .route(&format!("/{plural}"), collection)
            .route(
                &format!("/{plural}/search"),
                get(handlers::search::<T>).route_layer(guard.clone()),
            )
            .route(
                &format!("/{plural}/{{id}}"),
                get(handlers::get::<T>)
                    .put(handlers::update::<T>)
                    .delete(handlers::delete::<T>)
                    .route_layer(guard),
            )
    }
}

/// Registry for all entities served by the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name will be used as the key.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Register the descriptor for a record type
    pub fn register_record<T: Record>(&mut self) {
        self.register(Box::new(RecordDescriptor::<T>::new()));
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self, state: &AppState) -> Router<AppState> {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(state));
        }

        router
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
