//! Server module for building the catalog HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD and search routes for all nine entities
//! - The login route and bearer-token guard
//! - A health route

pub mod auth;
pub mod builder;
pub mod entity_registry;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry, RecordDescriptor};
pub use handlers::AppState;
