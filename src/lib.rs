//! # Shopfront
//!
//! REST backend for an e-commerce catalog: users, brands, categories,
//! products, orders, order items, payments, shipping details and reviews.
//!
//! ## Features
//!
//! - **Generic Repository**: one CRUD and search engine driven by per-entity descriptors
//! - **Ordered Setters**: field-by-field validation, first failure reported
//! - **Foreign-Key Checks**: references must point at live records
//! - **Typed Search**: per-field matching policy, unknown criteria ignored
//! - **Bearer Tokens**: HS256 JWT login with a guard on every entity route
//! - **Pluggable Storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopfront::prelude::*;
//!
//! let config = AppConfig::from_yaml_file("shopfront.yaml")?.apply_env()?;
//! ServerBuilder::new(config)
//!     .with_stores(Stores::in_memory())
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod repository;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, Claims},
        entity::{Data, Entity},
        error::ShopError,
        field::FieldValue,
        search::{Filter, SearchCriteria, SearchField},
        service::DataService,
    };

    // === Entities ===
    pub use crate::entities::{
        Brand, Category, Order, OrderItem, Payment, Product, Record, Review, ShippingDetails,
        User,
    };

    // === Macros ===
    pub use crate::impl_data_entity;

    // === Repository ===
    pub use crate::repository::Repository;

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, Stores};
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresDataService, ensure_schema};

    // === Config ===
    pub use crate::config::{AppConfig, AuthConfig, ServerConfig, Vocabulary};

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
