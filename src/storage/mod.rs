//! Storage backends and the per-entity store set

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryDataService;
#[cfg(feature = "postgres")]
pub use postgres::{PostgresDataService, ensure_schema};

use crate::core::DataService;
use crate::entities::{
    Brand, Category, Order, OrderItem, Payment, Product, Review, ShippingDetails, User,
};
use std::sync::Arc;

/// One store per entity, shared by every request handler
///
/// Cloning is cheap; each field is reference counted.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DataService<User>>,
    pub brands: Arc<dyn DataService<Brand>>,
    pub categories: Arc<dyn DataService<Category>>,
    pub products: Arc<dyn DataService<Product>>,
    pub orders: Arc<dyn DataService<Order>>,
    pub order_items: Arc<dyn DataService<OrderItem>>,
    pub payments: Arc<dyn DataService<Payment>>,
    pub shipping_details: Arc<dyn DataService<ShippingDetails>>,
    pub reviews: Arc<dyn DataService<Review>>,
}

impl Stores {
    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryDataService::new()),
            brands: Arc::new(InMemoryDataService::new()),
            categories: Arc::new(InMemoryDataService::new()),
            products: Arc::new(InMemoryDataService::new()),
            orders: Arc::new(InMemoryDataService::new()),
            order_items: Arc::new(InMemoryDataService::new()),
            payments: Arc::new(InMemoryDataService::new()),
            shipping_details: Arc::new(InMemoryDataService::new()),
            reviews: Arc::new(InMemoryDataService::new()),
        }
    }

    /// Stores sharing one PostgreSQL pool
    ///
    /// Call [`ensure_schema`] first.
    #[cfg(feature = "postgres")]
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            users: Arc::new(PostgresDataService::new(pool.clone())),
            brands: Arc::new(PostgresDataService::new(pool.clone())),
            categories: Arc::new(PostgresDataService::new(pool.clone())),
            products: Arc::new(PostgresDataService::new(pool.clone())),
            orders: Arc::new(PostgresDataService::new(pool.clone())),
            order_items: Arc::new(PostgresDataService::new(pool.clone())),
            payments: Arc::new(PostgresDataService::new(pool.clone())),
            shipping_details: Arc::new(PostgresDataService::new(pool.clone())),
            reviews: Arc::new(PostgresDataService::new(pool)),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::in_memory()
    }
}
