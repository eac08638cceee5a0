//! Service trait for record storage

use crate::core::Data;
use crate::core::search::Filter;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing data entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// Every read excludes soft-deleted records; `delete` removes the row
/// outright. The repository layer is agnostic to the storage mechanism.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Insert a new entity
    ///
    /// Fails when the id is taken or a unique field collides with a live record.
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a live entity by ID
    async fn get(&self, id: u32) -> Result<Option<T>>;

    /// List all live entities in store-default order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity
    async fn update(&self, id: u32, entity: T) -> Result<T>;

    /// Hard-delete an entity, bypassing the soft-delete marker
    async fn delete(&self, id: u32) -> Result<()>;

    /// Return live entities matching every filter
    ///
    /// An empty filter slice matches every live entity.
    async fn search(&self, filters: &[Filter]) -> Result<Vec<T>>;

    /// Check whether a live entity with this ID exists
    ///
    /// `Ok(false)` means absent; a store failure is reported as `Err`.
    async fn exists(&self, id: u32) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
