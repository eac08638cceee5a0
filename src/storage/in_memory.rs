//! In-memory implementation of DataService for testing and development

use crate::core::search::{Filter, matches_all};
use crate::core::{Data, DataService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// In-memory data service implementation
///
/// Records are kept ordered by id, so listings and search results come back
/// in ascending id order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<BTreeMap<u32, T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the first unique field `candidate` shares with another live record
fn unique_conflict<'a, T: Data>(
    records: impl Iterator<Item = &'a T>,
    candidate: &T,
) -> Option<&'static str> {
    let live: Vec<&T> = records
        .filter(|r| !r.is_deleted() && r.id() != candidate.id())
        .collect();

    T::unique_fields().iter().copied().find(|field| {
        let value = candidate.field_value(field);
        value.is_some() && live.iter().any(|r| r.field_value(field) == value)
    })
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.contains_key(&entity.id()) {
            return Err(anyhow!(
                "Duplicate {} id: {}",
                T::resource_name_singular(),
                entity.id()
            ));
        }
        if let Some(field) = unique_conflict(records.values(), &entity) {
            return Err(anyhow!(
                "Duplicate {} {}",
                T::resource_name_singular(),
                field
            ));
        }

        records.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: u32) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(&id).filter(|r| !r.is_deleted()).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().filter(|r| !r.is_deleted()).cloned().collect())
    }

    async fn update(&self, id: u32, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !records.get(&id).is_some_and(|r| !r.is_deleted()) {
            return Err(anyhow!("{} not found: {}", T::label(), id));
        }
        if let Some(field) = unique_conflict(records.values(), &entity) {
            return Err(anyhow!(
                "Duplicate {} {}",
                T::resource_name_singular(),
                field
            ));
        }

        records.insert(id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: u32) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.remove(&id);

        Ok(())
    }

    async fn search(&self, filters: &[Filter]) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .values()
            .filter(|r| !r.is_deleted() && matches_all(*r, filters))
            .cloned()
            .collect())
    }
}
