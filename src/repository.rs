//! Generic repository functions shared by every entity
//!
//! One engine drives all nine entities: it asks the [`Record`] descriptor for
//! the store and the setter pipeline, and turns store and validation failures
//! into [`ShopError`]s with the right status.

use crate::config::Vocabulary;
use crate::core::error::{EntityError, Operation, StorageError, ValidationError};
use crate::core::ids::generate_id;
use crate::core::search::{SearchCriteria, build_filters};
use crate::core::validation::ApplyError;
use crate::core::{DataService, ShopError};
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error};

/// Repository over the store of a single entity type
pub struct Repository<'a, T: Record> {
    stores: &'a Stores,
    vocabulary: &'a Vocabulary,
    _marker: PhantomData<T>,
}

impl<'a, T: Record> Repository<'a, T> {
    pub fn new(stores: &'a Stores, vocabulary: &'a Vocabulary) -> Self {
        Self {
            stores,
            vocabulary,
            _marker: PhantomData,
        }
    }

    fn service(&self) -> &Arc<dyn DataService<T>> {
        T::service(self.stores)
    }

    fn context(&self) -> SetterContext<'a> {
        SetterContext {
            stores: self.stores,
            vocabulary: self.vocabulary,
        }
    }

    fn store_failure(operation: Operation, err: anyhow::Error) -> ShopError {
        error!(
            entity = T::resource_name_singular(),
            ?operation,
            error = %err,
            "store operation failed"
        );
        StorageError::failed::<T>(operation, err).into()
    }

    fn rejected(operation: Operation, err: ApplyError) -> ShopError {
        match err {
            ApplyError::Rejected(violation) => {
                debug!(
                    entity = T::resource_name_singular(),
                    field = violation.field,
                    reason = violation.message,
                    "payload rejected"
                );
                ValidationError::Field(violation).into()
            }
            ApplyError::Lookup(err) => Self::store_failure(operation, err),
        }
    }

    /// Every live record; an empty store yields an empty list
    pub async fn get_all(&self) -> Result<Vec<T>, ShopError> {
        self.service()
            .list()
            .await
            .map_err(|e| Self::store_failure(Operation::Retrieve, e))
    }

    pub async fn get_by_id(&self, id: u32) -> Result<T, ShopError> {
        self.service()
            .get(id)
            .await
            .map_err(|e| Self::store_failure(Operation::Retrieve, e))?
            .ok_or_else(|| EntityError::not_found::<T>(id).into())
    }

    /// Allocate an id, run the setters, then persist
    ///
    /// The id is drawn before validation, so a rejected payload burns one.
    pub async fn create(&self, payload: &T::Payload) -> Result<T, ShopError> {
        let mut record = T::blank(generate_id());
        record
            .apply(payload, &self.context())
            .await
            .map_err(|e| Self::rejected(Operation::Create, e))?;

        self.service()
            .create(record)
            .await
            .map_err(|e| Self::store_failure(Operation::Create, e))
    }

    /// Load, overwrite every field through the setters, then save
    ///
    /// Concurrent updates to the same id race; the last write wins.
    pub async fn update(&self, id: u32, payload: &T::Payload) -> Result<T, ShopError> {
        let mut record = self.get_by_id(id).await?;
        record
            .apply(payload, &self.context())
            .await
            .map_err(|e| Self::rejected(Operation::Update, e))?;
        record.touch();

        self.service()
            .update(id, record)
            .await
            .map_err(|e| Self::store_failure(Operation::Update, e))
    }

    /// Hard-delete a live record
    pub async fn delete(&self, id: u32) -> Result<(), ShopError> {
        let exists = self
            .service()
            .exists(id)
            .await
            .map_err(|e| Self::store_failure(Operation::Delete, e))?;
        if !exists {
            return Err(EntityError::not_found::<T>(id).into());
        }

        self.service()
            .delete(id)
            .await
            .map_err(|e| Self::store_failure(Operation::Delete, e))
    }

    /// Records matching every supported criterion; an empty result is a 404
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<T>, ShopError> {
        let filters = build_filters::<T>(criteria);
        let found = self
            .service()
            .search(&filters)
            .await
            .map_err(|e| Self::store_failure(Operation::Retrieve, e))?;

        if found.is_empty() {
            return Err(EntityError::none_found::<T>().into());
        }
        Ok(found)
    }
}
