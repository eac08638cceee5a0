//! Per-entity descriptor consumed by the generic repository and handlers

use crate::config::Vocabulary;
use crate::core::validation::ApplyError;
use crate::core::{Data, DataService, ShopError};
use crate::storage::Stores;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// What setters may consult while applying a payload
pub struct SetterContext<'a> {
    /// Stores used for foreign-key existence checks
    pub stores: &'a Stores,

    /// Literal sets for enumerated fields
    pub vocabulary: &'a Vocabulary,
}

/// A catalog entity the generic repository can create, update and search
///
/// Implementors declare their wire payload and run their setters in a fixed
/// order inside [`Record::apply`], stopping at the first rejection.
#[async_trait]
pub trait Record: Data + Serialize + DeserializeOwned {
    /// Request body accepted by create and update
    type Payload: DeserializeOwned + Send + Sync + 'static;

    /// Whether `POST` on the collection is reachable without a bearer token
    const PUBLIC_CREATE: bool = false;

    /// The store holding this entity
    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>>;

    /// Empty record carrying a freshly allocated id
    fn blank(id: u32) -> Self;

    /// Apply every setter in order; the first rejected field ends the run
    async fn apply(
        &mut self,
        payload: &Self::Payload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError>;

    /// JSON representation returned to API callers
    fn to_response(&self) -> Result<serde_json::Value, ShopError> {
        redacted_json(self, Self::redacted_fields())
    }
}

/// Serialize `value` and drop the `redacted` keys
pub(crate) fn redacted_json<S: Serialize + ?Sized>(
    value: &S,
    redacted: &[&str],
) -> Result<serde_json::Value, ShopError> {
    let mut json = serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize response body");
        ShopError::Internal(format!("failed to serialize response: {}", e))
    })?;

    if let Some(obj) = json.as_object_mut() {
        for field in redacted {
            obj.remove(*field);
        }
    }
    Ok(json)
}
