//! Entity traits defining the core abstraction for all catalog records

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use chrono::{DateTime, Utc};

/// Base trait for all entities in the system.
///
/// Every record carries:
/// - id: surrogate identifier (unsigned 32-bit)
/// - created_at / updated_at: bookkeeping timestamps
/// - deleted_at: soft deletion marker (optional)
///
/// Reads never return a record whose `deleted_at` is set.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "products", "order_items")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "product", "order_item")
    fn resource_name_singular() -> &'static str;

    /// Human-readable name used in error messages (e.g., "Order item")
    fn label() -> &'static str;

    // === Core Entity Fields ===

    /// Get the unique identifier for this entity instance
    fn id(&self) -> u32;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Refresh `updated_at` to the current time
    fn touch(&mut self);

    // === Utility Methods ===

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// Trait for data entities exposing their fields to search and storage.
pub trait Data: Entity {
    /// Fields accepted by the search endpoint, with their matching policy
    fn indexed_fields() -> &'static [SearchField];

    /// Fields whose value must be unique among live records
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Fields stripped from API responses
    fn redacted_fields() -> &'static [&'static str] {
        &[]
    }

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
