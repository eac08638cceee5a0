//! Brand entity

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{
    MAX_LONG_TEXT_LEN, MAX_TEXT_LEN, check_optional_string, check_string,
};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    Brand,
    "brand",
    "brands",
    "Brand",
    {
        name: String,
        description: String,
    }
);

/// Request body for creating or updating a brand
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandPayload {
    pub name: String,
    pub description: String,
}

impl Brand {
    pub fn set_name(&mut self, name: &str) -> bool {
        if !check_string(name, MAX_TEXT_LEN) {
            return false;
        }
        self.name = name.to_string();
        true
    }

    pub fn set_description(&mut self, description: &str) -> bool {
        if !check_optional_string(description, MAX_LONG_TEXT_LEN) {
            return false;
        }
        self.description = description.to_string();
        true
    }
}

impl Data for Brand {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[SearchField::id("id"), SearchField::contains("name")];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "description" => Some(FieldValue::from(self.description.as_str())),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for Brand {
    type Payload = BrandPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.brands
    }

    fn blank(id: u32) -> Self {
        Brand::new(id)
    }

    async fn apply(
        &mut self,
        payload: &BrandPayload,
        _ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        require(self.set_name(&payload.name), "name", "Invalid brand name")?;
        require(
            self.set_description(&payload.description),
            "description",
            "Invalid brand description",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_leaves_field_unchanged() {
        let mut brand = Brand::new(1);
        assert!(brand.set_name("Acme"));
        assert!(!brand.set_name(""));
        assert_eq!(brand.name, "Acme");
    }

    #[test]
    fn test_description_is_optional_but_bounded() {
        let mut brand = Brand::new(1);
        assert!(brand.set_description(""));
        assert!(!brand.set_description(&"x".repeat(1001)));
    }
}
