//! Product entity

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{
    MAX_LONG_TEXT_LEN, MAX_TEXT_LEN, check_float, check_int, check_optional_string, check_string,
};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::brand::Brand;
use crate::entities::category::Category;
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    Product,
    "product",
    "products",
    "Product",
    {
        name: String,
        description: String,
        price: f64,
        stock_quantity: i64,
        /// References a live brand
        brand_id: u32,
        /// References a live category
        category_id: u32,
    }
);

/// Request body for creating or updating a product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub brand_id: u32,
    pub category_id: u32,
}

impl Product {
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

    pub fn set_price(&mut self, price: f64) -> bool {
        if !check_float(price) {
            return false;
        }
        self.price = price;
        true
    }

    pub fn set_stock_quantity(&mut self, stock_quantity: i64) -> bool {
        if !check_int(stock_quantity) {
            return false;
        }
        self.stock_quantity = stock_quantity;
        true
    }

    pub async fn set_brand_id(
        &mut self,
        brand_id: u32,
        brands: &dyn DataService<Brand>,
    ) -> Result<bool> {
        if !brands.exists(brand_id).await? {
            return Ok(false);
        }
        self.brand_id = brand_id;
        Ok(true)
    }

    pub async fn set_category_id(
        &mut self,
        category_id: u32,
        categories: &dyn DataService<Category>,
    ) -> Result<bool> {
        if !categories.exists(category_id).await? {
            return Ok(false);
        }
        self.category_id = category_id;
        Ok(true)
    }
}

impl Data for Product {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::contains("name"),
            SearchField::float("price"),
            SearchField::integer("stock_quantity"),
            SearchField::id("brand_id"),
            SearchField::id("category_id"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "description" => Some(FieldValue::from(self.description.as_str())),
            "price" => Some(FieldValue::from(self.price)),
            "stock_quantity" => Some(FieldValue::from(self.stock_quantity)),
            "brand_id" => Some(FieldValue::from(self.brand_id)),
            "category_id" => Some(FieldValue::from(self.category_id)),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for Product {
    type Payload = ProductPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.products
    }

    fn blank(id: u32) -> Self {
        Product::new(id)
    }

    async fn apply(
        &mut self,
        payload: &ProductPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        require(self.set_name(&payload.name), "name", "Invalid product name")?;
        require(
            self.set_description(&payload.description),
            "description",
            "Invalid product description",
        )?;
        require(self.set_price(payload.price), "price", "Invalid price")?;
        require(
            self.set_stock_quantity(payload.stock_quantity),
            "stock_quantity",
            "Invalid stock quantity",
        )?;
        require(
            self.set_brand_id(payload.brand_id, ctx.stores.brands.as_ref())
                .await?,
            "brand_id",
            "Brand not found",
        )?;
        require(
            self.set_category_id(payload.category_id, ctx.stores.categories.as_ref())
                .await?,
            "category_id",
            "Category not found",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataService;

    #[test]
    fn test_set_price_rejects_negative() {
        let mut product = Product::new(1);
        assert!(product.set_price(19.99));
        assert!(!product.set_price(-0.01));
        assert!(!product.set_price(f64::NAN));
        assert_eq!(product.price, 19.99);
    }

    #[test]
    fn test_set_stock_quantity_accepts_zero() {
        let mut product = Product::new(1);
        assert!(product.set_stock_quantity(0));
        assert!(!product.set_stock_quantity(-3));
        assert_eq!(product.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_set_brand_id_requires_existing_brand() {
        let brands = InMemoryDataService::<Brand>::new();
        let mut brand = Brand::new(7);
        brand.name = "Acme".to_string();
        brands.create(brand).await.unwrap();

        let mut product = Product::new(1);
        assert!(!product.set_brand_id(8, &brands).await.unwrap());
        assert_eq!(product.brand_id, 0);
        assert!(product.set_brand_id(7, &brands).await.unwrap());
        assert_eq!(product.brand_id, 7);
    }
}
