//! Order line item

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{check_float, check_int};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::order::Order;
use crate::entities::product::Product;
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    OrderItem,
    "order_item",
    "order_items",
    "Order item",
    {
        order_id: u32,
        product_id: u32,
        quantity: i64,
        subtotal: f64,
    }
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItemPayload {
    pub order_id: u32,
    pub product_id: u32,
    pub quantity: i64,
    pub subtotal: f64,
}

impl OrderItem {
    pub async fn set_order_id(
        &mut self,
        order_id: u32,
        orders: &dyn DataService<Order>,
    ) -> anyhow::Result<bool> {
        if !orders.exists(order_id).await? {
            return Ok(false);
        }
        self.order_id = order_id;
        Ok(true)
    }

    pub async fn set_product_id(
        &mut self,
        product_id: u32,
        products: &dyn DataService<Product>,
    ) -> anyhow::Result<bool> {
        if !products.exists(product_id).await? {
            return Ok(false);
        }
        self.product_id = product_id;
        Ok(true)
    }

    pub fn set_quantity(&mut self, quantity: i64) -> bool {
        if !check_int(quantity) {
            return false;
        }
        self.quantity = quantity;
        true
    }

    pub fn set_subtotal(&mut self, subtotal: f64) -> bool {
        if !check_float(subtotal) {
            return false;
        }
        self.subtotal = subtotal;
        true
    }
}

impl Data for OrderItem {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::id("order_id"),
            SearchField::id("product_id"),
            SearchField::integer("quantity"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "order_id" => Some(FieldValue::from(self.order_id)),
            "product_id" => Some(FieldValue::from(self.product_id)),
            "quantity" => Some(FieldValue::from(self.quantity)),
            "subtotal" => Some(FieldValue::from(self.subtotal)),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for OrderItem {
    type Payload = OrderItemPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.order_items
    }

    fn blank(id: u32) -> Self {
        OrderItem::new(id)
    }

    async fn apply(
        &mut self,
        payload: &OrderItemPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        require(
            self.set_order_id(payload.order_id, ctx.stores.orders.as_ref())
                .await?,
            "order_id",
            "Order not found",
        )?;
        require(
            self.set_product_id(payload.product_id, ctx.stores.products.as_ref())
                .await?,
            "product_id",
            "Product not found",
        )?;
        require(self.set_quantity(payload.quantity), "quantity", "Invalid quantity")?;
        require(self.set_subtotal(payload.subtotal), "subtotal", "Invalid subtotal")?;
        Ok(())
    }
}
