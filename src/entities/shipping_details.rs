//! Shipping details for an order

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{MAX_TEXT_LEN, check_date, check_in_set, check_string};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::order::Order;
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    ShippingDetails,
    "shipping_details",
    "shipping_details",
    "Shipping details",
    {
        order_id: u32,
        address: String,
        shipping_date: String,
        estimated_arrival: String,
        status: String,
    }
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingDetailsPayload {
    pub order_id: u32,
    pub address: String,
    pub shipping_date: String,
    pub estimated_arrival: String,
    pub status: String,
}

impl ShippingDetails {
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

    pub fn set_address(&mut self, address: &str) -> bool {
        if !check_string(address, MAX_TEXT_LEN) {
            return false;
        }
        self.address = address.to_string();
        true
    }

    pub fn set_shipping_date(&mut self, shipping_date: &str) -> bool {
        if !check_date(shipping_date) {
            return false;
        }
        self.shipping_date = shipping_date.to_string();
        true
    }

    pub fn set_estimated_arrival(&mut self, estimated_arrival: &str) -> bool {
        if !check_date(estimated_arrival) {
            return false;
        }
        self.estimated_arrival = estimated_arrival.to_string();
        true
    }

    pub fn set_status(&mut self, status: &str, statuses: &[String]) -> bool {
        if !check_in_set(status, statuses) {
            return false;
        }
        self.status = status.to_string();
        true
    }
}

impl Data for ShippingDetails {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::id("order_id"),
            SearchField::contains("address"),
            SearchField::exact("shipping_date"),
            SearchField::exact("estimated_arrival"),
            SearchField::status("status"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "order_id" => Some(FieldValue::from(self.order_id)),
            "address" => Some(FieldValue::from(self.address.as_str())),
            "shipping_date" => Some(FieldValue::from(self.shipping_date.as_str())),
            "estimated_arrival" => Some(FieldValue::from(self.estimated_arrival.as_str())),
            "status" => Some(FieldValue::from(self.status.as_str())),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for ShippingDetails {
    type Payload = ShippingDetailsPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.shipping_details
    }

    fn blank(id: u32) -> Self {
        ShippingDetails::new(id)
    }

    async fn apply(
        &mut self,
        payload: &ShippingDetailsPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        require(
            self.set_order_id(payload.order_id, ctx.stores.orders.as_ref())
                .await?,
            "order_id",
            "Order not found",
        )?;
        require(self.set_address(&payload.address), "address", "Invalid address")?;
        require(
            self.set_shipping_date(&payload.shipping_date),
            "shipping_date",
            "Invalid shipping date",
        )?;
        require(
            self.set_estimated_arrival(&payload.estimated_arrival),
            "estimated_arrival",
            "Invalid estimated arrival date",
        )?;
        require(
            self.set_status(&payload.status, &ctx.vocabulary.shipping_statuses),
            "status",
            "Invalid shipping status",
        )?;
        Ok(())
    }
}
