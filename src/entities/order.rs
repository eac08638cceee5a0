//! Order entity

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{check_date, check_float, check_in_set};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::record::{Record, SetterContext};
use crate::entities::user::User;
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    Order,
    "order",
    "orders",
    "Order",
    {
        /// Customer who placed the order
        user_id: u32,
        /// `YYYY-MM-DD`
        order_date: String,
        total_amount: f64,
        status: String,
    }
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPayload {
    pub user_id: u32,
    pub order_date: String,
    pub total_amount: f64,
    pub status: String,
}

impl Order {
    pub async fn set_user_id(
        &mut self,
        user_id: u32,
        users: &dyn DataService<User>,
    ) -> anyhow::Result<bool> {
        if !users.exists(user_id).await? {
            return Ok(false);
        }
        self.user_id = user_id;
        Ok(true)
    }

    pub fn set_order_date(&mut self, order_date: &str) -> bool {
        if !check_date(order_date) {
            return false;
        }
        self.order_date = order_date.to_string();
        true
    }

    pub fn set_total_amount(&mut self, total_amount: f64) -> bool {
        if !check_float(total_amount) {
            return false;
        }
        self.total_amount = total_amount;
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

impl Data for Order {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::id("user_id"),
            SearchField::exact("order_date"),
            SearchField::status("status"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "user_id" => Some(FieldValue::from(self.user_id)),
            "order_date" => Some(FieldValue::from(self.order_date.as_str())),
            "total_amount" => Some(FieldValue::from(self.total_amount)),
            "status" => Some(FieldValue::from(self.status.as_str())),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for Order {
    type Payload = OrderPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.orders
    }

    fn blank(id: u32) -> Self {
        Order::new(id)
    }

    async fn apply(
        &mut self,
        payload: &OrderPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        require(
            self.set_user_id(payload.user_id, ctx.stores.users.as_ref())
                .await?,
            "user_id",
            "User not found",
        )?;
        require(
            self.set_order_date(&payload.order_date),
            "order_date",
            "Invalid order date",
        )?;
        require(
            self.set_total_amount(payload.total_amount),
            "total_amount",
            "Invalid total amount",
        )?;
        require(
            self.set_status(&payload.status, &ctx.vocabulary.order_statuses),
            "status",
            "Invalid order status",
        )?;
        Ok(())
    }
}
