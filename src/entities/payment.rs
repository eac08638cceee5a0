//! Payment entity

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{check_date, check_float, check_in_set};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::order::Order;
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    Payment,
    "payment",
    "payments",
    "Payment",
    {
        order_id: u32,
        payment_method: String,
        amount: f64,
        payment_date: String,
        status: String,
    }
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentPayload {
    pub order_id: u32,
    pub payment_method: String,
    pub amount: f64,
    pub payment_date: String,
    pub status: String,
}

impl Payment {
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

    pub fn set_payment_method(&mut self, method: &str, methods: &[String]) -> bool {
        if !check_in_set(method, methods) {
            return false;
        }
        self.payment_method = method.to_string();
        true
    }

    pub fn set_amount(&mut self, amount: f64) -> bool {
        if !check_float(amount) {
            return false;
        }
        self.amount = amount;
        true
    }

    pub fn set_payment_date(&mut self, payment_date: &str) -> bool {
        if !check_date(payment_date) {
            return false;
        }
        self.payment_date = payment_date.to_string();
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

impl Data for Payment {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::id("order_id"),
            SearchField::exact("payment_method"),
            SearchField::exact("payment_date"),
            SearchField::status("status"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "order_id" => Some(FieldValue::from(self.order_id)),
            "payment_method" => Some(FieldValue::from(self.payment_method.as_str())),
            "amount" => Some(FieldValue::from(self.amount)),
            "payment_date" => Some(FieldValue::from(self.payment_date.as_str())),
            "status" => Some(FieldValue::from(self.status.as_str())),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for Payment {
    type Payload = PaymentPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.payments
    }

    fn blank(id: u32) -> Self {
        Payment::new(id)
    }

    async fn apply(
        &mut self,
        payload: &PaymentPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        let vocabulary = ctx.vocabulary;

        require(
            self.set_order_id(payload.order_id, ctx.stores.orders.as_ref())
                .await?,
            "order_id",
            "Order not found",
        )?;
        require(
            self.set_payment_method(&payload.payment_method, &vocabulary.payment_methods),
            "payment_method",
            "Invalid payment method",
        )?;
        require(self.set_amount(payload.amount), "amount", "Invalid amount")?;
        require(
            self.set_payment_date(&payload.payment_date),
            "payment_date",
            "Invalid payment date",
        )?;
        require(
            self.set_status(&payload.status, &vocabulary.payment_statuses),
            "status",
            "Invalid payment status",
        )?;
        Ok(())
    }
}
