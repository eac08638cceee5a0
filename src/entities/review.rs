//! Product review
//!
//! A review ties one user to one product with a 0-5 rating. Nothing stops a
//! user from reviewing the same product twice.

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{
    MAX_LONG_TEXT_LEN, check_date, check_optional_string, check_rating,
};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::product::Product;
use crate::entities::record::{Record, SetterContext};
use crate::entities::user::User;
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    Review,
    "review",
    "reviews",
    "Review",
    {
        product_id: u32,
        user_id: u32,
        rating: u8,
        comment: String,
        review_date: String,
    }
);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    pub product_id: u32,
    pub user_id: u32,
    /// Wide so out-of-range values reach the setter instead of failing JSON parsing
    pub rating: i64,
    pub comment: String,
    pub review_date: String,
}

impl Review {
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

    pub fn set_rating(&mut self, rating: i64) -> bool {
        if !check_rating(rating) {
            return false;
        }
        match u8::try_from(rating) {
            Ok(rating) => {
                self.rating = rating;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_comment(&mut self, comment: &str) -> bool {
        if !check_optional_string(comment, MAX_LONG_TEXT_LEN) {
            return false;
        }
        self.comment = comment.to_string();
        true
    }

    pub fn set_review_date(&mut self, review_date: &str) -> bool {
        if !check_date(review_date) {
            return false;
        }
        self.review_date = review_date.to_string();
        true
    }
}

impl Data for Review {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::id("product_id"),
            SearchField::id("user_id"),
            SearchField::integer("rating"),
            SearchField::contains("comment"),
        ];
        FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "product_id" => Some(FieldValue::from(self.product_id)),
            "user_id" => Some(FieldValue::from(self.user_id)),
            "rating" => Some(FieldValue::from(i64::from(self.rating))),
            "comment" => Some(FieldValue::from(self.comment.as_str())),
            "review_date" => Some(FieldValue::from(self.review_date.as_str())),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for Review {
    type Payload = ReviewPayload;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.reviews
    }

    fn blank(id: u32) -> Self {
        Review::new(id)
    }

    async fn apply(
        &mut self,
        payload: &ReviewPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        require(
            self.set_product_id(payload.product_id, ctx.stores.products.as_ref())
                .await?,
            "product_id",
            "Product not found",
        )?;
        require(
            self.set_user_id(payload.user_id, ctx.stores.users.as_ref())
                .await?,
            "user_id",
            "User not found",
        )?;
        require(
            self.set_rating(payload.rating),
            "rating",
            "Rating must be between 0 and 5",
        )?;
        require(self.set_comment(&payload.comment), "comment", "Invalid comment")?;
        require(
            self.set_review_date(&payload.review_date),
            "review_date",
            "Invalid review date",
        )?;
        Ok(())
    }
}
