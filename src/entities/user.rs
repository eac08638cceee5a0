//! User entity
//!
//! Usernames and emails are unique among live users. The password is kept
//! as submitted (login compares it verbatim) and never leaves the service
//! in a response body.

use crate::core::field::FieldValue;
use crate::core::search::SearchField;
use crate::core::validation::validators::{
    MAX_TEXT_LEN, check_email, check_in_set, check_optional_string, check_password, check_string,
};
use crate::core::validation::{ApplyError, require};
use crate::core::{Data, DataService};
use crate::entities::record::{Record, SetterContext};
use crate::storage::Stores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

crate::impl_data_entity!(
    User,
    "user",
    "users",
    "User",
    {
        username: String,
        password: String,
        email: String,
        first_name: String,
        last_name: String,
        address: String,
        role: String,
    }
);

/// Request body for registering or updating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub role: String,
}

impl User {
    pub fn set_username(&mut self, username: &str) -> bool {
        if !check_string(username, MAX_TEXT_LEN) {
            return false;
        }
        self.username = username.to_string();
        true
    }

    pub fn set_password(&mut self, password: &str, specials: &str) -> bool {
        if !check_password(password, specials) {
            return false;
        }
        self.password = password.to_string();
        true
    }

    pub fn set_email(&mut self, email: &str) -> bool {
        if !check_string(email, MAX_TEXT_LEN) || !check_email(email) {
            return false;
        }
        self.email = email.to_string();
        true
    }

    pub fn set_first_name(&mut self, first_name: &str) -> bool {
        if !check_string(first_name, MAX_TEXT_LEN) {
            return false;
        }
        self.first_name = first_name.to_string();
        true
    }

    pub fn set_last_name(&mut self, last_name: &str) -> bool {
        if !check_string(last_name, MAX_TEXT_LEN) {
            return false;
        }
        self.last_name = last_name.to_string();
        true
    }

    pub fn set_address(&mut self, address: &str) -> bool {
        if !check_optional_string(address, MAX_TEXT_LEN) {
            return false;
        }
        self.address = address.to_string();
        true
    }

    pub fn set_role(&mut self, role: &str, roles: &[String]) -> bool {
        if !check_in_set(role, roles) {
            return false;
        }
        self.role = role.to_string();
        true
    }
}

impl Data for User {
    fn indexed_fields() -> &'static [SearchField] {
        const FIELDS: &[SearchField] = &[
            SearchField::id("id"),
            SearchField::contains("username"),
            SearchField::contains("email"),
            SearchField::contains("first_name"),
            SearchField::contains("last_name"),
            SearchField::contains("address"),
            SearchField::exact("role"),
        ];
        FIELDS
    }

    fn unique_fields() -> &'static [&'static str] {
        &["username", "email"]
    }

    fn redacted_fields() -> &'static [&'static str] {
        &["password"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::from(self.id)),
            "username" => Some(FieldValue::from(self.username.as_str())),
            "email" => Some(FieldValue::from(self.email.as_str())),
            "first_name" => Some(FieldValue::from(self.first_name.as_str())),
            "last_name" => Some(FieldValue::from(self.last_name.as_str())),
            "address" => Some(FieldValue::from(self.address.as_str())),
            "role" => Some(FieldValue::from(self.role.as_str())),
            _ => None,
        }
    }
}

#[async_trait]
impl Record for User {
    type Payload = UserPayload;

    // Registration
    const PUBLIC_CREATE: bool = true;

    fn service(stores: &Stores) -> &Arc<dyn DataService<Self>> {
        &stores.users
    }

    fn blank(id: u32) -> Self {
        User::new(id)
    }

    async fn apply(
        &mut self,
        payload: &UserPayload,
        ctx: &SetterContext<'_>,
    ) -> Result<(), ApplyError> {
        let vocabulary = ctx.vocabulary;

        require(self.set_username(&payload.username), "username", "Invalid username")?;
        require(
            self.set_password(&payload.password, &vocabulary.password_specials),
            "password",
            "Password must be at least 8 characters and contain a digit, an uppercase letter, a lowercase letter and a special character",
        )?;
        require(self.set_email(&payload.email), "email", "Invalid email")?;
        require(
            self.set_first_name(&payload.first_name),
            "first_name",
            "Invalid first name",
        )?;
        require(
            self.set_last_name(&payload.last_name),
            "last_name",
            "Invalid last name",
        )?;
        require(self.set_address(&payload.address), "address", "Invalid address")?;
        require(
            self.set_role(&payload.role, &vocabulary.roles),
            "role",
            "Invalid role",
        )?;
        Ok(())
    }
}
