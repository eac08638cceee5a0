//! Core module containing fundamental traits and types for the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod ids;
pub mod search;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, Claims};
pub use entity::{Data, Entity};
pub use error::ShopError;
pub use field::FieldValue;
pub use search::{Filter, SearchCriteria, SearchField};
pub use service::DataService;
