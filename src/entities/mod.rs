//! Catalog entities and the macro that declares their bookkeeping fields

#[macro_use]
pub mod macros;

pub mod brand;
pub mod category;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod record;
pub mod review;
pub mod shipping_details;
pub mod user;

pub use brand::{Brand, BrandPayload};
pub use category::{Category, CategoryPayload};
pub use order::{Order, OrderPayload};
pub use order_item::{OrderItem, OrderItemPayload};
pub use payment::{Payment, PaymentPayload};
pub use product::{Product, ProductPayload};
pub use record::{Record, SetterContext};
pub use review::{Review, ReviewPayload};
pub use shipping_details::{ShippingDetails, ShippingDetailsPayload};
pub use user::{User, UserPayload};
