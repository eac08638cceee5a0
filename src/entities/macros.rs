//! Macros for reducing boilerplate when defining entities
//!
//! Every catalog record shares the same bookkeeping columns. The macro
//! injects them, derives serde, and implements [`Entity`](crate::core::Entity)
//! so each entity module only declares its own fields, setters and search
//! rules.

/// Declare a record struct with base fields and an `Entity` implementation
///
/// # Example
///
/// ```rust,ignore
/// impl_data_entity!(
///     Brand,
///     "brand",
///     "brands",
///     "Brand",
///     {
///         name: String,
///         description: String,
///     }
/// );
///
/// let brand = Brand::new(generate_id());
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        $label:expr,
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Surrogate identifier
            pub id: u32,

            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was soft-deleted (if applicable)
            #[serde(default)]
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,

            $( $(#[$field_meta])* pub $field : $field_type ),*
        }

        impl $type {
            /// Create an empty record with the given id and fresh timestamps
            pub fn new(id: u32) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                    $( $field: ::std::default::Default::default() ),*
                }
            }

            /// Mark this record as deleted without removing it
            pub fn soft_delete(&mut self) {
                let now = ::chrono::Utc::now();
                self.deleted_at = Some(now);
                self.updated_at = now;
            }

            /// Clear the soft-delete marker
            pub fn restore(&mut self) {
                self.deleted_at = None;
                self.updated_at = ::chrono::Utc::now();
            }
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn label() -> &'static str {
                $label
            }

            fn id(&self) -> u32 {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
