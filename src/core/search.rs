//! Search criteria parsing and filter matching
//!
//! A search request arrives as a mapping of field name to raw string value.
//! Each entity declares which fields it accepts and how they match; the
//! criteria are turned into typed [`Filter`]s that every store evaluates
//! conjunctively.
//!
//! Unknown field names and values that fail to parse for the field's type are
//! dropped from the filter. An empty filter list matches every live record.

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use indexmap::IndexMap;

/// Raw search parameters as received from the query string
pub type SearchCriteria = IndexMap<String, String>;

/// How the criterion value is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned 32-bit identifier (ids and foreign keys)
    Id,
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
    /// Free text
    Text,
}

/// How a stored value is compared with the criterion value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Stored value equals the criterion
    Exact,
    /// Stored text contains the criterion (case-sensitive)
    Contains,
    /// Both sides are lower-cased before the containment check
    LowercaseContains,
}

/// A searchable field declared by an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub policy: MatchPolicy,
}

impl SearchField {
    /// Identifier or foreign key, exact match
    pub const fn id(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Id,
            policy: MatchPolicy::Exact,
        }
    }

    /// Integer, exact match
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            policy: MatchPolicy::Exact,
        }
    }

    /// Float, exact match
    pub const fn float(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Float,
            policy: MatchPolicy::Exact,
        }
    }

    /// Enumerated or date text, exact match
    pub const fn exact(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            policy: MatchPolicy::Exact,
        }
    }

    /// Free text, substring match
    pub const fn contains(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            policy: MatchPolicy::Contains,
        }
    }

    /// Status text, lower-cased substring match
    pub const fn status(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            policy: MatchPolicy::LowercaseContains,
        }
    }

    /// Parse a raw criterion into a typed value, or `None` on type mismatch
    fn parse(&self, raw: &str) -> Option<FieldValue> {
        match self.kind {
            FieldKind::Id => raw.parse::<u32>().ok().map(FieldValue::from),
            FieldKind::Integer => raw.parse::<i64>().ok().map(FieldValue::Integer),
            FieldKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Float),
            FieldKind::Text => match self.policy {
                MatchPolicy::LowercaseContains => Some(FieldValue::String(raw.to_lowercase())),
                _ => Some(FieldValue::String(raw.to_string())),
            },
        }
    }
}

/// A single typed condition applied by a store
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub policy: MatchPolicy,
    pub value: FieldValue,
}

impl Filter {
    /// Exact-equality filter, used for point lookups such as login by username
    pub fn exact(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            policy: MatchPolicy::Exact,
            value: value.into(),
        }
    }

    /// Check whether a stored value satisfies this filter
    pub fn matches(&self, stored: Option<&FieldValue>) -> bool {
        let Some(stored) = stored else {
            return false;
        };

        match self.policy {
            MatchPolicy::Exact => match (&self.value, stored) {
                (FieldValue::String(want), FieldValue::String(have)) => want == have,
                (FieldValue::Integer(want), FieldValue::Integer(have)) => want == have,
                (FieldValue::Float(want), other) => other.as_float() == Some(*want),
                _ => false,
            },
            MatchPolicy::Contains => match (&self.value, stored) {
                (FieldValue::String(want), FieldValue::String(have)) => have.contains(want.as_str()),
                _ => false,
            },
            MatchPolicy::LowercaseContains => match (&self.value, stored) {
                (FieldValue::String(want), FieldValue::String(have)) => {
                    have.to_lowercase().contains(&want.to_lowercase())
                }
                _ => false,
            },
        }
    }
}

/// Turn raw criteria into filters for the entity's declared search fields
///
/// Unsupported names and unparseable values are skipped.
pub fn build_filters<T: Data>(criteria: &SearchCriteria) -> Vec<Filter> {
    let fields = T::indexed_fields();
    let mut filters = Vec::with_capacity(criteria.len());

    for (name, raw) in criteria {
        let Some(field) = fields.iter().find(|f| f.name == name.as_str()) else {
            tracing::debug!(
                entity = T::resource_name_singular(),
                field = %name,
                "ignoring unsupported search field"
            );
            continue;
        };

        match field.parse(raw) {
            Some(value) => filters.push(Filter {
                field: field.name,
                policy: field.policy,
                value,
            }),
            None => tracing::debug!(
                entity = T::resource_name_singular(),
                field = %name,
                value = %raw,
                "dropping search criterion with mismatched type"
            ),
        }
    }

    filters
}

/// Check that an entity satisfies every filter
pub fn matches_all<T: Data>(entity: &T, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|filter| filter.matches(entity.field_value(filter.field).as_ref()))
}
