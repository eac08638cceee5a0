//! Short-circuiting setter pipeline
//!
//! Entities apply their setters in a fixed order. The first setter that
//! rejects its candidate stops the pipeline; later fields are neither
//! validated nor assigned, and only that first field is reported.

use std::fmt;

/// The first field rejected by a setter, with its fixed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why applying a payload to an entity stopped
#[derive(Debug)]
pub enum ApplyError {
    /// A setter rejected its value
    Rejected(FieldViolation),

    /// A foreign-key lookup could not reach the store
    Lookup(anyhow::Error),
}

impl From<FieldViolation> for ApplyError {
    fn from(violation: FieldViolation) -> Self {
        ApplyError::Rejected(violation)
    }
}

impl From<anyhow::Error> for ApplyError {
    fn from(err: anyhow::Error) -> Self {
        ApplyError::Lookup(err)
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::Rejected(violation) => write!(f, "{}", violation),
            ApplyError::Lookup(err) => write!(f, "reference lookup failed: {}", err),
        }
    }
}

/// Turn a setter's boolean outcome into a pipeline step
///
/// ```rust,ignore
/// require(product.set_name(&payload.name), "name", "Invalid product name")?;
/// ```
pub fn require(
    accepted: bool,
    field: &'static str,
    message: &'static str,
) -> Result<(), FieldViolation> {
    if accepted {
        Ok(())
    } else {
        Err(FieldViolation { field, message })
    }
}
