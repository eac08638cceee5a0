//! Field validation
//!
//! Validators are pure predicates; the pipeline turns setter outcomes into
//! the first reported violation.

pub mod pipeline;
pub mod validators;

pub use pipeline::{ApplyError, FieldViolation, require};
