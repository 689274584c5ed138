//! Validation and coercion system
//!
//! This module provides a declarative approach to turning raw form fields into
//! typed values. A [`Schema`] lists one [`FieldRule`] per field; each rule
//! coerces the raw text and then runs its validators, and the schema gathers
//! every failure into a per-field message map.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::{FieldRule, Schema};
