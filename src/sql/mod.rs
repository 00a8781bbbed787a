//! SQL utilities for query generation
//!
//! Provides metadata resolution, literal formatting and identifier sanitization.

pub mod format;
pub mod metadata;
pub mod sanitize;

pub use format::{extract_id, extract_value, quote_if_needed, quote_literal, render_value};
pub use metadata::{
    ResolvedColumn, ResolvedEntity, column_list, resolve, resolve_columns,
    resolve_identifier_field, resolve_table,
};
pub use sanitize::{SQL_RESERVED_WORDS, quote_identifier, validate_identifier};
