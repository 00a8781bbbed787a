//! Value extraction and literal formatting
//!
//! Reads field values off a [`Record`] and renders them as SQL literals.

use crate::config::{GeneratorConfig, NullPolicy};
use crate::entity::Record;
use crate::error::{QueryGeneratorError, Result};
use crate::sql::metadata::{ResolvedEntity, resolve_identifier_field};
use crate::types::SqlValue;

/// Read the current value of a field from a record
///
/// Failures of the record to produce the value are propagated unchanged
/// (`AccessDenied` for unreadable fields).
pub fn extract_value<R: Record + ?Sized>(record: &R, field: &str) -> Result<SqlValue> {
    record.field_value(field)
}

/// Read the identifier value of a record
///
/// Returns `Ok(None)` when no field carries the identifier marker.
pub fn extract_id<R: Record + ?Sized>(
    record: &R,
    config: &GeneratorConfig,
) -> Result<Option<SqlValue>> {
    let descriptor = record.entity_descriptor();
    match resolve_identifier_field(&descriptor, config.duplicate_identifier_policy)? {
        Some(field) => extract_value(record, &field.name).map(Some),
        None => Ok(None),
    }
}

/// Render a value as a SQL literal with the default escaping
///
/// Textual values are wrapped in single quotes, everything else is written in
/// its natural form. `Null` becomes `null`.
pub fn quote_if_needed(value: &SqlValue) -> String {
    quote_literal(value, true)
}

/// Render a value as a SQL literal
///
/// With `escape` set, single quotes inside textual values are doubled.
pub fn quote_literal(value: &SqlValue, escape: bool) -> String {
    if !value.is_textual() {
        return value.to_string();
    }

    let text = value.to_string();
    if escape {
        format!("'{}'", text.replace('\'', "''"))
    } else {
        format!("'{}'", text)
    }
}

/// Render the value of `column` for a SET or VALUES list
///
/// Applies the configured null policy: `Reject` fails with `NullValue`.
/// NaN and infinite floats fail with `InvalidArgument`.
pub fn render_value(value: &SqlValue, column: &str, config: &GeneratorConfig) -> Result<String> {
    if value.is_null() && config.null_policy == NullPolicy::Reject {
        return Err(QueryGeneratorError::null_value(format!(
            "column '{}' has no value",
            column
        )));
    }
    require_finite(value, column)?;
    Ok(quote_literal(value, config.escape_text_literals))
}

/// Fail with `InvalidArgument` if `value` is a NaN or infinite float
pub fn require_finite(value: &SqlValue, column: &str) -> Result<()> {
    if value.is_non_finite() {
        return Err(QueryGeneratorError::invalid_argument(format!(
            "column '{}' holds {}, which has no SQL literal",
            column, value
        )));
    }
    Ok(())
}

/// Formatted values of every bound column, in declaration order
///
/// Includes the identifier column.
pub fn column_values<R: Record + ?Sized>(
    record: &R,
    entity: &ResolvedEntity,
    config: &GeneratorConfig,
) -> Result<Vec<String>> {
    entity
        .columns
        .iter()
        .map(|column| {
            let value = extract_value(record, &column.field)?;
            render_value(&value, &column.name, config)
        })
        .collect()
}

/// `name = value` pairs of every bound column except the identifier
pub fn assignments<R: Record + ?Sized>(
    record: &R,
    entity: &ResolvedEntity,
    config: &GeneratorConfig,
) -> Result<Vec<String>> {
    entity
        .columns
        .iter()
        .filter(|column| !column.identifier)
        .map(|column| {
            let value = extract_value(record, &column.field)?;
            let literal = render_value(&value, &column.name, config)?;
            Ok(format!("{} = {}", column.name, literal))
        })
        .collect()
}
