//! Metadata resolution
//!
//! Turns an [`EntityDescriptor`] into a table name, an ordered column list and
//! the identifier field.

use crate::config::{DuplicateIdentifierPolicy, GeneratorConfig};
use crate::entity::{EntityDescriptor, FieldDescriptor};
use crate::error::{QueryGeneratorError, Result};
use crate::sql::sanitize::{quote_identifier, validate_identifier};

/// A column derived from a field with a column binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Name of the field the column is bound to
    pub field: String,
    /// Column name as written into SQL
    pub name: String,
    /// Whether the field carries the identifier marker
    pub identifier: bool,
}

/// Everything the assembler needs to know about an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    /// Table name as written into SQL
    pub table: String,
    /// Columns in declaration order
    pub columns: Vec<ResolvedColumn>,
    /// Name of the identifier field, if any field carries the marker
    pub identifier_field: Option<String>,
}

impl ResolvedEntity {
    /// `a, b, c` rendering of all columns
    pub fn column_list(&self) -> String {
        column_list(&self.columns)
    }

    /// Column bound to the identifier field, if it has one
    pub fn identifier_column(&self) -> Option<&ResolvedColumn> {
        let field = self.identifier_field.as_deref()?;
        self.columns.iter().find(|c| c.field == field)
    }
}

/// Resolve the table name of an entity type
///
/// Fails with `NotAnEntity` when the type has no table binding. An empty
/// binding defaults to the type's simple name.
pub fn resolve_table(descriptor: &EntityDescriptor) -> Result<String> {
    match descriptor.table.as_deref() {
        None => Err(QueryGeneratorError::not_an_entity(format!(
            "type '{}' does not declare a table",
            descriptor.type_name
        ))),
        Some("") => Ok(descriptor.type_name.clone()),
        Some(name) => Ok(name.to_string()),
    }
}

/// Resolve the bound columns of an entity type, in declaration order
///
/// Fields without a column binding are skipped. An empty binding defaults to
/// the field's own name.
pub fn resolve_columns(descriptor: &EntityDescriptor) -> Vec<ResolvedColumn> {
    descriptor
        .fields
        .iter()
        .filter_map(|field| {
            let name = match field.column.as_deref()? {
                "" => field.name.clone(),
                declared => declared.to_string(),
            };
            Some(ResolvedColumn {
                field: field.name.clone(),
                name,
                identifier: field.identifier,
            })
        })
        .collect()
}

/// Render columns as a comma-and-space separated list
pub fn column_list(columns: &[ResolvedColumn]) -> String {
    columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Find the field carrying the identifier marker
///
/// Returns `Ok(None)` when no field is marked. With more than one marker,
/// `Reject` fails with `InvalidEntityDefinition` and `LastWins` picks the last
/// marked field in declaration order.
pub fn resolve_identifier_field(
    descriptor: &EntityDescriptor,
    policy: DuplicateIdentifierPolicy,
) -> Result<Option<&FieldDescriptor>> {
    let mut marked = descriptor.fields.iter().filter(|f| f.identifier);
    let first = marked.next();
    let last = marked.last();

    match (first, last) {
        (None, _) => Ok(None),
        (Some(only), None) => Ok(Some(only)),
        (Some(_), Some(last)) => match policy {
            DuplicateIdentifierPolicy::LastWins => Ok(Some(last)),
            DuplicateIdentifierPolicy::Reject => {
                let names: Vec<&str> = descriptor
                    .fields
                    .iter()
                    .filter(|f| f.identifier)
                    .map(|f| f.name.as_str())
                    .collect();
                Err(QueryGeneratorError::invalid_entity_definition(format!(
                    "type '{}' marks more than one identifier field: {}",
                    descriptor.type_name,
                    names.join(", ")
                )))
            }
        },
    }
}

/// Resolve table, columns and identifier field in one pass
///
/// Applies the identifier validation and quoting settings of `config` to the
/// table and column names. Column `identifier` flags reflect the resolved
/// identifier only.
pub fn resolve(descriptor: &EntityDescriptor, config: &GeneratorConfig) -> Result<ResolvedEntity> {
    let mut table = resolve_table(descriptor)?;
    let identifier_field = resolve_identifier_field(descriptor, config.duplicate_identifier_policy)?
        .map(|f| f.name.clone());

    let mut columns = resolve_columns(descriptor);
    for column in &mut columns {
        column.identifier = identifier_field.as_deref() == Some(column.field.as_str());
    }

    if config.validate_identifiers {
        validate_identifier(&table)?;
        for column in &columns {
            validate_identifier(&column.name)?;
        }
    }

    if config.quote_identifiers {
        table = quote_identifier(&table);
        for column in &mut columns {
            column.name = quote_identifier(&column.name);
        }
    }

    tracing::trace!(
        entity = %descriptor.type_name,
        table = %table,
        columns = columns.len(),
        identifier = ?identifier_field,
        "resolved entity metadata"
    );

    Ok(ResolvedEntity {
        table,
        columns,
        identifier_field,
    })
}
