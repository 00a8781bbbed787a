//! Entity metadata for query generation
//!
//! Includes EntityDescriptor, FieldDescriptor and the `Entity` / `Record`
//! traits that connect concrete types to their metadata.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::SqlValue;

/// Declared metadata of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared on the type
    pub name: String,
    /// Column binding; `Some("")` binds the column to the field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Whether this field carries the identifier marker
    #[serde(default)]
    pub identifier: bool,
}

impl FieldDescriptor {
    /// Create an unbound field (invisible to the generator)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            identifier: false,
        }
    }

    /// Bind the field to a named column
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    /// Bind the field to a column named after the field
    pub fn default_column(mut self) -> Self {
        self.column = Some(String::new());
        self
    }

    /// Mark the field as the identifier
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    /// Whether the field has a column binding
    pub fn is_column(&self) -> bool {
        self.column.is_some()
    }
}

/// Declared metadata of an entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Simple name of the type
    #[serde(rename = "typeName")]
    pub type_name: String,
    /// Table binding; `Some("")` binds the table to the type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Create a descriptor without a table binding
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            table: None,
            fields: Vec::new(),
        }
    }

    /// Bind the type to a named table
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    /// Bind the type to a table named after the type
    pub fn default_table(mut self) -> Self {
        self.table = Some(String::new());
        self
    }

    /// Append a field
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Whether the type declares a table binding
    pub fn is_entity(&self) -> bool {
        self.table.is_some()
    }

    /// Look up a declared field by name
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Load a descriptor from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A concrete type with declared entity metadata
///
/// Implemented next to the type itself, so private fields can be read.
/// Every `Entity` is also a [`Record`].
pub trait Entity {
    /// Metadata of the implementing type
    fn descriptor() -> EntityDescriptor;

    /// Read the current value of a declared field
    ///
    /// Unknown or unreadable fields should yield `AccessDenied`.
    fn read_field(&self, field: &str) -> Result<SqlValue>;
}

/// An instance the generator can read values from
pub trait Record {
    /// Metadata of the instance's type
    fn entity_descriptor(&self) -> Cow<'_, EntityDescriptor>;

    /// Read the current value of a declared field
    fn field_value(&self, field: &str) -> Result<SqlValue>;
}

impl<E: Entity> Record for E {
    fn entity_descriptor(&self) -> Cow<'_, EntityDescriptor> {
        Cow::Owned(E::descriptor())
    }

    fn field_value(&self, field: &str) -> Result<SqlValue> {
        self.read_field(field)
    }
}
