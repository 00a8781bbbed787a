//! Dynamic records
//!
//! `DynamicRecord` pairs an [`EntityDescriptor`] with a JSON object of field
//! values, for entities whose shape is only known at runtime.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityDescriptor, Record};
use crate::error::{QueryGeneratorError, Result};
use crate::types::SqlValue;

/// Record whose field values are stored as JSON properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    /// Metadata of the record's type
    pub descriptor: EntityDescriptor,
    /// Field values keyed by field name
    properties: serde_json::Map<String, serde_json::Value>,
}

impl DynamicRecord {
    /// Create a record from a descriptor and a JSON object of field values
    ///
    /// Fails with `InvalidArgument` if `properties` is not a JSON object.
    pub fn new(descriptor: EntityDescriptor, properties: serde_json::Value) -> Result<Self> {
        match properties {
            serde_json::Value::Object(properties) => Ok(Self {
                descriptor,
                properties,
            }),
            other => Err(QueryGeneratorError::invalid_argument(format!(
                "record properties for '{}' must be a JSON object, got {}",
                descriptor.type_name, other
            ))),
        }
    }

    /// Set a single property, replacing any previous value
    pub fn with_property(
        mut self,
        field: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(field.into(), value.into());
        self
    }

    /// Raw JSON properties
    pub fn properties(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.properties
    }
}

impl Record for DynamicRecord {
    fn entity_descriptor(&self) -> Cow<'_, EntityDescriptor> {
        Cow::Borrowed(&self.descriptor)
    }

    fn field_value(&self, field: &str) -> Result<SqlValue> {
        self.properties
            .get(field)
            .map(SqlValue::from_json)
            .ok_or_else(|| {
                QueryGeneratorError::access_denied(format!(
                    "no value for field '{}' on '{}'",
                    field, self.descriptor.type_name
                ))
            })
    }
}
