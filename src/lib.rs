//! # entity-query-generator
//!
//! Metadata-driven SQL statement generation for plain Rust entities.
//!
//! Types declare a table binding, column bindings and an identifier field.
//! The generator turns that metadata, plus the current field values of an
//! instance, into SQL text. Nothing is executed and values are interpolated
//! directly, so the output is not a defence against SQL injection.
//!
//! ## Features
//!
//! - **Five statement shapes**: select all, select by id, delete by id, insert and update
//! - **Declaration order**: column lists always follow field declaration order
//! - **Explicit metadata**: an `Entity` trait per type, or JSON descriptors with `DynamicRecord`
//! - **Strict by default**: null values and duplicate identifier markers are rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use entity_query_generator::{
//!     Entity, EntityDescriptor, FieldDescriptor, QueryGenerator, QueryGeneratorError, SqlValue,
//! };
//!
//! struct Person {
//!     id: i32,
//!     name: String,
//!     salary: f64,
//! }
//!
//! impl Entity for Person {
//!     fn descriptor() -> EntityDescriptor {
//!         EntityDescriptor::new("Person")
//!             .table("People")
//!             .field(FieldDescriptor::new("id").column("person_id").identifier())
//!             .field(FieldDescriptor::new("name").column("person_name"))
//!             .field(FieldDescriptor::new("salary").column("person_salary"))
//!     }
//!
//!     fn read_field(&self, field: &str) -> Result<SqlValue, QueryGeneratorError> {
//!         match field {
//!             "id" => Ok(self.id.into()),
//!             "name" => Ok(self.name.as_str().into()),
//!             "salary" => Ok(self.salary.into()),
//!             other => Err(QueryGeneratorError::access_denied(other)),
//!         }
//!     }
//! }
//!
//! let generator = QueryGenerator::default();
//! let person = Person { id: 111, name: "Obi Van Kenobi".into(), salary: 12000.0 };
//!
//! assert_eq!(
//!     generator.insert(&person)?,
//!     "INSERT INTO People (person_id, person_name, person_salary) VALUES (111, 'Obi Van Kenobi', 12000.0)"
//! );
//! assert_eq!(generator.delete_by_id_of::<Person>(111)?, "DELETE FROM People WHERE id = 111");
//! # Ok::<(), QueryGeneratorError>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use entity_query_generator::{GeneratorConfig, QueryGenerator};
//!
//! let config = GeneratorConfig::builder()
//!     .render_nulls()              // Emit `null` instead of failing
//!     .last_identifier_wins()      // Accept several identifier markers
//!     .quote_identifiers(true)     // "People", "person_id"
//!     .build();
//! let generator = QueryGenerator::new(config);
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod generator;
pub mod record;
pub mod sql;
pub mod types;

pub use config::{
    DuplicateIdentifierPolicy, GeneratorConfig, GeneratorConfigBuilder, NullPolicy, WhereKey,
};
pub use entity::{Entity, EntityDescriptor, FieldDescriptor, Record};
pub use error::{QueryGeneratorError, Result};
pub use generator::QueryGenerator;
pub use record::DynamicRecord;
pub use types::SqlValue;
