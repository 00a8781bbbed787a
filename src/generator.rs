//! QueryGenerator - SQL statement assembly for entities
//!
//! Builds SELECT, DELETE, INSERT and UPDATE statements from entity metadata
//! and instance values. Statements are returned as text and never executed.

use std::fmt::Display;

use crate::config::{GeneratorConfig, WhereKey};
use crate::entity::{Entity, EntityDescriptor, Record};
use crate::error::{QueryGeneratorError, Result};
use crate::sql::format::{assignments, column_values, extract_value, require_finite};
use crate::sql::metadata::{ResolvedEntity, resolve};
use crate::sql::sanitize::{quote_identifier, validate_identifier};

/// Generator for entity SQL statements
///
/// Holds only immutable configuration. Every call builds its statement in a
/// local buffer, so one generator can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct QueryGenerator {
    config: GeneratorConfig,
}

impl QueryGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // =========================================================================
    // Type-level Statements
    // =========================================================================

    /// `SELECT <columns> FROM <table>`
    pub fn find_all(&self, descriptor: &EntityDescriptor) -> Result<String> {
        let entity = self.resolve(descriptor)?;
        let sql = select_all(&entity);

        tracing::debug!(table = %entity.table, sql = %sql, "generated find_all");
        Ok(sql)
    }

    /// `SELECT <columns> FROM <table> WHERE id = <id>`
    ///
    /// The id is interpolated verbatim; quote it beforehand if it is textual.
    pub fn find_by_id(&self, descriptor: &EntityDescriptor, id: impl Display) -> Result<String> {
        let id = require_id(descriptor, id)?;
        let entity = self.resolve(descriptor)?;
        let key = self.where_key(&entity)?;
        let sql = format!("{} WHERE {} = {}", select_all(&entity), key, id);

        tracing::debug!(table = %entity.table, sql = %sql, "generated find_by_id");
        Ok(sql)
    }

    /// `DELETE FROM <table> WHERE id = <id>`
    ///
    /// The id is interpolated verbatim, as for [`find_by_id`](Self::find_by_id).
    pub fn delete_by_id(&self, descriptor: &EntityDescriptor, id: impl Display) -> Result<String> {
        let id = require_id(descriptor, id)?;
        let entity = self.resolve(descriptor)?;
        let key = self.where_key(&entity)?;
        let sql = format!("DELETE FROM {} WHERE {} = {}", entity.table, key, id);

        tracing::debug!(table = %entity.table, sql = %sql, "generated delete_by_id");
        Ok(sql)
    }

    // =========================================================================
    // Instance-level Statements
    // =========================================================================

    /// `INSERT INTO <table> (<columns>) VALUES (<values>)`
    ///
    /// Every bound column is written, the identifier included.
    pub fn insert<R: Record + ?Sized>(&self, record: &R) -> Result<String> {
        let descriptor = record.entity_descriptor();
        let entity = self.resolve(&descriptor)?;

        let values = column_values(record, &entity, &self.config)?;
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            entity.table,
            entity.column_list(),
            values.join(", ")
        );

        tracing::debug!(table = %entity.table, sql = %sql, "generated insert");
        Ok(sql)
    }

    /// `UPDATE <table> SET <col> = <value>, ... WHERE id = <id>`
    ///
    /// The identifier column is left out of SET and supplies the WHERE value,
    /// rendered unquoted like the id of [`find_by_id`](Self::find_by_id). A
    /// type without an identifier field, or a null identifier value, yields
    /// `null` there. When the identifier is the only bound column the SET list
    /// is empty (`UPDATE <table> SET  WHERE id = <id>`); this is not special-cased.
    pub fn update<R: Record + ?Sized>(&self, record: &R) -> Result<String> {
        let descriptor = record.entity_descriptor();
        let entity = self.resolve(&descriptor)?;
        let key = self.where_key(&entity)?;

        let id = match entity.identifier_field.as_deref() {
            Some(field) => {
                let value = extract_value(record, field)?;
                require_finite(&value, field)?;
                value.to_string()
            }
            None => "null".to_string(),
        };
        let set = assignments(record, &entity, &self.config)?;
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            entity.table,
            set.join(", "),
            key,
            id
        );

        tracing::debug!(table = %entity.table, sql = %sql, "generated update");
        Ok(sql)
    }

    // =========================================================================
    // Typed Conveniences
    // =========================================================================

    /// [`find_all`](Self::find_all) for an [`Entity`] type
    pub fn find_all_of<E: Entity>(&self) -> Result<String> {
        self.find_all(&E::descriptor())
    }

    /// [`find_by_id`](Self::find_by_id) for an [`Entity`] type
    pub fn find_by_id_of<E: Entity>(&self, id: impl Display) -> Result<String> {
        self.find_by_id(&E::descriptor(), id)
    }

    /// [`delete_by_id`](Self::delete_by_id) for an [`Entity`] type
    pub fn delete_by_id_of<E: Entity>(&self, id: impl Display) -> Result<String> {
        self.delete_by_id(&E::descriptor(), id)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn resolve(&self, descriptor: &EntityDescriptor) -> Result<ResolvedEntity> {
        require_type_name(descriptor)?;
        resolve(descriptor, &self.config)
    }

    fn where_key(&self, entity: &ResolvedEntity) -> Result<String> {
        match &self.config.where_key {
            WhereKey::Literal(name) => {
                if self.config.validate_identifiers {
                    validate_identifier(name)?;
                }
                if self.config.quote_identifiers {
                    Ok(quote_identifier(name))
                } else {
                    Ok(name.clone())
                }
            }
            WhereKey::IdentifierColumn => entity
                .identifier_column()
                .map(|c| c.name.clone())
                .ok_or_else(|| {
                    QueryGeneratorError::invalid_entity_definition(format!(
                        "table {} has no identifier column",
                        entity.table
                    ))
                }),
        }
    }
}

fn select_all(entity: &ResolvedEntity) -> String {
    format!("SELECT {} FROM {}", entity.column_list(), entity.table)
}

fn require_type_name(descriptor: &EntityDescriptor) -> Result<()> {
    if descriptor.type_name.trim().is_empty() {
        return Err(QueryGeneratorError::invalid_argument(
            "entity descriptor has no type name",
        ));
    }
    Ok(())
}

fn require_id(descriptor: &EntityDescriptor, id: impl Display) -> Result<String> {
    require_type_name(descriptor)?;
    let id = id.to_string();
    if id.trim().is_empty() {
        return Err(QueryGeneratorError::invalid_argument(format!(
            "id for '{}' is empty",
            descriptor.type_name
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FieldDescriptor;
    use crate::record::DynamicRecord;

    fn person() -> EntityDescriptor {
        EntityDescriptor::new("Person")
            .table("People")
            .field(FieldDescriptor::new("id").column("person_id").identifier())
            .field(FieldDescriptor::new("name").column("person_name"))
            .field(FieldDescriptor::new("salary").column("person_salary"))
    }

    fn person_record(properties: serde_json::Value) -> DynamicRecord {
        DynamicRecord::new(person(), properties).unwrap()
    }

    // ==================== SELECT Tests ====================

    #[test]
    fn test_find_all() {
        let generator = QueryGenerator::default();
        assert_eq!(
            generator.find_all(&person()).unwrap(),
            "SELECT person_id, person_name, person_salary FROM People"
        );
    }

    #[test]
    fn test_find_all_without_columns() {
        let generator = QueryGenerator::default();
        let descriptor = EntityDescriptor::new("Empty").default_table();
        assert_eq!(generator.find_all(&descriptor).unwrap(), "SELECT  FROM Empty");
    }

    #[test]
    fn test_find_by_id() {
        let generator = QueryGenerator::default();
        assert_eq!(
            generator.find_by_id(&person(), "123").unwrap(),
            "SELECT person_id, person_name, person_salary FROM People WHERE id = 123"
        );
    }

    #[test]
    fn test_find_by_id_verbatim() {
        let generator = QueryGenerator::default();
        assert_eq!(
            generator.find_by_id(&person(), "'abc'").unwrap(),
            "SELECT person_id, person_name, person_salary FROM People WHERE id = 'abc'"
        );
        assert!(generator.find_by_id(&person(), 5_u32).unwrap().ends_with("WHERE id = 5"));
    }

    #[test]
    fn test_find_by_id_rejects_empty_id() {
        let generator = QueryGenerator::default();
        assert!(matches!(
            generator.find_by_id(&person(), "  "),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));
    }

    // ==================== DELETE Tests ====================

    #[test]
    fn test_delete_by_id_rejects_empty_id() {
        let generator = QueryGenerator::default();
        let err = generator.delete_by_id(&person(), "").unwrap_err();
        assert!(matches!(err, QueryGeneratorError::InvalidArgument(_)));
        assert!(err.to_string().contains("Person"));

        assert!(matches!(
            generator.delete_by_id(&person(), " \t"),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_delete_by_id() {
        let generator = QueryGenerator::default();
        assert_eq!(
            generator.delete_by_id(&person(), "123").unwrap(),
            "DELETE FROM People WHERE id = 123"
        );
    }

    #[test]
    fn test_delete_by_id_identifier_column_key() {
        let config = GeneratorConfig::builder().where_identifier_column().build();
        let generator = QueryGenerator::new(config);
        assert_eq!(
            generator.delete_by_id(&person(), 9).unwrap(),
            "DELETE FROM People WHERE person_id = 9"
        );
    }

    #[test]
    fn test_identifier_column_key_requires_identifier() {
        let config = GeneratorConfig::builder().where_identifier_column().build();
        let generator = QueryGenerator::new(config);
        let descriptor = EntityDescriptor::new("Log")
            .default_table()
            .field(FieldDescriptor::new("line").default_column());

        assert!(matches!(
            generator.delete_by_id(&descriptor, 1),
            Err(QueryGeneratorError::InvalidEntityDefinition(_))
        ));
    }

    // ==================== INSERT Tests ====================

    #[test]
    fn test_insert() {
        let generator = QueryGenerator::default();
        let record = person_record(serde_json::json!({
            "id": 111,
            "name": "Obi Van Kenobi",
            "salary": 12000.0
        }));

        assert_eq!(
            generator.insert(&record).unwrap(),
            "INSERT INTO People (person_id, person_name, person_salary) VALUES (111, 'Obi Van Kenobi', 12000.0)"
        );
    }

    #[test]
    fn test_insert_rejects_null() {
        let generator = QueryGenerator::default();
        let record = person_record(serde_json::json!({"id": 1, "name": null, "salary": 1.0}));

        assert!(matches!(
            generator.insert(&record),
            Err(QueryGeneratorError::NullValue(_))
        ));
    }

    #[test]
    fn test_insert_renders_null_when_configured() {
        let generator = QueryGenerator::new(GeneratorConfig::builder().render_nulls().build());
        let record = person_record(serde_json::json!({"id": 1, "name": null, "salary": 1.0}));

        assert_eq!(
            generator.insert(&record).unwrap(),
            "INSERT INTO People (person_id, person_name, person_salary) VALUES (1, null, 1.0)"
        );
    }

    // ==================== UPDATE Tests ====================

    #[test]
    fn test_update() {
        let generator = QueryGenerator::default();
        let record = person_record(serde_json::json!({
            "id": 777,
            "name": "Obi Van Kenobi",
            "salary": 12000.0
        }));

        assert_eq!(
            generator.update(&record).unwrap(),
            "UPDATE People SET person_name = 'Obi Van Kenobi', person_salary = 12000.0 WHERE id = 777"
        );
    }

    #[test]
    fn test_update_textual_id_unquoted() {
        let generator = QueryGenerator::default();
        let record = person_record(serde_json::json!({
            "id": "myId",
            "name": "Obi Van Kenobi",
            "salary": 12000
        }));

        assert_eq!(
            generator.update(&record).unwrap(),
            "UPDATE People SET person_name = 'Obi Van Kenobi', person_salary = 12000 WHERE id = myId"
        );
    }

    #[test]
    fn test_update_without_identifier_field() {
        let generator = QueryGenerator::default();
        let descriptor = EntityDescriptor::new("Note")
            .default_table()
            .field(FieldDescriptor::new("body").default_column());
        let record = DynamicRecord::new(descriptor, serde_json::json!({"body": "hi"})).unwrap();

        assert_eq!(
            generator.update(&record).unwrap(),
            "UPDATE Note SET body = 'hi' WHERE id = null"
        );
    }

    #[test]
    fn test_update_identifier_only_entity() {
        let generator = QueryGenerator::default();
        let descriptor = EntityDescriptor::new("Tag")
            .default_table()
            .field(FieldDescriptor::new("id").default_column().identifier());
        let record = DynamicRecord::new(descriptor, serde_json::json!({"id": 1})).unwrap();

        assert_eq!(
            generator.update(&record).unwrap(),
            "UPDATE Tag SET  WHERE id = 1"
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let generator = QueryGenerator::default();

        // JSON cannot hold NaN, so go through a typed entity
        struct Reading {
            id: f64,
            value: f64,
        }
        impl Entity for Reading {
            fn descriptor() -> EntityDescriptor {
                EntityDescriptor::new("Reading")
                    .default_table()
                    .field(FieldDescriptor::new("id").default_column().identifier())
                    .field(FieldDescriptor::new("value").default_column())
            }

            fn read_field(&self, field: &str) -> Result<crate::types::SqlValue> {
                match field {
                    "id" => Ok(self.id.into()),
                    "value" => Ok(self.value.into()),
                    other => Err(QueryGeneratorError::access_denied(other)),
                }
            }
        }

        let bad_value = Reading {
            id: 1.0,
            value: f64::NAN,
        };
        assert!(matches!(
            generator.insert(&bad_value),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));
        assert!(matches!(
            generator.update(&bad_value),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));

        let bad_id = Reading {
            id: f64::INFINITY,
            value: 2.5,
        };
        assert!(matches!(
            generator.update(&bad_id),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_update_missing_value_is_access_denied() {
        let generator = QueryGenerator::default();
        let record = person_record(serde_json::json!({"id": 1, "name": "x"}));

        assert!(matches!(
            generator.update(&record),
            Err(QueryGeneratorError::AccessDenied(_))
        ));
    }

    // ==================== Error Ordering Tests ====================

    #[test]
    fn test_invalid_argument_before_resolution() {
        let generator = QueryGenerator::default();
        let descriptor = EntityDescriptor::new("");

        // No table binding either, but the missing type name wins
        assert!(matches!(
            generator.find_all(&descriptor),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));

        let record = DynamicRecord::new(descriptor, serde_json::json!({})).unwrap();
        assert!(matches!(
            generator.insert(&record),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));
        assert!(matches!(
            generator.update(&record),
            Err(QueryGeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_not_an_entity() {
        let generator = QueryGenerator::default();
        let descriptor = EntityDescriptor::new("NotOrmEntity");

        assert!(matches!(
            generator.find_all(&descriptor),
            Err(QueryGeneratorError::NotAnEntity(_))
        ));
        assert!(matches!(
            generator.delete_by_id(&descriptor, 1),
            Err(QueryGeneratorError::NotAnEntity(_))
        ));
    }

    // ==================== Configuration Tests ====================

    #[test]
    fn test_quoted_identifiers() {
        let config = GeneratorConfig::builder().quote_identifiers(true).build();
        let generator = QueryGenerator::new(config);

        assert_eq!(
            generator.delete_by_id(&person(), 4).unwrap(),
            "DELETE FROM \"People\" WHERE \"id\" = 4"
        );
        assert_eq!(
            generator.find_all(&person()).unwrap(),
            "SELECT \"person_id\", \"person_name\", \"person_salary\" FROM \"People\""
        );
    }

    #[test]
    fn test_literal_where_key_is_sanitized() {
        let quoted = QueryGenerator::new(
            GeneratorConfig::builder()
                .where_column("pk")
                .quote_identifiers(true)
                .build(),
        );
        assert_eq!(
            quoted.delete_by_id(&person(), 1).unwrap(),
            "DELETE FROM \"People\" WHERE \"pk\" = 1"
        );

        let validated = QueryGenerator::new(
            GeneratorConfig::builder()
                .where_column("pk; DROP TABLE x")
                .quote_identifiers(true)
                .validate_identifiers(true)
                .build(),
        );
        assert!(matches!(
            validated.delete_by_id(&person(), 1),
            Err(QueryGeneratorError::Validation(_))
        ));
        assert!(matches!(
            validated.find_by_id(&person(), 1),
            Err(QueryGeneratorError::Validation(_))
        ));
    }

    #[test]
    fn test_custom_where_column() {
        let generator = QueryGenerator::new(GeneratorConfig::builder().where_column("pk").build());
        assert_eq!(
            generator.delete_by_id(&person(), 1).unwrap(),
            "DELETE FROM People WHERE pk = 1"
        );
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryGenerator>();
    }
}
