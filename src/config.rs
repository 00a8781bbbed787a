//! Configuration for QueryGenerator
//!
//! Provides a builder pattern for configuring query generation.

use serde::{Deserialize, Serialize};

/// What to do when a value required for SET or VALUES is null
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Fail with `NullValue` instead of emitting `null`
    #[default]
    Reject,
    /// Interpolate the literal `null`
    RenderNull,
}

/// How to treat a type that marks more than one field as identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdentifierPolicy {
    /// Fail with `InvalidEntityDefinition`
    #[default]
    Reject,
    /// The last marked field in declaration order is the identifier
    LastWins,
}

/// Column name written on the left of `WHERE ... = <id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhereKey {
    /// A fixed column name (default: `id`)
    Literal(String),
    /// The resolved column name of the identifier field
    IdentifierColumn,
}

impl Default for WhereKey {
    fn default() -> Self {
        WhereKey::Literal("id".to_string())
    }
}

/// Configuration for the query generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Null handling for SET and VALUES (default: reject)
    pub null_policy: NullPolicy,
    /// Handling of multiple identifier markers (default: reject)
    pub duplicate_identifier_policy: DuplicateIdentifierPolicy,
    /// Left-hand side of the id WHERE clause (default: `id`)
    pub where_key: WhereKey,
    /// Wrap table and column names in double quotes (default: false)
    pub quote_identifiers: bool,
    /// Validate resolved table and column names (default: false)
    pub validate_identifiers: bool,
    /// Double single quotes inside text literals (default: true)
    pub escape_text_literals: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfigBuilder::new().build()
    }
}

impl GeneratorConfig {
    /// Create a new configuration builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}

/// Builder for GeneratorConfig
#[derive(Debug)]
pub struct GeneratorConfigBuilder {
    null_policy: NullPolicy,
    duplicate_identifier_policy: DuplicateIdentifierPolicy,
    where_key: WhereKey,
    quote_identifiers: bool,
    validate_identifiers: bool,
    escape_text_literals: bool,
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            null_policy: NullPolicy::Reject,
            duplicate_identifier_policy: DuplicateIdentifierPolicy::Reject,
            where_key: WhereKey::default(),
            quote_identifiers: false,
            validate_identifiers: false,
            escape_text_literals: true,
        }
    }

    /// Set the null policy
    pub fn null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    /// Emit `null` for null values instead of failing
    pub fn render_nulls(mut self) -> Self {
        self.null_policy = NullPolicy::RenderNull;
        self
    }

    /// Set the duplicate identifier policy
    pub fn duplicate_identifier_policy(mut self, policy: DuplicateIdentifierPolicy) -> Self {
        self.duplicate_identifier_policy = policy;
        self
    }

    /// Accept multiple identifier markers, keeping the last one
    pub fn last_identifier_wins(mut self) -> Self {
        self.duplicate_identifier_policy = DuplicateIdentifierPolicy::LastWins;
        self
    }

    /// Use a fixed column name in WHERE clauses
    pub fn where_column(mut self, name: impl Into<String>) -> Self {
        self.where_key = WhereKey::Literal(name.into());
        self
    }

    /// Use the identifier field's column name in WHERE clauses
    pub fn where_identifier_column(mut self) -> Self {
        self.where_key = WhereKey::IdentifierColumn;
        self
    }

    /// Enable or disable double-quoting of table and column names
    pub fn quote_identifiers(mut self, enabled: bool) -> Self {
        self.quote_identifiers = enabled;
        self
    }

    /// Enable or disable validation of table and column names
    pub fn validate_identifiers(mut self, enabled: bool) -> Self {
        self.validate_identifiers = enabled;
        self
    }

    /// Enable or disable escaping of single quotes in text literals
    pub fn escape_text_literals(mut self, enabled: bool) -> Self {
        self.escape_text_literals = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig {
            null_policy: self.null_policy,
            duplicate_identifier_policy: self.duplicate_identifier_policy,
            where_key: self.where_key,
            quote_identifiers: self.quote_identifiers,
            validate_identifiers: self.validate_identifiers,
            escape_text_literals: self.escape_text_literals,
        }
    }
}
