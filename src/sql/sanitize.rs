//! SQL identifier quoting and validation
//!
//! Used for table and column names only. Values are interpolated as literals
//! elsewhere and are not protected against injection.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QueryGeneratorError, Result};

/// Core SQL keywords that cannot be used as unquoted identifiers
pub const SQL_RESERVED_WORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
    "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE",
    "END", "EXISTS", "FALSE", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING", "IN", "INNER",
    "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "ON", "OR",
    "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO",
    "TRUE", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is a valid regex")
});

/// Wrap an identifier in double quotes, doubling embedded quotes
///
/// # Example
/// ```
/// use entity_query_generator::sql::quote_identifier;
///
/// assert_eq!(quote_identifier("People"), "\"People\"");
/// ```
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Validate a table or column name
///
/// Rules:
/// - Must start with a letter or underscore
/// - Can only contain ASCII letters, digits and underscores
/// - Cannot be a core SQL reserved word (case-insensitive)
///
/// # Example
/// ```
/// use entity_query_generator::sql::validate_identifier;
///
/// assert!(validate_identifier("person_name").is_ok());
/// assert!(validate_identifier("select").is_err());
/// ```
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(QueryGeneratorError::validation("identifier cannot be empty"));
    }

    if !IDENTIFIER_PATTERN.is_match(name) {
        return Err(QueryGeneratorError::validation(format!(
            "identifier '{}' must start with a letter or underscore and contain only letters, digits and underscores",
            name
        )));
    }

    if SQL_RESERVED_WORDS.contains(&name.to_ascii_uppercase().as_str()) {
        return Err(QueryGeneratorError::validation(format!(
            "identifier '{}' is a reserved SQL keyword",
            name
        )));
    }

    Ok(())
}
