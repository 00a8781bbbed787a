//! Error types for query generation

use thiserror::Error;

/// Errors that can occur while generating SQL for an entity
#[derive(Debug, Error)]
pub enum QueryGeneratorError {
    #[error("Not an entity: {0}")]
    NotAnEntity(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Null value: {0}")]
    NullValue(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid entity definition: {0}")]
    InvalidEntityDefinition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryGeneratorError {
    pub fn not_an_entity(msg: impl Into<String>) -> Self {
        Self::NotAnEntity(msg.into())
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    pub fn null_value(msg: impl Into<String>) -> Self {
        Self::NullValue(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_entity_definition(msg: impl Into<String>) -> Self {
        Self::InvalidEntityDefinition(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, QueryGeneratorError>;
