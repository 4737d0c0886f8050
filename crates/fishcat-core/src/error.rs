//! Error types for the fisheries catalog

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    // Validation errors
    #[error("Missing required field: {field}")]
    FieldRequired { field: String },

    #[error("Value for {field} exceeds {max} characters")]
    FieldTooLong { field: String, max: usize },

    #[error("Duplicate {entity}: {value} already exists")]
    Duplicate { entity: String, value: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Storage errors
    #[error("Database error: {0}")]
    Database(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CatalogError {
    pub fn field_required(field: impl Into<String>) -> Self {
        Self::FieldRequired { field: field.into() }
    }

    pub fn field_too_long(field: impl Into<String>, max: usize) -> Self {
        Self::FieldTooLong { field: field.into(), max }
    }

    pub fn duplicate(entity: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate { entity: entity.into(), value: value.into() }
    }

    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound { entity: entity.into(), key: key.into() }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
