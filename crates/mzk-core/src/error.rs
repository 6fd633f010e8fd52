//! Error types for mzk-core
//!
//! Network failures never show up here as hard errors at the public
//! boundary: fetch helpers log them and return `None`. What surfaces as
//! `Err` are malformed documents, bad configuration and unknown filter
//! labels.

use thiserror::Error;

pub use crate::http::HttpError;

/// Result type alias for mzk-core operations
pub type Result<T> = std::result::Result<T, MzkError>;

/// Main error type
#[derive(Error, Debug)]
pub enum MzkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A fetched document could not be understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The XML itself is malformed
    #[error("Invalid XML: {0}")]
    Xml(String),

    /// The document parsed but lacks an element every record must have
    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    /// A JSON payload did not match the expected shape
    #[error("Unexpected JSON structure: {0}")]
    Json(String),
}

/// Filter values the query factory cannot translate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No entry for `key` in the named lookup table
    #[error("Unknown {table} label: {key}")]
    UnknownLabel { table: &'static str, key: String },
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Cannot serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Xml(err.to_string())
    }
}
