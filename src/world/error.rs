//! Error types for data record loading.

use thiserror::Error;

/// Errors that can occur when loading areas, entities, or their records.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A record referenced by id does not exist.
    #[error("Unknown {kind} record '{id}'")]
    UnknownRecord { kind: &'static str, id: String },

    /// A character's frame table lacks an entry for a state or direction.
    #[error("Character '{character}' has no frame entry for {entry}")]
    MissingFrame { character: String, entry: String },
}
