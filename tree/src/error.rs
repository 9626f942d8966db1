//! Error types for schema tree assembly.
//!
//! Every variant is fatal to the build that raised it and carries the path
//! of the directory or document involved.

use docschema_markdown::DecodeError;
use thiserror::Error;

/// Errors that can occur while building a schema from a directory source.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A directory could not be enumerated.
    #[error("failed to list directory {path}: {source}")]
    List {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A document's options, arguments or settings block is malformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A packed document bundle could not be unpacked.
    #[error("invalid document bundle: {0}")]
    Bundle(String),
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
