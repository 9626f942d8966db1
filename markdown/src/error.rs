//! Error types for document mapping.
//!
//! Section parsing itself cannot fail; the only failure is a structured
//! block whose JSON does not decode.

use thiserror::Error;

/// A `json` code block that could not be decoded.
#[derive(Debug, Error)]
#[error("failed to decode {section} JSON in {document}: {source}")]
pub struct DecodeError {
    /// Title of the section holding the block (e.g. `options`).
    pub section: String,
    /// Path or name of the source document.
    pub document: String,
    #[source]
    pub source: serde_json::Error,
}

/// Convenience alias for results with [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;
