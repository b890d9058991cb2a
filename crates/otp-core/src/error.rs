//! # Error Types
//!
//! Errors raised while reading, editing or persisting a profile.

use thiserror::Error;

/// Errors from profile stores and settings-form edits.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A field name that does not map to any profile field.
    #[error("unknown profile field: {0}")]
    UnknownField(String),

    /// A select field set to a value its option list does not offer.
    #[error("{value:?} is not an option for {field}")]
    UnknownOption { field: String, value: String },

    /// The backing file could not be read or written.
    #[error("profile store io error at {path}: {source}")]
    Io {
        /// Location of the backing file.
        path: String,
        source: std::io::Error,
    },

    /// The stored profile is not valid JSON for the profile schema.
    #[error("profile parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
