//! # Error Types
//!
//! Structured errors for submission validation and store writes, built with
//! `thiserror`. Store reads never fail, so there is no read-side variant.

use std::path::PathBuf;

use thiserror::Error;

/// A submission failed required-field validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required text fields were absent or blank after trimming.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Errors while rewriting the store file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file (or its temporary sibling) could not be written.
    #[error("failed to write record store {path}: {source}")]
    Io {
        /// Path of the store file being written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The entry sequence could not be serialized.
    #[error("failed to serialize record store: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_field() {
        let err = ValidationError::MissingFields(vec!["full_name", "session"]);
        assert_eq!(err.to_string(), "missing required fields: full_name, session");
    }

    #[test]
    fn io_error_names_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/data.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/data.json"));
        assert!(msg.contains("denied"));
    }
}
