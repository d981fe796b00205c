use std::path::PathBuf;
use thiserror::Error;

pub type VendorResult<T> = Result<T, VendorError>;

/// Coarse classification of a [`VendorError`], stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong primitive type for a field, or a field bag that does not fit the schema
    Type,
    /// Word rate outside (0, 0.15]
    Range,
    /// Malformed e-mail, blank required field, unusable file key part
    Format,
    /// CAT tool or status outside the allowed set
    Membership,
    /// No spreadsheet exists for the file key
    NotFound,
    /// Unknown column or row index during a modification
    Lookup,
    Io,
    Spreadsheet,
    /// A built-in pattern failed to compile
    Pattern,
}

#[derive(Error, Debug)]
pub enum VendorError {
    #[error("{field} should be {expected}")]
    Type {
        field: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Range(String),

    #[error("{0}")]
    Format(String),

    #[error("'{value}' is not a valid {field}, pick one of: {allowed}")]
    Membership {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("No vendor spreadsheet for '{key}' ({})", .path.display())]
    NotFound { key: String, path: PathBuf },

    #[error("{0}")]
    Lookup(String),

    #[error("Invalid vendor fields: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl VendorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VendorError::Type { .. }
            | VendorError::Schema(_)
            | VendorError::Json(_)
            | VendorError::Yaml(_) => ErrorKind::Type,
            VendorError::Range(_) => ErrorKind::Range,
            VendorError::Format(_) => ErrorKind::Format,
            VendorError::Membership { .. } => ErrorKind::Membership,
            VendorError::NotFound { .. } => ErrorKind::NotFound,
            VendorError::Lookup(_) => ErrorKind::Lookup,
            VendorError::Io(_) => ErrorKind::Io,
            VendorError::Spreadsheet(_) => ErrorKind::Spreadsheet,
            VendorError::Pattern(_) => ErrorKind::Pattern,
        }
    }

    /// True for errors caused by a bad value, as opposed to I/O or storage failures.
    ///
    /// The interactive flow re-asks a question on these.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Type | ErrorKind::Range | ErrorKind::Format | ErrorKind::Membership
        )
    }
}
