//! Error types for the OAI-PMH core.
//!
//! Protocol errors (`badVerb`, `noRecordsMatch`, ...) are not Rust errors:
//! they are ordinary values of [`OaiError`](crate::OaiError) carried inside a
//! response. The types here describe what a data provider can report and
//! the faults that abort a request entirely.

use thiserror::Error;

/// The unified error type for OAI-PMH core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A data provider reported a condition or fault.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Input validation errors (unknown verb, prefix, datestamp format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Conditions a data provider can signal.
///
/// Every variant except [`ProviderError::Storage`] corresponds to exactly one
/// protocol error code. Verb handlers map the variants documented for their
/// verb and hand everything else back to the caller untouched.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No item with the given identifier exists in the repository.
    #[error("identifier does not exist: {identifier}")]
    IdDoesNotExist { identifier: String },

    /// The item exists but cannot be disseminated in the requested format.
    #[error("cannot disseminate '{identifier}' as {prefix}")]
    CannotDisseminateFormat { identifier: String, prefix: String },

    /// The selection criteria matched no records.
    #[error("no records match")]
    NoRecordsMatch,

    /// No metadata formats are available for the item.
    #[error("no metadata formats available")]
    NoMetadataFormats,

    /// The repository does not organise its items into sets.
    #[error("repository has no set hierarchy")]
    NoSetHierarchy,

    /// Backing storage failed (I/O, corrupt data, remote failure).
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl ProviderError {
    /// Create a storage fault from any displayable error.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        ProviderError::Storage {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Unknown verb name.
    #[error("invalid verb '{value}'")]
    Verb { value: String },

    /// Unknown metadata prefix.
    #[error("unknown metadata prefix '{value}'")]
    MetadataPrefix { value: String },

    /// Unparseable datestamp.
    #[error("invalid datestamp '{value}': {reason}")]
    Datestamp { value: String, reason: String },

    /// Unknown granularity or deleted-record policy string.
    #[error("invalid {field} '{value}'")]
    Identify { field: &'static str, value: String },
}
