//! Protocol error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The OAI-PMH error codes.
///
/// A response carries at most one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    BadArgument,
    BadVerb,
    BadResumptionToken,
    IdDoesNotExist,
    CannotDisseminateFormat,
    NoRecordsMatch,
    NoMetadataFormats,
    NoSetHierarchy,
}

impl ErrorCode {
    /// Returns the code as it appears in the `code` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadArgument => "badArgument",
            ErrorCode::BadVerb => "badVerb",
            ErrorCode::BadResumptionToken => "badResumptionToken",
            ErrorCode::IdDoesNotExist => "idDoesNotExist",
            ErrorCode::CannotDisseminateFormat => "cannotDisseminateFormat",
            ErrorCode::NoRecordsMatch => "noRecordsMatch",
            ErrorCode::NoMetadataFormats => "noMetadataFormats",
            ErrorCode::NoSetHierarchy => "noSetHierarchy",
        }
    }

    /// Returns true if a response with this code must not echo the
    /// request arguments.
    pub fn suppresses_echo(&self) -> bool {
        matches!(self, ErrorCode::BadArgument | ErrorCode::BadVerb)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protocol error reported in-band to the harvester.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OaiError {
    /// The error code.
    pub code: ErrorCode,
    /// Human readable explanation.
    pub message: String,
}

impl OaiError {
    /// Create a new protocol error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadArgument, message)
    }

    pub fn bad_verb(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadVerb, message)
    }
}

impl fmt::Display for OaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
