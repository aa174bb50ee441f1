//! Core OAI-PMH protocol types.
//!
//! These types enforce protocol invariants at construction time: a value of
//! [`Verb`] or [`MetadataPrefix`] is always one the repository understands.

mod datestamp;
mod error_code;
mod metadata_prefix;
mod verb;

pub use datestamp::Datestamp;
pub use error_code::{ErrorCode, OaiError};
pub use metadata_prefix::MetadataPrefix;
pub use verb::Verb;
