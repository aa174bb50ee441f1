//! OAI-PMH verb type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// One of the six OAI-PMH request verbs.
///
/// # Example
///
/// ```
/// use oai_pmh_core::Verb;
///
/// let verb: Verb = "ListRecords".parse().unwrap();
/// assert_eq!(verb, Verb::ListRecords);
/// assert!("listrecords".parse::<Verb>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Identify,
    GetRecord,
    ListRecords,
    ListIdentifiers,
    ListMetadataFormats,
    ListSets,
}

impl Verb {
    /// All verbs, in protocol document order.
    pub const ALL: [Verb; 6] = [
        Verb::Identify,
        Verb::GetRecord,
        Verb::ListRecords,
        Verb::ListIdentifiers,
        Verb::ListMetadataFormats,
        Verb::ListSets,
    ];

    /// Returns the verb as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Identify => "Identify",
            Verb::GetRecord => "GetRecord",
            Verb::ListRecords => "ListRecords",
            Verb::ListIdentifiers => "ListIdentifiers",
            Verb::ListMetadataFormats => "ListMetadataFormats",
            Verb::ListSets => "ListSets",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    // Verb names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Verb {
                    value: s.to_string(),
                }
                .into()
            })
    }
}
