//! Metadata prefix type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A metadata format the repository can disseminate.
///
/// Unqualified Dublin Core (`oai_dc`) is mandatory for every OAI-PMH
/// repository and is currently the only supported format.
///
/// # Example
///
/// ```
/// use oai_pmh_core::MetadataPrefix;
///
/// let prefix: MetadataPrefix = "oai_dc".parse().unwrap();
/// assert_eq!(prefix.namespace(), "http://www.openarchives.org/OAI/2.0/oai_dc/");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataPrefix {
    #[serde(rename = "oai_dc")]
    OaiDc,
}

impl MetadataPrefix {
    /// All supported prefixes.
    pub const ALL: [MetadataPrefix; 1] = [MetadataPrefix::OaiDc];

    /// Returns the prefix string used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataPrefix::OaiDc => "oai_dc",
        }
    }

    /// Returns the XML schema URL for this format.
    pub fn schema(&self) -> &'static str {
        match self {
            MetadataPrefix::OaiDc => "http://www.openarchives.org/OAI/2.0/oai_dc.xsd",
        }
    }

    /// Returns the XML namespace URI for this format.
    pub fn namespace(&self) -> &'static str {
        match self {
            MetadataPrefix::OaiDc => "http://www.openarchives.org/OAI/2.0/oai_dc/",
        }
    }
}

impl fmt::Display for MetadataPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataPrefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetadataPrefix::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::MetadataPrefix {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_oai_dc() {
        assert_eq!(
            "oai_dc".parse::<MetadataPrefix>().unwrap(),
            MetadataPrefix::OaiDc
        );
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert!("marc21".parse::<MetadataPrefix>().is_err());
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&MetadataPrefix::OaiDc).unwrap();
        assert_eq!(json, "\"oai_dc\"");
    }
}
