//! Repository description returned by the Identify verb.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// How the repository keeps track of deleted records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedRecord {
    /// Deletions are not tracked.
    No,
    /// Deletions may be tracked, with no guarantee of persistence.
    #[default]
    Transient,
    /// Deletions are tracked forever.
    Persistent,
}

impl DeletedRecord {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletedRecord::No => "no",
            DeletedRecord::Transient => "transient",
            DeletedRecord::Persistent => "persistent",
        }
    }
}

impl fmt::Display for DeletedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeletedRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(DeletedRecord::No),
            "transient" => Ok(DeletedRecord::Transient),
            "persistent" => Ok(DeletedRecord::Persistent),
            _ => Err(InvalidInputError::Identify {
                field: "deletedRecord",
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Finest datestamp granularity the repository supports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    Day,
    #[serde(rename = "YYYY-MM-DDThh:mm:ssZ")]
    Seconds,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "YYYY-MM-DD",
            Granularity::Seconds => "YYYY-MM-DDThh:mm:ssZ",
        }
    }

    /// Format an instant at this granularity.
    pub fn format(&self, dt: &DateTime<Utc>) -> String {
        match self {
            Granularity::Day => dt.format("%Y-%m-%d").to_string(),
            Granularity::Seconds => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YYYY-MM-DD" => Ok(Granularity::Day),
            "YYYY-MM-DDThh:mm:ssZ" => Ok(Granularity::Seconds),
            _ => Err(InvalidInputError::Identify {
                field: "granularity",
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Repository-level description.
///
/// Everything except `base_url` is static configuration of the data
/// provider; `base_url` echoes the URL the request arrived on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identify {
    pub repository_name: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub protocol_version: String,
    #[serde(rename = "adminEmail")]
    pub admin_emails: Vec<String>,
    pub earliest_datestamp: DateTime<Utc>,
    pub deleted_record: DeletedRecord,
    pub granularity: Granularity,
    #[serde(default)]
    pub compression: Vec<String>,
    #[serde(default, rename = "description")]
    pub descriptions: Vec<String>,
}

impl Identify {
    /// The only protocol version this crate speaks.
    pub const PROTOCOL_VERSION: &'static str = "2.0";
}
