//! Response envelope assembly.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::Datestamp;

use super::params::RequestParams;
use super::{Outcome, Payload};

/// The `request` element of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEcho {
    /// The URL the request was made to, without query.
    pub base_url: String,
    /// Protocol arguments echoed back, in supplied order.
    pub arguments: Vec<(String, String)>,
}

/// A complete protocol response, ready to be rendered.
///
/// Holds exactly one of a payload or an error, by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub response_date: DateTime<Utc>,
    pub request: RequestEcho,
    pub outcome: Outcome,
}

impl Envelope {
    /// Wrap an outcome, stamping it with the current time.
    pub fn assemble(base_url: &str, params: &RequestParams, outcome: Outcome) -> Self {
        Self::assemble_at(Utc::now(), base_url, params, outcome)
    }

    /// Wrap an outcome with an explicit response date.
    ///
    /// Arguments are not echoed for `badArgument` and `badVerb`: the
    /// request was too malformed to repeat back.
    pub fn assemble_at(
        response_date: DateTime<Utc>,
        base_url: &str,
        params: &RequestParams,
        outcome: Outcome,
    ) -> Self {
        let arguments = match &outcome {
            Err(err) if err.code.suppresses_echo() => Vec::new(),
            _ => params.recognized(),
        };

        Self {
            response_date,
            request: RequestEcho {
                base_url: base_url.to_string(),
                arguments,
            },
            outcome,
        }
    }

    /// Returns the payload if the request succeeded.
    pub fn payload(&self) -> Option<&Payload> {
        self.outcome.as_ref().ok()
    }

    /// Returns true if the envelope carries a protocol error.
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

struct Arguments<'a>(&'a [(String, String)]);

impl Serialize for Arguments<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for RequestEcho {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("baseURL", &self.base_url)?;
        map.serialize_entry("arguments", &Arguments(&self.arguments))?;
        map.end()
    }
}

// Mirrors the XML layout: the payload sits under its verb name, or the
// error under `error`.
impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("responseDate", &Datestamp::format_utc(&self.response_date))?;
        map.serialize_entry("request", &self.request)?;
        match &self.outcome {
            Ok(Payload::Identify(p)) => map.serialize_entry("Identify", p)?,
            Ok(Payload::GetRecord(p)) => map.serialize_entry("GetRecord", p)?,
            Ok(Payload::ListRecords(p)) => map.serialize_entry("ListRecords", p)?,
            Ok(Payload::ListIdentifiers(p)) => map.serialize_entry("ListIdentifiers", p)?,
            Ok(Payload::ListMetadataFormats(p)) => {
                map.serialize_entry("ListMetadataFormats", p)?
            }
            Ok(Payload::ListSets(p)) => map.serialize_entry("ListSets", p)?,
            Err(err) => map.serialize_entry("error", err)?,
        }
        map.end()
    }
}
