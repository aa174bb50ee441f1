//! The OAI-PMH protocol engine.
//!
//! A request flows through [`dispatch`], which performs the global argument
//! checks and hands the raw parameters to one verb handler. Handlers do
//! their own argument validation, call the [`DataProvider`] and translate
//! its domain conditions into [`OaiError`]s. [`Envelope::assemble`] then
//! wraps the outcome for rendering.

mod dispatch;
mod envelope;
mod get_record;
mod identify;
mod list;
mod list_metadata_formats;
mod list_sets;
mod params;

use serde::Serialize;

use crate::Result;
use crate::error::{Error, ProviderError};
use crate::repo::{Header, Identify, MetadataFormat, Record, Set};
use crate::traits::DataProvider;
use crate::types::{OaiError, Verb};

pub use dispatch::dispatch;
pub use envelope::{Envelope, RequestEcho};
pub use params::RequestParams;

/// Message used for every resumption token until paging is implemented.
pub const RESUMPTION_UNSUPPORTED: &str = "Resumption tokens are not supported yet";

/// Payload of a successful GetRecord request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetRecord {
    pub record: Record,
}

/// Payload of a successful ListRecords request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecords {
    pub records: Vec<Record>,
    /// Always `None`: the list is complete.
    pub resumption_token: Option<String>,
}

/// Payload of a successful ListIdentifiers request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIdentifiers {
    pub headers: Vec<Header>,
    /// Always `None`: the list is complete.
    pub resumption_token: Option<String>,
}

/// Payload of a successful ListMetadataFormats request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadataFormats {
    pub metadata_formats: Vec<MetadataFormat>,
}

/// Payload of a successful ListSets request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSets {
    pub sets: Vec<Set>,
    /// Always `None`: the list is complete.
    pub resumption_token: Option<String>,
}

/// The verb-specific body of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Payload {
    Identify(Identify),
    GetRecord(GetRecord),
    ListRecords(ListRecords),
    ListIdentifiers(ListIdentifiers),
    ListMetadataFormats(ListMetadataFormats),
    ListSets(ListSets),
}

impl Payload {
    /// Returns the verb that produced this payload.
    pub fn verb(&self) -> Verb {
        match self {
            Payload::Identify(_) => Verb::Identify,
            Payload::GetRecord(_) => Verb::GetRecord,
            Payload::ListRecords(_) => Verb::ListRecords,
            Payload::ListIdentifiers(_) => Verb::ListIdentifiers,
            Payload::ListMetadataFormats(_) => Verb::ListMetadataFormats,
            Payload::ListSets(_) => Verb::ListSets,
        }
    }
}

/// Either a payload or the single protocol error of a request.
pub type Outcome = std::result::Result<Payload, OaiError>;

/// Run a request end to end: dispatch it and wrap the outcome in an
/// envelope stamped with the current time.
///
/// # Errors
///
/// Returns an error only for provider faults; protocol errors are part of
/// the returned envelope.
pub async fn respond(
    provider: &dyn DataProvider,
    base_url: &str,
    params: &RequestParams,
) -> Result<Envelope> {
    let outcome = dispatch(provider, base_url, params).await?;
    Ok(Envelope::assemble(base_url, params, outcome))
}

/// Why a verb handler did not produce a payload.
#[derive(Debug)]
enum Rejection {
    /// Reported in-band to the harvester.
    Protocol(OaiError),
    /// Aborts the request.
    Fault(Error),
}

impl From<OaiError> for Rejection {
    fn from(err: OaiError) -> Self {
        Rejection::Protocol(err)
    }
}

impl From<ProviderError> for Rejection {
    fn from(err: ProviderError) -> Self {
        Rejection::Fault(err.into())
    }
}

type HandlerResult = std::result::Result<Payload, Rejection>;
