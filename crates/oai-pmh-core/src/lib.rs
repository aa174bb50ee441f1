//! oai-pmh-core - OAI-PMH protocol types, data provider trait and request
//! engine.

pub mod error;
pub mod protocol;
pub mod repo;
pub mod traits;
pub mod types;

pub use error::{Error, InvalidInputError, ProviderError};
pub use protocol::{
    Envelope, GetRecord, ListIdentifiers, ListMetadataFormats, ListRecords, ListSets, Outcome,
    Payload, RequestEcho, RequestParams, dispatch, respond,
};
pub use repo::{
    DeletedRecord, DublinCore, Granularity, Header, Identify, MetadataFormat, Record,
    RecordMetadata, Set,
};
pub use traits::{DataProvider, ListQuery, ProviderResult};
pub use types::{Datestamp, ErrorCode, MetadataPrefix, OaiError, Verb};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
