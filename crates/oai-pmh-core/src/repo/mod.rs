//! Repository item types.
//!
//! This module defines what a data provider hands back to the protocol
//! engine. The lookups themselves are methods on
//! [`DataProvider`](crate::DataProvider).

mod identify;
mod types;

pub use identify::{DeletedRecord, Granularity, Identify};
pub use types::{DublinCore, Header, MetadataFormat, Record, RecordMetadata, Set};
