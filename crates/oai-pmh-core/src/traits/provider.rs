//! Data provider trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ProviderError;
use crate::repo::{Granularity, Header, Identify, MetadataFormat, Record, Set};
use crate::types::MetadataPrefix;

/// Result type for data provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Selection criteria for the list verbs.
///
/// Date bounds are inclusive and already widened to whole days when the
/// harvester supplied day granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub prefix: MetadataPrefix,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub set: Option<String>,
}

impl ListQuery {
    /// Create a query matching everything in the given format.
    pub fn new(prefix: MetadataPrefix) -> Self {
        Self {
            prefix,
            from: None,
            until: None,
            set: None,
        }
    }

    /// Returns true if the header falls inside the date range and set.
    ///
    /// Providers that hold their items in memory can use this directly.
    pub fn matches(&self, header: &Header) -> bool {
        self.from.is_none_or(|from| header.datestamp >= from)
            && self.until.is_none_or(|until| header.datestamp <= until)
            && self.set.as_deref().is_none_or(|set| header.in_set(set))
    }
}

/// A source of repository items.
///
/// Implementations signal domain conditions through the matching
/// [`ProviderError`] variant; anything else they return is treated as a
/// fault and aborts the request. Implementations own the synchronisation of
/// any mutable state they hold.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Granularity used when rendering this provider's datestamps.
    fn granularity(&self) -> Granularity {
        Granularity::Seconds
    }

    /// Describe the repository, echoing `base_url`.
    async fn identify(&self, base_url: &str) -> ProviderResult<Identify>;

    /// Fetch one record in the given format.
    ///
    /// May fail with [`ProviderError::IdDoesNotExist`] or
    /// [`ProviderError::CannotDisseminateFormat`].
    async fn get_record(&self, identifier: &str, prefix: MetadataPrefix) -> ProviderResult<Record>;

    /// List full records matching the query.
    ///
    /// May fail with [`ProviderError::NoRecordsMatch`].
    async fn list_records(&self, query: &ListQuery) -> ProviderResult<Vec<Record>>;

    /// List headers matching the query.
    ///
    /// May fail with [`ProviderError::NoRecordsMatch`].
    async fn list_identifiers(&self, query: &ListQuery) -> ProviderResult<Vec<Header>>;

    /// List formats for one item, or for the whole repository when
    /// `identifier` is `None`.
    ///
    /// May fail with [`ProviderError::IdDoesNotExist`] or
    /// [`ProviderError::NoMetadataFormats`].
    async fn list_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> ProviderResult<Vec<MetadataFormat>>;

    /// List the set hierarchy.
    ///
    /// May fail with [`ProviderError::NoSetHierarchy`].
    async fn list_sets(&self) -> ProviderResult<Vec<Set>>;
}
