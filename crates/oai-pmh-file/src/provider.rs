//! File-backed data provider.

use async_trait::async_trait;
use tracing::{debug, instrument};

use oai_pmh_core::{
    DataProvider, Granularity, Header, Identify, ListQuery, MetadataFormat, MetadataPrefix,
    ProviderError, ProviderResult, Record, Set,
};

use crate::store::{FileStore, RepositoryInfo};

/// Data provider serving a repository laid out on the filesystem.
///
/// Repository identity is read once when the provider is opened. Records
/// and sets are read on every call, so edits to them show up on the next
/// request without a restart.
#[derive(Debug, Clone)]
pub struct FileProvider {
    store: FileStore,
    info: RepositoryInfo,
}

impl FileProvider {
    /// Open a provider over the given root directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `repository.json` exists but cannot be read.
    pub fn open(root: impl AsRef<std::path::Path>) -> ProviderResult<Self> {
        let store = FileStore::new(root);
        let info = store.repository()?;
        debug!(
            root = %store.root().display(),
            name = %info.repository_name,
            "Opened repository"
        );
        Ok(Self { store, info })
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// The repository identity loaded at open time.
    pub fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    /// Records matching the query, already in the requested format.
    ///
    /// An unknown set is reported as `NoRecordsMatch` rather than an empty
    /// list.
    fn select(&self, query: &ListQuery) -> ProviderResult<Vec<Record>> {
        if let Some(set) = &query.set
            && !self.store.sets()?.iter().any(|s| &s.set_spec == set)
        {
            debug!(%set, "Unknown set");
            return Err(ProviderError::NoRecordsMatch);
        }

        let records: Vec<Record> = self
            .store
            .records()?
            .iter()
            .filter(|r| query.matches(&r.header))
            .filter_map(|r| r.disseminate(query.prefix))
            .collect();

        if records.is_empty() {
            return Err(ProviderError::NoRecordsMatch);
        }

        Ok(records)
    }
}

#[async_trait]
impl DataProvider for FileProvider {
    fn granularity(&self) -> Granularity {
        self.info.granularity
    }

    #[instrument(skip(self))]
    async fn identify(&self, base_url: &str) -> ProviderResult<Identify> {
        let info = self.info.clone();

        // Empty repositories report the Unix epoch.
        let earliest_datestamp = match info.earliest_datestamp {
            Some(ds) => ds.start(),
            None => self
                .store
                .records()?
                .first()
                .map(|r| r.header.datestamp)
                .unwrap_or_default(),
        };

        Ok(Identify {
            repository_name: info.repository_name,
            base_url: base_url.to_string(),
            protocol_version: Identify::PROTOCOL_VERSION.to_string(),
            admin_emails: info.admin_emails,
            earliest_datestamp,
            deleted_record: info.deleted_record,
            granularity: info.granularity,
            compression: info.compression,
            descriptions: info.descriptions,
        })
    }

    #[instrument(skip(self))]
    async fn get_record(&self, identifier: &str, prefix: MetadataPrefix) -> ProviderResult<Record> {
        let stored = self
            .store
            .record(identifier)?
            .ok_or_else(|| ProviderError::IdDoesNotExist {
                identifier: identifier.to_string(),
            })?;

        stored
            .disseminate(prefix)
            .ok_or_else(|| ProviderError::CannotDisseminateFormat {
                identifier: identifier.to_string(),
                prefix: prefix.to_string(),
            })
    }

    #[instrument(skip(self))]
    async fn list_records(&self, query: &ListQuery) -> ProviderResult<Vec<Record>> {
        self.select(query)
    }

    #[instrument(skip(self))]
    async fn list_identifiers(&self, query: &ListQuery) -> ProviderResult<Vec<Header>> {
        Ok(self
            .select(query)?
            .into_iter()
            .map(|r| r.header)
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> ProviderResult<Vec<MetadataFormat>> {
        let prefixes = match identifier {
            None => MetadataPrefix::ALL.to_vec(),
            Some(id) => self
                .store
                .record(id)?
                .ok_or_else(|| ProviderError::IdDoesNotExist {
                    identifier: id.to_string(),
                })?
                .formats(),
        };

        if prefixes.is_empty() {
            return Err(ProviderError::NoMetadataFormats);
        }

        Ok(prefixes.into_iter().map(MetadataFormat::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_sets(&self) -> ProviderResult<Vec<Set>> {
        let sets = self.store.sets()?;
        if sets.is_empty() {
            return Err(ProviderError::NoSetHierarchy);
        }
        Ok(sets)
    }
}
