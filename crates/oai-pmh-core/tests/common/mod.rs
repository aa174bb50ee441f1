#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use oai_pmh_core::{
    DataProvider, DeletedRecord, DublinCore, Granularity, Header, Identify, ListQuery,
    MetadataFormat, MetadataPrefix, ProviderError, ProviderResult, Record, RecordMetadata,
    RequestParams, Set,
};

pub const BASE_URL: &str = "http://localhost:3000/default/oai";

/// In-memory provider with a fixed, small repository.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    pub records: Vec<Record>,
    pub sets: Vec<Set>,
    /// Identifiers that exist but cannot be disseminated in any format.
    pub withheld: Vec<String>,
}

impl MockProvider {
    pub fn sample() -> Self {
        let live = Record::new(
            Header::new("oai:test:1", Utc.with_ymd_and_hms(2001, 12, 14, 0, 0, 0).unwrap())
                .with_sets(["content"]),
            RecordMetadata::DublinCore(DublinCore {
                title: vec!["Using Structural Metadata".to_string()],
                creator: vec!["Dushay, Naomi".to_string()],
                ..Default::default()
            }),
        );
        let deleted = Record::deleted(Header::new(
            "oai:test:2",
            Utc.with_ymd_and_hms(2010, 6, 1, 12, 0, 0).unwrap(),
        ));

        Self {
            records: vec![live, deleted],
            sets: vec![Set {
                set_spec: "content".to_string(),
                set_name: "Content IEs".to_string(),
                set_description: "IEs that contain content".to_string(),
            }],
            withheld: Vec::new(),
        }
    }

    fn find(&self, identifier: &str) -> ProviderResult<&Record> {
        self.records
            .iter()
            .find(|r| r.header.identifier == identifier)
            .ok_or_else(|| ProviderError::IdDoesNotExist {
                identifier: identifier.to_string(),
            })
    }

    fn select(&self, query: &ListQuery) -> ProviderResult<Vec<Record>> {
        if let Some(set) = &query.set
            && !self.sets.iter().any(|s| &s.set_spec == set)
        {
            return Err(ProviderError::NoRecordsMatch);
        }
        Ok(self
            .records
            .iter()
            .filter(|r| query.matches(&r.header))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn identify(&self, base_url: &str) -> ProviderResult<Identify> {
        Ok(Identify {
            repository_name: "Test Repository".to_string(),
            base_url: base_url.to_string(),
            protocol_version: Identify::PROTOCOL_VERSION.to_string(),
            admin_emails: vec!["admin@example.org".to_string()],
            earliest_datestamp: Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap(),
            deleted_record: DeletedRecord::Transient,
            granularity: Granularity::Day,
            compression: vec!["gzip".to_string()],
            descriptions: Vec::new(),
        })
    }

    async fn get_record(&self, identifier: &str, prefix: MetadataPrefix) -> ProviderResult<Record> {
        let record = self.find(identifier)?;
        let withheld = self.withheld.iter().any(|id| id == identifier);
        if withheld {
            return Err(ProviderError::CannotDisseminateFormat {
                identifier: identifier.to_string(),
                prefix: prefix.to_string(),
            });
        }
        if let Some(metadata) = &record.metadata
            && metadata.prefix() != prefix
        {
            return Err(ProviderError::CannotDisseminateFormat {
                identifier: identifier.to_string(),
                prefix: prefix.to_string(),
            });
        }
        Ok(record.clone())
    }

    async fn list_records(&self, query: &ListQuery) -> ProviderResult<Vec<Record>> {
        self.select(query)
    }

    async fn list_identifiers(&self, query: &ListQuery) -> ProviderResult<Vec<Header>> {
        Ok(self.select(query)?.into_iter().map(|r| r.header).collect())
    }

    async fn list_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> ProviderResult<Vec<MetadataFormat>> {
        if let Some(id) = identifier
            && self.find(id)?.header.is_deleted()
        {
            return Err(ProviderError::NoMetadataFormats);
        }
        Ok(vec![MetadataFormat::from(MetadataPrefix::OaiDc)])
    }

    async fn list_sets(&self) -> ProviderResult<Vec<Set>> {
        Ok(self.sets.clone())
    }
}

/// Provider whose every call fails with a storage fault.
#[derive(Debug, Clone, Default)]
pub struct FaultyProvider;

fn fault() -> ProviderError {
    ProviderError::storage("disk on fire")
}

#[async_trait]
impl DataProvider for FaultyProvider {
    async fn identify(&self, _base_url: &str) -> ProviderResult<Identify> {
        Err(fault())
    }

    async fn get_record(&self, _: &str, _: MetadataPrefix) -> ProviderResult<Record> {
        Err(fault())
    }

    async fn list_records(&self, _: &ListQuery) -> ProviderResult<Vec<Record>> {
        Err(fault())
    }

    async fn list_identifiers(&self, _: &ListQuery) -> ProviderResult<Vec<Header>> {
        Err(fault())
    }

    async fn list_metadata_formats(&self, _: Option<&str>) -> ProviderResult<Vec<MetadataFormat>> {
        Err(fault())
    }

    async fn list_sets(&self) -> ProviderResult<Vec<Set>> {
        Err(fault())
    }
}

/// Build request parameters from a literal list.
pub fn params(pairs: &[(&str, &str)]) -> RequestParams {
    RequestParams::new(pairs.iter().copied())
}
