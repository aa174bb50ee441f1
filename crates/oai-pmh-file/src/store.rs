//! Filesystem storage for the file-backed provider.
//!
//! Layout under the root directory:
//!
//! ```text
//! repository.json     repository identity (optional)
//! sets.json           set hierarchy (optional)
//! records/*.json      one record per file
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use oai_pmh_core::{
    Datestamp, DeletedRecord, DublinCore, Granularity, Header, MetadataPrefix, ProviderError,
    ProviderResult, Record, RecordMetadata, Set,
};

fn map_io(err: std::io::Error) -> ProviderError {
    ProviderError::storage(format!("IO error: {}", err))
}

fn map_json(path: &Path, err: serde_json::Error) -> ProviderError {
    ProviderError::storage(format!("invalid JSON in {}: {}", path.display(), err))
}

/// Static repository identity stored in `repository.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryInfo {
    pub repository_name: String,
    #[serde(rename = "adminEmail")]
    pub admin_emails: Vec<String>,
    /// Falls back to the oldest record datestamp when unset.
    pub earliest_datestamp: Option<Datestamp>,
    pub deleted_record: DeletedRecord,
    pub granularity: Granularity,
    pub compression: Vec<String>,
    #[serde(rename = "description")]
    pub descriptions: Vec<String>,
}

impl Default for RepositoryInfo {
    fn default() -> Self {
        Self {
            repository_name: "OAI-PMH Repository".to_string(),
            admin_emails: Vec::new(),
            earliest_datestamp: None,
            deleted_record: DeletedRecord::Transient,
            granularity: Granularity::Day,
            compression: Vec::new(),
            descriptions: Vec::new(),
        }
    }
}

/// A record as stored on disk: header fields at the top level, with an
/// optional Dublin Core body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DublinCore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl StoredRecord {
    /// Render the stored item as a record in the given format.
    ///
    /// Deleted items always disseminate (without metadata). Live items
    /// without a body cannot be disseminated and yield `None`.
    pub fn disseminate(&self, prefix: MetadataPrefix) -> Option<Record> {
        if self.header.is_deleted() {
            return Some(Record::deleted(self.header.clone()));
        }

        let metadata = match prefix {
            MetadataPrefix::OaiDc => RecordMetadata::DublinCore(self.metadata.clone()?),
        };
        let record = Record::new(self.header.clone(), metadata);

        Some(match &self.about {
            Some(about) => record.with_about(about.clone()),
            None => record,
        })
    }

    /// Formats this item can be disseminated in.
    pub fn formats(&self) -> Vec<MetadataPrefix> {
        if self.header.is_deleted() || self.metadata.is_none() {
            return Vec::new();
        }
        vec![MetadataPrefix::OaiDc]
    }
}

impl From<Record> for StoredRecord {
    fn from(record: Record) -> Self {
        let metadata = record.metadata.map(|m| match m {
            RecordMetadata::DublinCore(dc) => dc,
        });
        Self {
            header: record.header,
            metadata,
            about: record.about,
        }
    }
}

/// Filesystem-backed storage for a repository.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn repository_path(&self) -> PathBuf {
        self.root.join("repository.json")
    }

    fn sets_path(&self) -> PathBuf {
        self.root.join("sets.json")
    }

    fn records_dir(&self) -> PathBuf {
        self.root.join("records")
    }

    /// Convert an identifier into a filesystem-safe file name.
    ///
    /// Bytes outside `[A-Za-z0-9._-]` are percent-encoded so distinct
    /// identifiers never share a file.
    fn file_name(identifier: &str) -> String {
        let mut name = String::with_capacity(identifier.len() + 5);
        for b in identifier.bytes() {
            if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-') {
                name.push(b as char);
            } else {
                name.push_str(&format!("%{:02X}", b));
            }
        }
        name.push_str(".json");
        name
    }

    fn record_path(&self, identifier: &str) -> PathBuf {
        self.records_dir().join(Self::file_name(identifier))
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> ProviderResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(map_io)?;
        let value = serde_json::from_str(&content).map_err(|e| map_json(path, e))?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> ProviderResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let content = serde_json::to_string_pretty(value).map_err(|e| map_json(path, e))?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, path).map_err(map_io)?;
        Ok(())
    }

    // ========================================================================
    // Repository
    // ========================================================================

    pub fn repository(&self) -> ProviderResult<RepositoryInfo> {
        Ok(Self::read_json(&self.repository_path())?.unwrap_or_default())
    }

    #[instrument(skip(self, info))]
    pub fn put_repository(&self, info: &RepositoryInfo) -> ProviderResult<()> {
        Self::write_json(&self.repository_path(), info)
    }

    // ========================================================================
    // Sets
    // ========================================================================

    pub fn sets(&self) -> ProviderResult<Vec<Set>> {
        Ok(Self::read_json(&self.sets_path())?.unwrap_or_default())
    }

    #[instrument(skip(self, sets), fields(count = sets.len()))]
    pub fn put_sets(&self, sets: &[Set]) -> ProviderResult<()> {
        Self::write_json(&self.sets_path(), &sets)
    }

    // ========================================================================
    // Records
    // ========================================================================

    #[instrument(skip(self))]
    pub fn record(&self, identifier: &str) -> ProviderResult<Option<StoredRecord>> {
        Self::read_json(&self.record_path(identifier))
    }

    /// Read every record, sorted by datestamp then identifier.
    ///
    /// Unreadable files are skipped with a warning rather than failing the
    /// whole listing.
    #[instrument(skip(self))]
    pub fn records(&self) -> ProviderResult<Vec<StoredRecord>> {
        let dir = self.records_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir).map_err(map_io)? {
            let path = entry.map_err(map_io)?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match Self::read_json::<StoredRecord>(&path) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable record"),
            }
        }

        records.sort_by(|a, b| {
            a.header
                .datestamp
                .cmp(&b.header.datestamp)
                .then_with(|| a.header.identifier.cmp(&b.header.identifier))
        });

        debug!(count = records.len(), "Loaded records");

        Ok(records)
    }

    #[instrument(skip(self, record), fields(identifier = %record.header.identifier))]
    pub fn put_record(&self, record: &StoredRecord) -> ProviderResult<()> {
        Self::write_json(&self.record_path(&record.header.identifier), record)?;
        debug!("Stored record");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove_record(&self, identifier: &str) -> ProviderResult<bool> {
        let path = self.record_path(identifier);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(map_io)?;
        debug!("Removed record");
        Ok(true)
    }
}
