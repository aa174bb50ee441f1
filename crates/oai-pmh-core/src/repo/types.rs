//! Harvestable item types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Datestamp, MetadataPrefix};

/// Identity and status of one harvestable item, independent of its
/// metadata body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Unique identifier of the item.
    pub identifier: String,

    /// Date of creation, modification or deletion of the record.
    #[serde(
        serialize_with = "serialize_datestamp",
        deserialize_with = "deserialize_datestamp"
    )]
    pub datestamp: DateTime<Utc>,

    /// True if the record has been withdrawn.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,

    /// Sets the item belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_spec: Vec<String>,
}

impl Header {
    /// Create a header for a live item with no set membership.
    pub fn new(identifier: impl Into<String>, datestamp: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            datestamp,
            deleted: false,
            set_spec: Vec::new(),
        }
    }

    /// Builder-style helper adding set membership.
    pub fn with_sets<I, S>(mut self, sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_spec.extend(sets.into_iter().map(Into::into));
        self
    }

    /// Returns true if the item has been withdrawn.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns true if the item is a member of the given set.
    ///
    /// Set specs are hierarchical (`a:b:c`); membership of `a:b` implies
    /// membership of `a`.
    pub fn in_set(&self, set_spec: &str) -> bool {
        self.set_spec.iter().any(|s| {
            s == set_spec
                || s.strip_prefix(set_spec)
                    .is_some_and(|rest| rest.starts_with(':'))
        })
    }
}

/// Unqualified Dublin Core element set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DublinCore {
    pub title: Vec<String>,
    pub creator: Vec<String>,
    pub subject: Vec<String>,
    pub description: Vec<String>,
    pub publisher: Vec<String>,
    pub contributor: Vec<String>,
    pub date: Vec<String>,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub format: Vec<String>,
    pub identifier: Vec<String>,
    pub source: Vec<String>,
    pub language: Vec<String>,
    pub relation: Vec<String>,
    pub coverage: Vec<String>,
    pub rights: Vec<String>,
}

impl DublinCore {
    /// Returns `(element name, values)` pairs in schema order.
    pub fn elements(&self) -> [(&'static str, &[String]); 15] {
        [
            ("title", &self.title),
            ("creator", &self.creator),
            ("subject", &self.subject),
            ("description", &self.description),
            ("publisher", &self.publisher),
            ("contributor", &self.contributor),
            ("date", &self.date),
            ("type", &self.kind),
            ("format", &self.format),
            ("identifier", &self.identifier),
            ("source", &self.source),
            ("language", &self.language),
            ("relation", &self.relation),
            ("coverage", &self.coverage),
            ("rights", &self.rights),
        ]
    }
}

/// The metadata body of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordMetadata {
    #[serde(rename = "oai_dc")]
    DublinCore(DublinCore),
}

impl RecordMetadata {
    /// Returns the format this body is expressed in.
    pub fn prefix(&self) -> MetadataPrefix {
        match self {
            RecordMetadata::DublinCore(_) => MetadataPrefix::OaiDc,
        }
    }
}

/// A harvestable record.
///
/// `metadata` is absent if and only if the header is marked deleted; use
/// [`Record::new`] and [`Record::deleted`] to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub header: Header,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl Record {
    /// Create a live record.
    pub fn new(mut header: Header, metadata: RecordMetadata) -> Self {
        header.deleted = false;
        Self {
            header,
            metadata: Some(metadata),
            about: None,
        }
    }

    /// Create a record for a withdrawn item.
    pub fn deleted(mut header: Header) -> Self {
        header.deleted = true;
        Self {
            header,
            metadata: None,
            about: None,
        }
    }

    /// Attach an `about` container.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }
}

/// A set used for selective harvesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub set_spec: String,
    pub set_name: String,
    #[serde(default)]
    pub set_description: String,
}

/// A metadata format supported by the repository or an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFormat {
    pub metadata_prefix: MetadataPrefix,
    pub schema: String,
    pub metadata_namespace: String,
}

impl From<MetadataPrefix> for MetadataFormat {
    fn from(prefix: MetadataPrefix) -> Self {
        Self {
            metadata_prefix: prefix,
            schema: prefix.schema().to_string(),
            metadata_namespace: prefix.namespace().to_string(),
        }
    }
}

fn serialize_datestamp<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&Datestamp::format_utc(dt))
}

// Accepts day granularity too; a bare date means midnight UTC.
fn deserialize_datestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let ds = Datestamp::deserialize(deserializer)?;
    Ok(ds.start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn header() -> Header {
        Header::new("oai:test:1", Utc.with_ymd_and_hms(2001, 12, 14, 0, 0, 0).unwrap())
    }

    #[test]
    fn deleted_record_has_no_metadata() {
        let record = Record::deleted(header());
        assert!(record.header.is_deleted());
        assert!(record.metadata.is_none());
    }

    #[test]
    fn live_record_clears_deleted_flag() {
        let mut h = header();
        h.deleted = true;
        let record = Record::new(h, RecordMetadata::DublinCore(DublinCore::default()));
        assert!(!record.header.is_deleted());
        assert!(record.metadata.is_some());
    }

    #[test]
    fn hierarchical_set_membership() {
        let h = header().with_sets(["physics:hep"]);
        assert!(h.in_set("physics:hep"));
        assert!(h.in_set("physics"));
        assert!(!h.in_set("phys"));
        assert!(!h.in_set("physics:hep:th"));
    }

    #[test]
    fn header_accepts_day_datestamp() {
        let h: Header =
            serde_json::from_str(r#"{"identifier":"x","datestamp":"2001-12-14"}"#).unwrap();
        assert_eq!(h.identifier, "x");
        assert_eq!(h.datestamp, header().datestamp);
        assert!(!h.is_deleted());
    }

    #[test]
    fn record_json_shape() {
        let record = Record::new(
            header().with_sets(["content"]),
            RecordMetadata::DublinCore(DublinCore {
                title: vec!["A title".to_string()],
                ..Default::default()
            }),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["header"]["setSpec"][0], "content");
        assert_eq!(value["header"]["datestamp"], "2001-12-14T00:00:00Z");
        assert_eq!(value["metadata"]["oai_dc"]["title"][0], "A title");
        assert!(value["header"].get("deleted").is_none());
    }

    #[test]
    fn metadata_format_from_prefix() {
        let format = MetadataFormat::from(MetadataPrefix::OaiDc);
        assert_eq!(format.schema, "http://www.openarchives.org/OAI/2.0/oai_dc.xsd");
    }
}
