//! OAI-PMH 2.0 XML rendering of response envelopes.
//!
//! Rendering is a pure function of the [`Envelope`] and the repository's
//! datestamp granularity. Header datestamps are written at that
//! granularity; `responseDate` is always written to the second.

use chrono::{DateTime, Utc};
use oai_pmh_core::{
    Datestamp, DublinCore, Envelope, Granularity, Header, Identify, MetadataFormat,
    MetadataPrefix, OaiError, Payload, Record, RecordMetadata, Set,
};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

pub const OAI_NAMESPACE: &str = "http://www.openarchives.org/OAI/2.0/";
pub const OAI_SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/ http://www.openarchives.org/OAI/2.0/OAI-PMH.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// Errors from producing the XML document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write XML: {0}")]
    Write(#[from] quick_xml::Error),

    #[error("rendered XML is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

type RenderResult = Result<(), RenderError>;

/// Render an envelope as an OAI-PMH 2.0 document.
pub fn render(envelope: &Envelope, granularity: Granularity) -> Result<String, RenderError> {
    let mut out = XmlOut {
        writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        granularity,
    };

    out.writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    out.open(
        "OAI-PMH",
        &[
            ("xmlns", OAI_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", OAI_SCHEMA_LOCATION),
        ],
    )?;

    out.text_element("responseDate", &Datestamp::format_utc(&envelope.response_date))?;

    let request_attrs: Vec<(&str, &str)> = envelope
        .request
        .arguments
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    out.open("request", &request_attrs)?;
    out.text(&envelope.request.base_url)?;
    out.close("request")?;

    match &envelope.outcome {
        Ok(payload) => out.payload(payload)?,
        Err(err) => out.error(err)?,
    }

    out.close("OAI-PMH")?;

    Ok(String::from_utf8(out.writer.into_inner())?)
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
    granularity: Granularity,
}

impl XmlOut {
    // ========================================================================
    // Primitives
    // ========================================================================

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> RenderResult {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> RenderResult {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, value: &str) -> RenderResult {
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, value: &str) -> RenderResult {
        self.text_element_with(name, &[], value)
    }

    fn text_element_with(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        value: &str,
    ) -> RenderResult {
        if value.is_empty() {
            let empty = BytesStart::new(name).with_attributes(attrs.iter().copied());
            self.writer.write_event(Event::Empty(empty))?;
            return Ok(());
        }
        self.open(name, attrs)?;
        self.text(value)?;
        self.close(name)
    }

    fn datestamp(&self, dt: &DateTime<Utc>) -> String {
        self.granularity.format(dt)
    }

    // ========================================================================
    // Response bodies
    // ========================================================================

    fn error(&mut self, err: &OaiError) -> RenderResult {
        self.text_element_with("error", &[("code", err.code.as_str())], &err.message)
    }

    fn payload(&mut self, payload: &Payload) -> RenderResult {
        let verb = payload.verb().as_str();
        self.open(verb, &[])?;
        match payload {
            Payload::Identify(identify) => self.identify(identify)?,
            Payload::GetRecord(p) => self.record(&p.record)?,
            Payload::ListRecords(p) => {
                for record in &p.records {
                    self.record(record)?;
                }
                self.resumption_token(p.resumption_token.as_deref())?;
            }
            Payload::ListIdentifiers(p) => {
                for header in &p.headers {
                    self.header(header)?;
                }
                self.resumption_token(p.resumption_token.as_deref())?;
            }
            Payload::ListMetadataFormats(p) => {
                for format in &p.metadata_formats {
                    self.metadata_format(format)?;
                }
            }
            Payload::ListSets(p) => {
                for set in &p.sets {
                    self.set(set)?;
                }
                self.resumption_token(p.resumption_token.as_deref())?;
            }
        }
        self.close(verb)
    }

    fn identify(&mut self, identify: &Identify) -> RenderResult {
        self.text_element("repositoryName", &identify.repository_name)?;
        self.text_element("baseURL", &identify.base_url)?;
        self.text_element("protocolVersion", &identify.protocol_version)?;
        for email in &identify.admin_emails {
            self.text_element("adminEmail", email)?;
        }
        let earliest = self.datestamp(&identify.earliest_datestamp);
        self.text_element("earliestDatestamp", &earliest)?;
        self.text_element("deletedRecord", identify.deleted_record.as_str())?;
        self.text_element("granularity", identify.granularity.as_str())?;
        for compression in &identify.compression {
            self.text_element("compression", compression)?;
        }
        for description in &identify.descriptions {
            self.text_element("description", description)?;
        }
        Ok(())
    }

    fn header(&mut self, header: &Header) -> RenderResult {
        let attrs: &[(&str, &str)] = if header.is_deleted() {
            &[("status", "deleted")]
        } else {
            &[]
        };
        self.open("header", attrs)?;
        self.text_element("identifier", &header.identifier)?;
        let datestamp = self.datestamp(&header.datestamp);
        self.text_element("datestamp", &datestamp)?;
        for spec in &header.set_spec {
            self.text_element("setSpec", spec)?;
        }
        self.close("header")
    }

    fn record(&mut self, record: &Record) -> RenderResult {
        self.open("record", &[])?;
        self.header(&record.header)?;
        if let Some(metadata) = &record.metadata {
            self.open("metadata", &[])?;
            match metadata {
                RecordMetadata::DublinCore(dc) => self.dublin_core(dc)?,
            }
            self.close("metadata")?;
        }
        if let Some(about) = &record.about {
            self.text_element("about", about)?;
        }
        self.close("record")
    }

    fn dublin_core(&mut self, dc: &DublinCore) -> RenderResult {
        let prefix = MetadataPrefix::OaiDc;
        let location = format!("{} {}", prefix.namespace(), prefix.schema());
        self.open(
            "oai_dc:dc",
            &[
                ("xmlns:oai_dc", prefix.namespace()),
                ("xmlns:dc", DC_NAMESPACE),
                ("xmlns:xsi", XSI_NAMESPACE),
                ("xsi:schemaLocation", location.as_str()),
            ],
        )?;
        for (element, values) in dc.elements() {
            let name = format!("dc:{element}");
            for value in values {
                self.text_element(&name, value)?;
            }
        }
        self.close("oai_dc:dc")
    }

    fn metadata_format(&mut self, format: &MetadataFormat) -> RenderResult {
        self.open("metadataFormat", &[])?;
        self.text_element("metadataPrefix", format.metadata_prefix.as_str())?;
        self.text_element("schema", &format.schema)?;
        self.text_element("metadataNamespace", &format.metadata_namespace)?;
        self.close("metadataFormat")
    }

    fn set(&mut self, set: &Set) -> RenderResult {
        self.open("set", &[])?;
        self.text_element("setSpec", &set.set_spec)?;
        self.text_element("setName", &set.set_name)?;
        if !set.set_description.is_empty() {
            self.open("setDescription", &[])?;
            let description = DublinCore {
                description: vec![set.set_description.clone()],
                ..DublinCore::default()
            };
            self.dublin_core(&description)?;
            self.close("setDescription")?;
        }
        self.close("set")
    }

    fn resumption_token(&mut self, token: Option<&str>) -> RenderResult {
        match token {
            Some(token) => self.text_element("resumptionToken", token),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use oai_pmh_core::{ErrorCode, GetRecord, ListIdentifiers, ListSets, RequestParams};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
    }

    fn envelope(params: &[(&str, &str)], outcome: oai_pmh_core::Outcome) -> Envelope {
        let params = RequestParams::new(params.iter().copied());
        Envelope::assemble_at(at(2024, 3, 1), "http://example.org/oai", &params, outcome)
    }

    #[test]
    fn error_document() {
        let env = envelope(
            &[("verb", "ListSets")],
            Err(OaiError::new(ErrorCode::NoSetHierarchy, "no sets & no luck")),
        );
        let xml = render(&env, Granularity::Seconds).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(&format!("<OAI-PMH xmlns=\"{OAI_NAMESPACE}\"")));
        assert!(xml.contains("<responseDate>2024-03-01T10:30:00Z</responseDate>"));
        assert!(xml.contains(
            "<request verb=\"ListSets\">http://example.org/oai</request>"
        ));
        assert!(xml.contains("<error code=\"noSetHierarchy\">no sets &amp; no luck</error>"));
        assert!(!xml.contains("<ListSets>"));
    }

    #[test]
    fn bad_verb_has_bare_request() {
        let env = envelope(&[("verb", "Nope")], Err(OaiError::bad_verb("bad")));
        let xml = render(&env, Granularity::Seconds).unwrap();
        assert!(xml.contains("<request>http://example.org/oai</request>"));
    }

    #[test]
    fn deleted_record_has_status_and_no_metadata() {
        let mut header = Header::new("oai:x:1", at(2010, 6, 1)).with_sets(["a:b"]);
        header.deleted = true;
        let payload = Payload::GetRecord(GetRecord {
            record: Record::deleted(header),
        });
        let env = envelope(
            &[("verb", "GetRecord"), ("identifier", "oai:x:1"), ("metadataPrefix", "oai_dc")],
            Ok(payload),
        );
        let xml = render(&env, Granularity::Day).unwrap();

        assert!(xml.contains("<header status=\"deleted\">"));
        assert!(xml.contains("<datestamp>2010-06-01</datestamp>"));
        assert!(xml.contains("<setSpec>a:b</setSpec>"));
        assert!(!xml.contains("<metadata>"));
    }

    #[test]
    fn live_record_renders_dublin_core() {
        let header = Header::new("oai:x:2", at(2001, 12, 14));
        let dc = DublinCore {
            title: vec!["On <Things>".to_string()],
            creator: vec!["Ada".to_string(), "Bob".to_string()],
            ..DublinCore::default()
        };
        let record = Record::new(header, RecordMetadata::DublinCore(dc));
        let env = envelope(
            &[("verb", "GetRecord")],
            Ok(Payload::GetRecord(GetRecord { record })),
        );
        let xml = render(&env, Granularity::Seconds).unwrap();

        assert!(xml.contains("<header>"));
        assert!(xml.contains("<datestamp>2001-12-14T10:30:00Z</datestamp>"));
        assert!(xml.contains("<oai_dc:dc xmlns:oai_dc=\"http://www.openarchives.org/OAI/2.0/oai_dc/\""));
        assert!(xml.contains("<dc:title>On &lt;Things&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>Ada</dc:creator>"));
        assert!(xml.contains("<dc:creator>Bob</dc:creator>"));
        assert!(!xml.contains("<dc:subject"));
    }

    #[test]
    fn resumption_token_omitted_when_none() {
        let payload = Payload::ListIdentifiers(ListIdentifiers {
            headers: vec![Header::new("oai:x:1", at(2001, 1, 1))],
            resumption_token: None,
        });
        let xml = render(&envelope(&[("verb", "ListIdentifiers")], Ok(payload)), Granularity::Day)
            .unwrap();
        assert!(xml.contains("<ListIdentifiers>"));
        assert!(!xml.contains("resumptionToken"));
    }

    #[test]
    fn set_description_wrapped_in_dublin_core() {
        let payload = Payload::ListSets(ListSets {
            sets: vec![
                Set {
                    set_spec: "content".to_string(),
                    set_name: "Content".to_string(),
                    set_description: "All content".to_string(),
                },
                Set {
                    set_spec: "other".to_string(),
                    set_name: "Other".to_string(),
                    set_description: String::new(),
                },
            ],
            resumption_token: None,
        });
        let xml = render(&envelope(&[("verb", "ListSets")], Ok(payload)), Granularity::Day)
            .unwrap();
        assert!(xml.contains("<setSpec>content</setSpec>"));
        assert!(xml.contains("<dc:description>All content</dc:description>"));
        assert_eq!(xml.matches("<setDescription>").count(), 1);
    }
}
