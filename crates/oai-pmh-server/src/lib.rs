//! HTTP server for OAI-PMH repositories.
//!
//! Wraps the protocol engine in `oai-pmh-core` with a source registry, an
//! axum router and an XML renderer. Each registered source is a
//! [`DataProvider`](oai_pmh_core::DataProvider) served under
//! `/{source}/oai`.

pub mod config;
pub mod error;
pub mod registry;
pub mod router;
pub mod xml;

pub use config::{DEFAULT_BIND, ServerConfig, SourceSpec};
pub use error::ServerError;
pub use registry::{DEFAULT_SOURCE, SourceRegistry};
pub use router::{AppState, XML_CONTENT_TYPE, router};
pub use xml::{RenderError, render};
