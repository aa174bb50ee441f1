//! Core traits for pluggable data sources.

mod provider;

pub use provider::{DataProvider, ListQuery, ProviderResult};
