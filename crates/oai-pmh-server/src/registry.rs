//! Named data sources served under `/{source}/oai`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use oai_pmh_core::{DataProvider, ProviderResult};
use oai_pmh_file::FileProvider;
use tracing::info;

/// Name of the source served at the root redirect.
pub const DEFAULT_SOURCE: &str = "default";

/// Data providers keyed by source name.
///
/// Populated once at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn DataProvider>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn DataProvider>) {
        let name = name.into();
        info!(source = %name, "Registered data source");
        self.sources.insert(name, provider);
    }

    /// Open a file-backed provider and register it.
    pub fn register_dir(&mut self, name: impl Into<String>, root: &Path) -> ProviderResult<()> {
        let provider = FileProvider::open(root)?;
        self.register(name, Arc::new(provider));
        Ok(())
    }

    /// Look up a provider by source name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn DataProvider>> {
        self.sources.get(name).cloned()
    }

    /// Registered source names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.names())
            .finish()
    }
}
