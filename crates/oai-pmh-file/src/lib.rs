//! oai-pmh-file - Filesystem-backed data provider.

mod provider;
mod store;

pub use provider::FileProvider;
pub use store::{FileStore, RepositoryInfo, StoredRecord};
