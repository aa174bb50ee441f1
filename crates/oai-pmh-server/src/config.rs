//! Server configuration.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

/// Address the server binds to when none is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Settings shared by every request handler.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,
    /// Externally visible root URL, when the server sits behind a proxy.
    pub public_url: Option<Url>,
}

impl ServerConfig {
    pub fn new(bind: SocketAddr) -> Self {
        Self {
            bind,
            public_url: None,
        }
    }

    /// Builder-style helper setting the public URL.
    pub fn with_public_url(mut self, url: Url) -> Self {
        self.public_url = Some(url);
        self
    }

    /// The base URL reported for a source.
    ///
    /// With a public URL configured this is `{public_url}/{source}/oai`;
    /// otherwise it is rebuilt from the request's `Host` header and path,
    /// falling back to the bind address when the header is missing.
    pub fn base_url(&self, source: &str, host: Option<&str>, path: &str) -> String {
        match &self.public_url {
            Some(url) => format!("{}/{source}/oai", url.as_str().trim_end_matches('/')),
            None => {
                let host = host.map_or_else(|| self.bind.to_string(), str::to_string);
                format!("http://{host}{path}")
            }
        }
    }
}

/// A named data source given on the command line as `NAME=DIR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub root: PathBuf,
}

impl FromStr for SourceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, root) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=DIR, got '{s}'"))?;

        if name.is_empty() || name.contains('/') || name == "favicon.ico" {
            return Err(format!("invalid source name '{name}'"));
        }
        if root.is_empty() {
            return Err(format!("missing directory for source '{name}'"));
        }

        Ok(Self {
            name: name.to_string(),
            root: PathBuf::from(root),
        })
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.root.display())
    }
}
