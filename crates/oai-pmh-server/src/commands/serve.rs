//! Serve command implementation.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tracing::{info, warn};
use url::Url;

use oai_pmh_server::{
    AppState, DEFAULT_BIND, DEFAULT_SOURCE, ServerConfig, SourceRegistry, SourceSpec, router,
};

use super::ensure_dir;
use crate::output;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Repository directory served as the default source
    #[arg(long, env = "OAI_PMH_ROOT")]
    pub root: PathBuf,

    /// Address to listen on
    #[arg(long, env = "OAI_PMH_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Externally visible root URL used to build each source's baseURL
    #[arg(long, env = "OAI_PMH_PUBLIC_URL")]
    pub public_url: Option<Url>,

    /// Additional source, served under /NAME/oai (repeatable)
    #[arg(long = "source", value_name = "NAME=DIR")]
    pub sources: Vec<SourceSpec>,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let mut registry = SourceRegistry::new();

    ensure_dir(&args.root)?;
    registry
        .register_dir(DEFAULT_SOURCE, &args.root)
        .with_context(|| format!("Failed to open repository at {}", args.root.display()))?;

    for spec in &args.sources {
        ensure_dir(&spec.root)?;
        registry
            .register_dir(spec.name.clone(), &spec.root)
            .with_context(|| format!("Failed to open source {spec}"))?;
    }

    let mut config = ServerConfig::new(args.bind);
    if let Some(url) = args.public_url {
        config = config.with_public_url(url);
    }

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    output::success(&format!("Listening on http://{addr}"));
    for name in registry.names() {
        output::field(name, &format!("http://{addr}/{name}/oai"));
    }
    info!(%addr, sources = registry.len(), "Server started");

    let app = router(AppState::new(config, registry));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
    }
}
