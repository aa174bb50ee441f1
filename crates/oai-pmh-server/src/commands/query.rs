//! Query command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use oai_pmh_core::{DataProvider, RequestParams, respond};
use oai_pmh_file::FileProvider;
use oai_pmh_server::render;

use super::ensure_dir;
use crate::output;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Repository directory
    #[arg(long, env = "OAI_PMH_ROOT")]
    pub root: PathBuf,

    /// Base URL echoed in the response
    #[arg(long, default_value = "http://localhost:8000/default/oai")]
    pub base_url: String,

    /// Print the response envelope as JSON instead of XML
    #[arg(long)]
    pub json: bool,

    /// Raw query string, e.g. "verb=GetRecord&identifier=oai:x:1&metadataPrefix=oai_dc"
    pub query: String,
}

pub async fn run(args: QueryArgs) -> Result<()> {
    ensure_dir(&args.root)?;
    let provider = FileProvider::open(&args.root)
        .with_context(|| format!("Failed to open repository at {}", args.root.display()))?;

    let query = args.query.strip_prefix('?').unwrap_or(&args.query);
    let params: RequestParams = url::form_urlencoded::parse(query.as_bytes()).collect();

    let envelope = respond(&provider, &args.base_url, &params)
        .await
        .context("Request failed")?;

    if let Err(err) = &envelope.outcome {
        output::error(&err.to_string());
    }

    if args.json {
        output::json_pretty(&envelope)?;
    } else {
        let xml = render(&envelope, provider.granularity()).context("Failed to render response")?;
        println!("{xml}");
    }

    Ok(())
}
