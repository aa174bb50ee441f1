//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{query::QueryArgs, serve::ServeArgs};

/// Serve and query OAI-PMH repositories.
#[derive(Parser, Debug)]
#[command(name = "oai-pmh")]
#[command(author, version = env!("OAI_PMH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Answer a single request against a repository directory
    Query(QueryArgs),
}
