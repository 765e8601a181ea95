//! # postgen CLI
//!
//! Commands:
//! - `generate`: OpenAPI document -> Postman collection -> file and/or workspace.
//! - `workspaces`: list the workspaces visible to the API key.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use postgen_core::PostgenConfig;
use std::path::PathBuf;

mod generate;
mod workspaces;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate Postman collections from OpenAPI documents")]
struct Cli {
    /// Config file (default: postgen.toml in the current directory or a parent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a collection from an OpenAPI document and publish it.
    Generate(generate::GenerateArgs),
    /// List the workspaces the API key can access.
    Workspaces,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    postgen_telemetry::init_telemetry(postgen_telemetry::filter_for_verbosity(cli.verbose));

    let config =
        PostgenConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate(args) => generate::execute(args, config).await,
        Commands::Workspaces => workspaces::execute(&config).await,
    }
}
