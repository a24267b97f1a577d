mod introspect_cmd;
mod manifest;
mod report;
mod resolve_model;
mod scaffold;
mod theme;

pub use manifest::{Manifest, ManifestAction, ManifestEntry};
pub use report::{ArtifactOutcome, ArtifactStatus, GenerationReport};
pub use resolve_model::resolve_model_file;
pub use scaffold::{scaffold, ScaffoldOptions};

use anyhow::Result;
use clap::Parser;

/// Griddle CLI: schema introspection and full-stack scaffolding.
#[derive(Parser, Debug)]
#[command(name = "griddle")]
#[command(about = "Griddle - scaffold CRUD backends, proxy routes, and UI from schema files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate backend, proxy, and UI artifacts for a model
    Scaffold(scaffold::ScaffoldCommand),
    /// Print the structural descriptor recovered from a schema file
    Introspect(introspect_cmd::IntrospectCommand),
}

pub fn parse_and_run() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scaffold(cmd) => cmd.run(),
        Command::Introspect(cmd) => cmd.run(),
    }
}
