use crate::resolve_model::resolve_model_file;
use anyhow::Result;
use clap::Parser;
use console::style;
use griddle_introspect::{introspect, Fidelity, IntrospectOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct IntrospectCommand {
    /// Model to inspect: a schema file path or a bare model name
    model: String,

    /// Skip the evaluation tier and use regex recovery
    #[arg(long)]
    approximate: bool,

    /// Project root the schema directories are relative to
    #[arg(long, default_value = ".")]
    project_root: PathBuf,
}

impl IntrospectCommand {
    pub(crate) fn run(self) -> Result<()> {
        let schema_path = resolve_model_file(&self.project_root, &self.model)?;
        let options = IntrospectOptions {
            force_approximate: self.approximate,
            ..IntrospectOptions::default()
        };
        let introspection = introspect(&schema_path, &options)?;

        match &introspection.fidelity {
            Fidelity::Full => {}
            Fidelity::Degraded { reason } => eprintln!(
                "{} {}",
                style("!").yellow().bold(),
                style(format!(
                    "approximate introspection ({reason}); enum values and \
                     resolved defaults are unavailable"
                ))
                .yellow()
            ),
        }

        println!("{}", serde_json::to_string_pretty(&introspection.model)?);
        Ok(())
    }
}
