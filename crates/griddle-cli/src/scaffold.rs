use crate::manifest::{Manifest, ManifestEntry};
use crate::report::{ArtifactStatus, GenerationReport};
use crate::resolve_model::resolve_model_file;
use crate::theme::dialoguer_theme;
use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use dialoguer::Confirm;
use griddle_codegen::{backend, infra, proxy, ui};
use griddle_core::{Error, ModelDescriptor, TargetConfig};
use griddle_introspect::{introspect, Fidelity, IntrospectOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
pub struct ScaffoldCommand {
    /// Model to scaffold: a schema file path or a bare model name
    model: Option<String>,

    /// Scaffold every model in the schemas directory
    #[arg(long, conflicts_with = "model")]
    all: bool,

    /// Generate only the backend and proxy layers, skipping UI
    #[arg(long)]
    api_only: bool,

    /// Alternate directory for generated backend handlers
    #[arg(long)]
    functions_dir: Option<PathBuf>,

    /// Alternate directory for generated proxy routes
    #[arg(long)]
    routes_dir: Option<PathBuf>,

    /// Overwrite existing files without prompting
    #[arg(long)]
    force: bool,

    /// Skip the evaluation tier and use regex recovery
    #[arg(long)]
    approximate: bool,

    /// Project root the generated paths are relative to
    #[arg(long, default_value = ".")]
    project_root: PathBuf,
}

impl ScaffoldCommand {
    pub(crate) fn run(self) -> Result<()> {
        let mut config = TargetConfig::default();
        if let Some(dir) = &self.functions_dir {
            config.functions_dir = dir.clone();
        }
        if let Some(dir) = &self.routes_dir {
            config.routes_dir = dir.clone();
        }

        let options = ScaffoldOptions {
            config,
            api_only: self.api_only,
            force: self.force,
            interactive: !self.force,
            introspect: IntrospectOptions {
                force_approximate: self.approximate,
                ..IntrospectOptions::default()
            },
        };

        if self.all {
            return scaffold_all(&self.project_root, &options);
        }

        let Some(model_ref) = &self.model else {
            bail!("a model name or schema path is required (or pass --all)");
        };

        let report = scaffold(&self.project_root, model_ref, &options)?;
        print_report(&report);
        Ok(())
    }
}

/// Options for one scaffold run.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub config: TargetConfig,
    pub api_only: bool,
    /// Overwrite pre-existing targets unconditionally.
    pub force: bool,
    /// Prompt on pre-existing targets; when false (and not forcing),
    /// existing files are skipped.
    pub interactive: bool,
    pub introspect: IntrospectOptions,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            config: TargetConfig::default(),
            api_only: false,
            force: false,
            interactive: false,
            introspect: IntrospectOptions::default(),
        }
    }
}

/// Per-invocation progress through the scaffold pipeline. Only the first
/// two phases can fail the whole run; later failures leave already
/// written artifacts in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Resolving,
    Introspecting,
    GeneratingBackend,
    GeneratingProxy,
    GeneratingUi,
    UpdatingManifest,
    Done,
    Failed,
}

fn enter(phase: Phase, model: &str) {
    debug!(?phase, model, "entering phase");
}

/// Scaffold one model: resolve, introspect, generate, write, register.
pub fn scaffold(
    project_root: &Path,
    model_ref: &str,
    options: &ScaffoldOptions,
) -> Result<GenerationReport, Error> {
    enter(Phase::Resolving, model_ref);
    let schema_path = resolve_model_file(project_root, model_ref)?;
    debug!(path = %schema_path.display(), "resolved model reference");

    enter(Phase::Introspecting, model_ref);
    let introspection = introspect(&schema_path, &options.introspect)?;
    let model = introspection.model;
    if let Fidelity::Degraded { reason } = &introspection.fidelity {
        warn!(%reason, model = %model.model_name, "introspection degraded");
    }

    let mut report = GenerationReport::new(model.model_name.clone(), introspection.fidelity);
    let config = &options.config;

    enter(Phase::GeneratingBackend, &model.model_name);
    let backend_path = project_root.join(config.backend_file(&model.model_name));
    let ok = write_artifact(
        &backend_path,
        &backend::generate(&model, config),
        options,
        &mut report,
    );

    if ok {
        enter(Phase::GeneratingProxy, &model.model_name);
        let proxy_path = project_root.join(config.proxy_file(&model.model_name));
        let ok = write_artifact(&proxy_path, &proxy::generate(&model, config), options, &mut report);

        if ok && !options.api_only {
            enter(Phase::GeneratingUi, &model.model_name);
            write_ui(project_root, &model, options, &mut report);
        }
    }

    if report.has_failures() {
        enter(Phase::Failed, &model.model_name);
    } else {
        enter(Phase::UpdatingManifest, &model.model_name);
        update_infra(project_root, &model, options, &mut report);
        if !options.api_only {
            if let Ok(action) = update_manifest(project_root, &model, config) {
                report.manifest = Some(action);
            }
        }
        enter(Phase::Done, &model.model_name);
    }

    Ok(report)
}

fn write_ui(
    project_root: &Path,
    model: &ModelDescriptor,
    options: &ScaffoldOptions,
    report: &mut GenerationReport,
) {
    let config = &options.config;
    let dir = project_root.join(config.ui_dir(&model.model_name));
    let artifacts = [
        ("list.tsx", ui::list(model, config)),
        ("detail.tsx", ui::detail(model, config)),
        ("form.tsx", ui::form(model, config)),
        ("create.tsx", ui::create_page(model, config)),
        ("edit.tsx", ui::edit_page(model, config)),
    ];
    for (file_name, contents) in artifacts {
        if !write_artifact(&dir.join(file_name), &contents, options, report) {
            // A write failure aborts the remaining artifacts, but never
            // removes the ones already on disk.
            return;
        }
    }
}

/// Write one artifact honoring the overwrite policy. Returns false when
/// the remaining steps for this model should stop.
fn write_artifact(
    path: &Path,
    contents: &str,
    options: &ScaffoldOptions,
    report: &mut GenerationReport,
) -> bool {
    if path.exists() && !options.force {
        let overwrite = options.interactive && confirm_overwrite(path);
        if !overwrite {
            report.record(path.to_path_buf(), ArtifactStatus::Skipped);
            return true;
        }
    }

    let result = path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| std::fs::write(path, contents).map(Some));

    match result {
        Ok(_) => {
            report.record(path.to_path_buf(), ArtifactStatus::Written);
            true
        }
        Err(err) => {
            report.record(path.to_path_buf(), ArtifactStatus::Failed(err.to_string()));
            false
        }
    }
}

fn confirm_overwrite(path: &Path) -> bool {
    Confirm::with_theme(&dialoguer_theme())
        .with_prompt(format!("{} exists, overwrite?", path.display()))
        .default(false)
        .interact()
        .unwrap_or(false)
}

fn update_infra(
    project_root: &Path,
    model: &ModelDescriptor,
    options: &ScaffoldOptions,
    report: &mut GenerationReport,
) {
    let path = project_root.join(&options.config.infra_path);
    let updated = if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(master) => infra::insert_container(&master, model),
            Err(err) => {
                report.record(path, ArtifactStatus::Failed(err.to_string()));
                return;
            }
        }
    } else {
        Some(infra::new_master_file(model))
    };

    let Some(contents) = updated else {
        // Already declared; nothing to write.
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            report.record(path, ArtifactStatus::Failed(err.to_string()));
            return;
        }
    }
    match std::fs::write(&path, contents) {
        Ok(()) => report.record(path, ArtifactStatus::Written),
        Err(err) => report.record(path, ArtifactStatus::Failed(err.to_string())),
    }
}

fn update_manifest(
    project_root: &Path,
    model: &ModelDescriptor,
    config: &TargetConfig,
) -> Result<crate::manifest::ManifestAction> {
    let path = project_root.join(&config.manifest_path);
    let mut manifest = Manifest::load_or_default(&path)?;
    let action = manifest.add_if_absent(ManifestEntry::for_model(&model.model_name));
    manifest.save(&path)?;
    Ok(action)
}

/// Whole-project generation: every schema file in the schemas directory,
/// sequentially. Files without a recognizable schema export are skipped
/// with a warning.
fn scaffold_all(project_root: &Path, options: &ScaffoldOptions) -> Result<()> {
    let schemas_dir = project_root.join(&options.config.schemas_dir);
    let entries = std::fs::read_dir(&schemas_dir)
        .with_context(|| format!("cannot read schemas directory {}", schemas_dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
        .collect();
    paths.sort();

    for path in paths {
        let model_ref = path
            .strip_prefix(project_root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        match scaffold(project_root, &model_ref, options) {
            Ok(report) => print_report(&report),
            Err(Error::SchemaShape { path, .. }) => {
                warn!(path = %path.display(), "skipping file without a schema export");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!();
    println!(
        "  {}",
        style(format!("Scaffold {}", report.model_name))
            .cyan()
            .bold()
    );
    if let Fidelity::Degraded { reason } = &report.fidelity {
        println!(
            "  {} {}",
            style("!").yellow().bold(),
            style(format!("introspection degraded: {reason}")).yellow()
        );
    }
    for artifact in &report.artifacts {
        match &artifact.status {
            ArtifactStatus::Written => println!(
                "  {} {}",
                style("✓").green().bold(),
                style(artifact.path.display().to_string()).dim()
            ),
            ArtifactStatus::Skipped => println!(
                "  {} {} (exists, skipped)",
                style("-").dim(),
                style(artifact.path.display().to_string()).dim()
            ),
            ArtifactStatus::Failed(reason) => println!(
                "  {} {}: {}",
                style("✖").red().bold(),
                artifact.path.display(),
                reason
            ),
        }
    }
    println!();
}
