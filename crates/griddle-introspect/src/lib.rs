//! Schema introspection: recovers a [`ModelDescriptor`] from a Zod schema
//! file without a type-checker.
//!
//! Two recovery tiers share one interface. The precise tier builds an
//! isolated, dependency-inlined evaluation unit and runs it under a
//! discovered TypeScript runtime, introspecting the resulting runtime type
//! tree. The approximate tier pattern-matches the surface syntax directly
//! and is used whenever the precise tier is unavailable or fails; it
//! recovers less (no enum values, no nested wrapper unwinding) but keeps
//! the tool usable. Degradation is a warning, never an abort.

mod approximate;
mod locate;
mod merge;
mod precise;
mod raw;
pub mod resolve;

pub use approximate::ApproximateIntrospector;
pub use locate::SchemaSource;
pub use precise::{build_eval_unit, PreciseIntrospector};
pub use raw::RawField;

use griddle_core::{Error, ModelDescriptor, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Options controlling one introspection run.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    /// Wall-clock bound on the evaluation subprocess. The child is killed
    /// on expiry and the run degrades to the approximate tier.
    pub eval_timeout: Duration,

    /// Skip the precise tier entirely.
    pub force_approximate: bool,
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            eval_timeout: Duration::from_secs(10),
            force_approximate: false,
        }
    }
}

/// Fidelity of a completed introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fidelity {
    /// Field list recovered by evaluating the schema's runtime type tree.
    Full,
    /// Precise tier unavailable or failed; regex recovery was used.
    Degraded { reason: String },
}

/// Result of introspecting one schema file.
#[derive(Debug, Clone)]
pub struct Introspection {
    pub model: ModelDescriptor,
    pub fidelity: Fidelity,
}

/// Field-list recovery strategy. One implementation per tier.
pub trait SchemaIntrospector {
    fn recover_fields(&self, source: &SchemaSource) -> Result<Vec<RawField>>;
}

/// Introspect one schema file into a [`ModelDescriptor`].
///
/// Fails with [`Error::SchemaNotFound`] when the file is missing and
/// [`Error::SchemaShape`] when no exported schema declaration can be
/// located. Every other failure mode degrades.
pub fn introspect(path: impl AsRef<Path>, opts: &IntrospectOptions) -> Result<Introspection> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::SchemaNotFound {
            path: path.to_path_buf(),
        });
    }

    let source = SchemaSource::load(path)?;
    let references = resolve::resolve_references(&source);
    debug!(
        model = %source.model_name,
        references = references.len(),
        "resolved cross-schema references"
    );

    let (raw_fields, fidelity) = recover(&source, opts);

    let model = merge::build_descriptor(&source, raw_fields, &references);
    Ok(Introspection { model, fidelity })
}

fn recover(source: &SchemaSource, opts: &IntrospectOptions) -> (Vec<RawField>, Fidelity) {
    if !opts.force_approximate {
        match PreciseIntrospector::detect(opts.eval_timeout) {
            Some(precise) => match precise.recover_fields(source) {
                Ok(fields) => {
                    debug!(runtime = precise.runtime_name(), "precise tier succeeded");
                    return (fields, Fidelity::Full);
                }
                Err(err) => {
                    warn!(%err, "schema evaluation failed, falling back to regex recovery");
                    return degrade(source, format!("evaluation failed: {err}"));
                }
            },
            None => {
                warn!("no TypeScript runtime found, falling back to regex recovery");
                return degrade(source, "no TypeScript runtime available".to_string());
            }
        }
    }

    degrade(source, "approximate tier forced".to_string())
}

fn degrade(source: &SchemaSource, reason: String) -> (Vec<RawField>, Fidelity) {
    let fields = ApproximateIntrospector
        .recover_fields(source)
        .unwrap_or_default();
    (fields, Fidelity::Degraded { reason })
}
