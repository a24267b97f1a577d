use std::path::PathBuf;

/// Errors surfaced by introspection and scaffolding.
///
/// Degraded introspection (precise tier unavailable or failed) is not an
/// error: it is reported through the introspection result's fidelity and a
/// warning, and generation proceeds.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema file does not exist.
    #[error("schema file not found: {path}")]
    SchemaNotFound { path: PathBuf },

    /// The file exists but no recognizable exported schema declaration was
    /// found under either supported naming convention.
    #[error("no exported schema declaration found in {path}: {reason}")]
    SchemaShape { path: PathBuf, reason: String },

    /// A bare model name could not be resolved against any conventional
    /// location. Lists every candidate path attempted.
    #[error("model file not found for `{name}`; attempted: {}", attempted.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    ModelFileNotFound {
        name: String,
        attempted: Vec<PathBuf>,
    },

    /// The isolated evaluation unit failed. Callers degrade to the
    /// approximate tier rather than propagating this to the user.
    #[error("schema evaluation failed: {reason}")]
    EvalFailed { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
