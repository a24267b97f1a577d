use crate::manifest::ManifestAction;
use griddle_introspect::Fidelity;
use std::path::PathBuf;

/// Outcome of one scaffold invocation. Partial completion is expected:
/// artifacts written before a failure are kept and reported as written.
#[derive(Debug)]
pub struct GenerationReport {
    pub model_name: String,
    pub fidelity: Fidelity,
    pub artifacts: Vec<ArtifactOutcome>,
    pub manifest: Option<ManifestAction>,
}

#[derive(Debug)]
pub struct ArtifactOutcome {
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArtifactStatus {
    Written,
    /// Pre-existing target and the user declined to overwrite.
    Skipped,
    Failed(String),
}

impl GenerationReport {
    pub fn new(model_name: String, fidelity: Fidelity) -> Self {
        Self {
            model_name,
            fidelity,
            artifacts: Vec::new(),
            manifest: None,
        }
    }

    pub fn record(&mut self, path: PathBuf, status: ArtifactStatus) {
        self.artifacts.push(ArtifactOutcome { path, status });
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts
            .iter()
            .filter(|a| a.status == ArtifactStatus::Written)
    }

    pub fn has_failures(&self) -> bool {
        self.artifacts
            .iter()
            .any(|a| matches!(a.status, ArtifactStatus::Failed(_)))
    }
}
