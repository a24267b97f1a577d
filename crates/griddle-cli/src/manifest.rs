use anyhow::Result;
use griddle_core::ident;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Navigation registry consumed by the generated shell UI to discover
/// models. Read-modified-written once per scaffolded model; appending an
/// already-registered model is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub items: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// PascalCase model name; the idempotence key.
    pub name: String,
    pub label: String,
    pub path: String,
}

/// Outcome of the manifest step, for the generation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestAction {
    Added,
    AlreadyPresent,
}

impl ManifestEntry {
    pub fn for_model(model_name: &str) -> Self {
        Self {
            name: model_name.to_string(),
            label: model_name.to_string(),
            path: format!("/{}", ident::kebab_case(model_name)),
        }
    }
}

impl Manifest {
    /// Load the manifest, defaulting to empty when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Append an entry unless one with the same model name exists.
    pub fn add_if_absent(&mut self, entry: ManifestEntry) -> ManifestAction {
        if self.items.iter().any(|item| item.name == entry.name) {
            ManifestAction::AlreadyPresent
        } else {
            self.items.push(entry);
            ManifestAction::Added
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_twice_keeps_one_entry() {
        let mut manifest = Manifest::default();
        assert_eq!(
            manifest.add_if_absent(ManifestEntry::for_model("Task")),
            ManifestAction::Added
        );
        assert_eq!(
            manifest.add_if_absent(ManifestEntry::for_model("Task")),
            ManifestAction::AlreadyPresent
        );
        assert_eq!(manifest.items.len(), 1);
        assert_eq!(manifest.items[0].path, "/task");
    }
}
