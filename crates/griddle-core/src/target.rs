use crate::ident;
use std::path::PathBuf;

/// Naming and path configuration shared by every generator and the
/// orchestrator. All paths are relative to the project root; target file
/// paths derive deterministically from the model name so repeated runs
/// land on the same files.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Directory holding schema-definition files.
    pub schemas_dir: PathBuf,

    /// Directory for generated backend handler files.
    pub functions_dir: PathBuf,

    /// Directory for generated proxy (BFF) route files.
    pub routes_dir: PathBuf,

    /// Directory for generated UI page/component files.
    pub pages_dir: PathBuf,

    /// Navigation registry consumed by the generated shell UI.
    pub manifest_path: PathBuf,

    /// Master infrastructure file receiving container declarations.
    pub infra_path: PathBuf,

    /// Base URL prefix the proxy layer forwards to.
    pub api_base: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            schemas_dir: PathBuf::from("src/schemas"),
            functions_dir: PathBuf::from("functions"),
            routes_dir: PathBuf::from("src/api"),
            pages_dir: PathBuf::from("src/pages"),
            manifest_path: PathBuf::from("src/navigation.json"),
            infra_path: PathBuf::from("infra/containers.ts"),
            api_base: "/api".to_string(),
        }
    }
}

impl TargetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn functions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.functions_dir = dir.into();
        self
    }

    pub fn routes_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.routes_dir = dir.into();
        self
    }

    /// Backend handler file for a model.
    pub fn backend_file(&self, model_name: &str) -> PathBuf {
        self.functions_dir
            .join(format!("{}.ts", ident::kebab_case(model_name)))
    }

    /// Proxy route file for a model.
    pub fn proxy_file(&self, model_name: &str) -> PathBuf {
        self.routes_dir
            .join(ident::kebab_case(model_name))
            .join("routes.ts")
    }

    /// Directory for a model's generated UI files.
    pub fn ui_dir(&self, model_name: &str) -> PathBuf {
        self.pages_dir.join(ident::kebab_case(model_name))
    }

    /// Schema file for a model, by convention.
    pub fn schema_file(&self, model_name: &str) -> PathBuf {
        self.schemas_dir
            .join(format!("{}.ts", ident::kebab_case(model_name)))
    }
}
