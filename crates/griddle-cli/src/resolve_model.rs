use griddle_core::{ident, Error};
use std::path::{Path, PathBuf};

/// Conventional directories probed when the model reference is a bare
/// name rather than a path.
const SCHEMA_DIRS: &[&str] = &["src/schemas", "schemas", "src/models"];

/// Resolve a model reference to a schema file.
///
/// An explicit path (anything containing a separator or ending in `.ts`)
/// is used as-is. A bare name is probed against the conventional
/// directories in kebab-case and camelCase file-name forms. Failure lists
/// every candidate attempted.
pub fn resolve_model_file(project_root: &Path, model_ref: &str) -> Result<PathBuf, Error> {
    if model_ref.contains('/') || model_ref.ends_with(".ts") {
        let path = project_root.join(model_ref);
        if path.is_file() {
            return Ok(path);
        }
        return Err(Error::ModelFileNotFound {
            name: model_ref.to_string(),
            attempted: vec![path],
        });
    }

    let file_names = [
        format!("{}.ts", ident::kebab_case(model_ref)),
        format!("{}.ts", ident::camel_case(model_ref)),
    ];

    let mut attempted = Vec::new();
    for dir in SCHEMA_DIRS {
        for file_name in &file_names {
            let candidate = project_root.join(dir).join(file_name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !attempted.contains(&candidate) {
                attempted.push(candidate);
            }
        }
    }

    Err(Error::ModelFileNotFound {
        name: model_ref.to_string(),
        attempted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_failure_lists_every_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve_model_file(tmp.path(), "Task").unwrap_err();
        let Error::ModelFileNotFound { attempted, .. } = err else {
            panic!("expected ModelFileNotFound");
        };
        assert!(attempted.len() >= SCHEMA_DIRS.len());
        assert!(attempted
            .iter()
            .any(|p| p.ends_with("src/schemas/task.ts")));
    }

    #[test]
    fn bare_name_resolves_against_conventional_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("schemas");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("project-task.ts"), "export const x = 1;\n").unwrap();

        let path = resolve_model_file(tmp.path(), "ProjectTask").unwrap();
        assert!(path.ends_with("schemas/project-task.ts"));
    }

    #[test]
    fn explicit_path_is_used_directly() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("custom.ts"), "export const x = 1;\n").unwrap();
        let path = resolve_model_file(tmp.path(), "custom.ts").unwrap();
        assert!(path.ends_with("custom.ts"));
    }
}
