//! Code generators: pure functions from a [`ModelDescriptor`] plus naming
//! configuration to emitted TypeScript text. No generator performs I/O;
//! writing artifacts is the orchestrator's job.
//!
//! All generators derive names and routes from the same descriptor, so the
//! backend, proxy, and UI layers agree on field names, routes, and the
//! id-based partitioning convention without manual reconciliation.
//! Generation is referentially transparent: identical inputs produce
//! byte-identical output, so regenerated files diff cleanly.

pub mod backend;
pub mod infra;
pub mod proxy;
pub mod ui;

use griddle_core::ident;
use std::path::Path;

/// Header prepended to every emitted artifact.
pub(crate) const GENERATED_HEADER: &str = "// Generated by griddle. Regenerate instead of editing by hand.\n";

/// Relative import specifier from a file in `from_dir` to `to_file`, with
/// the TypeScript extension dropped.
pub(crate) fn relative_import(from_dir: &Path, to_file: &Path) -> String {
    let ups = from_dir.components().count();
    let target = to_file.with_extension("");
    let mut specifier = String::new();
    for _ in 0..ups {
        specifier.push_str("../");
    }
    if specifier.is_empty() {
        specifier.push_str("./");
    }
    specifier.push_str(&target.to_string_lossy().replace('\\', "/"));
    specifier
}

/// Import specifier for a model's schema file, relative to `from_dir`.
pub(crate) fn schema_import(from_dir: &Path, schemas_dir: &Path, model_name: &str) -> String {
    let file = schemas_dir.join(format!("{}.ts", ident::kebab_case(model_name)));
    relative_import(from_dir, &file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn relative_import_walks_up_per_component() {
        assert_eq!(
            relative_import(&PathBuf::from("functions"), &PathBuf::from("src/schemas/task.ts")),
            "../src/schemas/task"
        );
        assert_eq!(
            relative_import(
                &PathBuf::from("src/api/task"),
                &PathBuf::from("src/schemas/task.ts")
            ),
            "../../../src/schemas/task"
        );
    }
}
