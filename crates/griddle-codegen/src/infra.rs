//! Infrastructure generator: a per-model container declaration for the
//! document store, idempotently inserted into the master infrastructure
//! file when one is present.

use crate::GENERATED_HEADER;
use griddle_core::ModelDescriptor;

/// Declaration inserted into the master container list. Partitioning is
/// id-based, matching the route convention shared by every generator.
pub fn container_snippet(model: &ModelDescriptor) -> String {
    format!(
        "  {{ name: \"{}\", partitionKey: \"/id\" }},\n",
        model.camel_name()
    )
}

/// Content of a fresh master infrastructure file holding one container.
pub fn new_master_file(model: &ModelDescriptor) -> String {
    format!(
        "{GENERATED_HEADER}export const containers = [\n{}];\n",
        container_snippet(model)
    )
}

/// Insert the model's container declaration into an existing master file.
/// Returns `None` when the declaration is already present (re-running
/// scaffold must not duplicate it) or when no container list is found.
pub fn insert_container(master: &str, model: &ModelDescriptor) -> Option<String> {
    let needle = format!("name: \"{}\"", model.camel_name());
    if master.contains(&needle) {
        return None;
    }

    let anchor = master.find("export const containers = [")?;
    let close = master[anchor..].find("];")? + anchor;
    let mut updated = String::with_capacity(master.len() + 64);
    updated.push_str(&master[..close]);
    updated.push_str(&container_snippet(model));
    updated.push_str(&master[close..]);
    Some(updated)
}
