//! Reference Resolver: detects fields whose declared type is another
//! schema object by following local import statements, rather than by
//! naming convention. Each consuming field gets its own independent
//! resolution record.

use crate::locate::SchemaSource;
use griddle_core::NestedReference;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// One field of the current model consuming an imported schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReference {
    pub field_name: String,
    pub array: bool,
    pub optional: bool,
    pub reference: NestedReference,
}

/// A local import binding: `local_name` is the name the schema file uses,
/// after `X as Y` aliasing.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalImport {
    pub local_name: String,
    pub source_path: PathBuf,
}

fn named_import_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"import\s*\{([^}]*)\}\s*from\s*["'](\.{1,2}/[^"']+)["']"#).unwrap()
    })
}

fn default_import_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"import\s+(\w+)\s+from\s*["'](\.{1,2}/[^"']+)["']"#).unwrap()
    })
}

/// Scan local (relative-path) imports, resolving each specifier against
/// the importing file's directory. Package imports are ignored.
pub fn scan_local_imports(source: &SchemaSource) -> Vec<LocalImport> {
    let base = source.path.parent().unwrap_or(Path::new("."));
    let mut imports = Vec::new();

    for caps in named_import_pattern().captures_iter(&source.text) {
        let Some(path) = resolve_specifier(base, &caps[2]) else {
            continue;
        };
        for binding in caps[1].split(',') {
            let binding = binding.trim();
            if binding.is_empty() {
                continue;
            }
            // `X as Y` binds Y locally.
            let local_name = match binding.split_once(" as ") {
                Some((_, alias)) => alias.trim(),
                None => binding,
            };
            imports.push(LocalImport {
                local_name: local_name.to_string(),
                source_path: path.clone(),
            });
        }
    }

    for caps in default_import_pattern().captures_iter(&source.text) {
        if let Some(path) = resolve_specifier(base, &caps[2]) {
            imports.push(LocalImport {
                local_name: caps[1].to_string(),
                source_path: path,
            });
        }
    }

    imports
}

/// Resolve an extensionless relative specifier the way the bundler would.
fn resolve_specifier(base: &Path, specifier: &str) -> Option<PathBuf> {
    let joined = base.join(specifier);
    let candidates = [
        joined.clone(),
        joined.with_extension("ts"),
        joined.with_extension("tsx"),
        joined.join("index.ts"),
    ];
    candidates.into_iter().find(|p| p.is_file())
}

/// Resolve every cross-schema reference consumed by the current model.
///
/// For each locally-imported identifier that itself denotes an object
/// schema, the root object body is matched against the direct
/// single-reference shape (`field: importedSchema`) and the
/// array-of-reference shapes (`field: z.array(importedSchema)` and
/// `field: importedSchema.array()`), each with an optional
/// `.optional()` / `.default(...)` / `.nullish()` wrapper.
pub fn resolve_references(source: &SchemaSource) -> Vec<ResolvedReference> {
    let mut records = Vec::new();

    for import in scan_local_imports(source) {
        let Ok(target) = SchemaSource::load(&import.source_path) else {
            // Not a schema module (or unreadable); not a reference source.
            continue;
        };
        // The binding's pre-alias name must be the target's exported
        // schema value for the import to denote a schema.
        if original_name(source, &import) != target.schema_ident {
            continue;
        }

        let reference = NestedReference {
            schema_ident: import.local_name.clone(),
            model_name: target.model_name.clone(),
            display_field: display_field(&target),
            source_path: import.source_path.clone(),
        };

        for (field_name, array, optional) in consuming_fields(&source.object_body, &import.local_name)
        {
            debug!(field = %field_name, model = %reference.model_name, array, "nested reference");
            records.push(ResolvedReference {
                field_name,
                array,
                optional,
                reference: reference.clone(),
            });
        }
    }

    records
}

/// Recover the pre-alias exported name for an import binding.
fn original_name(source: &SchemaSource, import: &LocalImport) -> String {
    for caps in named_import_pattern().captures_iter(&source.text) {
        for binding in caps[1].split(',') {
            if let Some((original, alias)) = binding.trim().split_once(" as ") {
                if alias.trim() == import.local_name {
                    return original.trim().to_string();
                }
            }
        }
    }
    import.local_name.clone()
}

/// Fields of the object body consuming `ident`, with array/optional flags.
fn consuming_fields(body: &str, ident: &str) -> Vec<(String, bool, bool)> {
    let escaped = regex::escape(ident);

    let array_wrapped =
        Regex::new(&format!(r"(\w+)\s*:\s*z\s*\.\s*array\s*\(\s*{escaped}\s*\)(.*)")).unwrap();
    let array_suffixed =
        Regex::new(&format!(r"(\w+)\s*:\s*{escaped}\s*\.\s*array\s*\(\s*\)(.*)")).unwrap();
    let singular = Regex::new(&format!(r"(\w+)\s*:\s*{escaped}\b(.*)")).unwrap();

    let mut fields = Vec::new();
    for line in body.lines() {
        if let Some(caps) = array_wrapped
            .captures(line)
            .or_else(|| array_suffixed.captures(line))
        {
            fields.push((caps[1].to_string(), true, has_optional_wrapper(&caps[2])));
        } else if let Some(caps) = singular.captures(line) {
            // Skip the array forms already handled above.
            if caps[2].trim_start().starts_with(".array") {
                continue;
            }
            fields.push((caps[1].to_string(), false, has_optional_wrapper(&caps[2])));
        }
    }
    fields
}

fn has_optional_wrapper(rest: &str) -> bool {
    rest.contains(".optional()") || rest.contains(".default(") || rest.contains(".nullish()")
}

/// Field used to represent the referenced model in lists and selects.
/// Fixed priority: `name`, then `title`, then `label`; `name` as the last
/// resort when none is declared or the file cannot be read.
pub fn display_field(target: &SchemaSource) -> String {
    for candidate in ["name", "title", "label"] {
        let pattern = Regex::new(&format!(r"(?m)^\s*{candidate}\s*:")).unwrap();
        if pattern.is_match(&target.object_body) {
            return candidate.to_string();
        }
    }
    "name".to_string()
}

/// Display-field lookup by path, defaulting to `name` on read failure.
pub fn display_field_for_path(path: &Path) -> String {
    match SchemaSource::load(path) {
        Ok(target) => display_field(&target),
        Err(_) => "name".to_string(),
    }
}
