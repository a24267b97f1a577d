use griddle_core::{ident, Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A loaded schema file with its exported declaration located.
#[derive(Debug, Clone)]
pub struct SchemaSource {
    pub path: PathBuf,
    pub text: String,

    /// Name of the exported schema value (`taskSchema` or `Task`).
    pub schema_ident: String,

    /// PascalCase model name: explicit `displayName` export when present,
    /// otherwise derived from the file name.
    pub model_name: String,

    /// Text of the root object body, between the braces of `z.object({...})`.
    pub object_body: String,
}

fn suffix_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"export\s+const\s+(\w+Schema)\s*=\s*z\s*\.\s*object\s*\(\s*\{").unwrap()
    })
}

fn bare_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"export\s+const\s+([A-Z]\w*)\s*=\s*z\s*\.\s*object\s*\(\s*\{").unwrap()
    })
}

fn display_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"export\s+const\s+displayName\s*=\s*["']([^"']+)["']"#).unwrap()
    })
}

impl SchemaSource {
    /// Load a schema file and locate its exported object-schema
    /// declaration. Two naming conventions coexist in the ecosystem for
    /// the same construct, so the suffix form (`fooSchema`) is tried
    /// first, then a bare PascalCase declaration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(path, text)
    }

    pub fn parse(path: &Path, text: String) -> Result<Self> {
        let located = suffix_pattern()
            .captures(&text)
            .or_else(|| bare_pattern().captures(&text));

        let Some(caps) = located else {
            return Err(Error::SchemaShape {
                path: path.to_path_buf(),
                reason: "no `export const <name> = z.object({...})` declaration".to_string(),
            });
        };

        let schema_ident = caps[1].to_string();
        let body_start = caps.get(0).unwrap().end();
        let object_body = match extract_braced_body(&text, body_start) {
            Some(body) => body,
            None => {
                return Err(Error::SchemaShape {
                    path: path.to_path_buf(),
                    reason: "unbalanced braces in schema object body".to_string(),
                })
            }
        };

        let model_name = display_name_pattern()
            .captures(&text)
            .map(|caps| ident::pascal_case(&caps[1]))
            .unwrap_or_else(|| model_name_from_path(path));

        Ok(Self {
            path: path.to_path_buf(),
            text,
            schema_ident,
            model_name,
            object_body,
        })
    }
}

fn model_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    ident::pascal_case(&stem)
}

/// Return the text between `start` (just past an opening `{`) and its
/// matching `}`, tracking nesting and skipping string literals.
fn extract_braced_body(text: &str, start: usize) -> Option<String> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut in_string: Option<u8> = None;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        match in_string {
            Some(quote) => {
                if b == b'\\' {
                    i += 1;
                } else if b == quote {
                    in_string = None;
                }
            }
            None => match b {
                b'"' | b'\'' | b'`' => in_string = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(text[start..i].to_string());
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}
