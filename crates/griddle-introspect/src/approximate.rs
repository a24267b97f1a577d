//! Approximate recovery tier: regex extraction of the direct
//! `field: z.<type>()` surface syntax. Recognizes only the
//! `.optional()` / `.default(...)` / `.nullish()` and `.array()` /
//! `z.array(...)` suffix combinators. Materially less precise than the
//! evaluation tier (no enum values, no wrapper unwinding), but it keeps
//! the tool usable when no TypeScript runtime is available.

use crate::locate::SchemaSource;
use crate::raw::RawField;
use crate::SchemaIntrospector;
use griddle_core::Result;
use regex::Regex;
use std::sync::OnceLock;

pub struct ApproximateIntrospector;

fn field_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `name: z.string()...` or `name: z.array(z.string())...`
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(\w+)\s*:\s*z\s*\.\s*(\w+)\s*\((.*)$").unwrap()
    })
}

impl SchemaIntrospector for ApproximateIntrospector {
    fn recover_fields(&self, source: &SchemaSource) -> Result<Vec<RawField>> {
        let mut fields = Vec::new();

        for caps in field_pattern().captures_iter(&source.object_body) {
            let name = caps[1].to_string();
            let builder = &caps[2];
            let rest = &caps[3];

            let (type_tag, mut array) = match builder {
                "array" => (inner_builder(rest), true),
                other => (other.to_string(), false),
            };
            if rest.contains(".array()") {
                array = true;
            }

            fields.push(RawField {
                name,
                type_tag,
                optional: rest.contains(".optional()")
                    || rest.contains(".default(")
                    || rest.contains(".nullish()"),
                array,
                enum_values: None,
            });
        }

        Ok(fields)
    }
}

/// Element builder inside `z.array(z.<type>(...))`; unclassifiable
/// elements fall back to `string` downstream.
fn inner_builder(rest: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"z\s*\.\s*(\w+)").unwrap());
    re.captures(rest)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "string".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn recover(body: &str) -> Vec<RawField> {
        let text = format!("export const xSchema = z.object({{\n{body}\n}});\n");
        let source = SchemaSource::parse(Path::new("x.ts"), text).unwrap();
        ApproximateIntrospector.recover_fields(&source).unwrap()
    }

    #[test]
    fn direct_surface_syntax() {
        let fields = recover(
            r#"  title: z.string(),
  count: z.number().optional(),
  done: z.boolean().default(false),
  tags: z.array(z.string()),
  scores: z.number().array(),"#,
        );
        let view: Vec<_> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.type_tag.as_str(), f.optional, f.array))
            .collect();
        assert_eq!(
            view,
            [
                ("title", "string", false, false),
                ("count", "number", true, false),
                ("done", "boolean", true, false),
                ("tags", "string", false, true),
                ("scores", "number", false, true),
            ]
        );
    }

    #[test]
    fn enums_degrade_to_plain_strings() {
        let fields = recover(r#"  priority: z.enum(["low", "high"]).default("low"),"#);
        assert_eq!(fields[0].type_tag, "enum");
        assert!(fields[0].enum_values.is_none());
        assert!(fields[0].optional);
    }

    #[test]
    fn zero_field_schema_is_legal() {
        assert!(recover("").is_empty());
    }
}
