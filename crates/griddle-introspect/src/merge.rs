//! Post-processing merge: overlays import-analysis reference records onto
//! the tier-recovered field list and applies the foreign-key naming
//! heuristic. The two passes use different detection strategies; the merge
//! reconciles them, adding synthetic entries for references the field
//! recovery missed.

use crate::locate::SchemaSource;
use crate::raw::RawField;
use crate::resolve::ResolvedReference;
use griddle_core::{ident, BaseType, FieldDescriptor, FieldShape, ModelDescriptor};

pub fn build_descriptor(
    source: &SchemaSource,
    raw_fields: Vec<RawField>,
    references: &[ResolvedReference],
) -> ModelDescriptor {
    let mut model = ModelDescriptor::new(&source.model_name, &source.schema_ident);

    for raw in raw_fields {
        let shape = match raw.enum_values {
            Some(values) if !values.is_empty() => FieldShape::Enum { values },
            _ if raw.array => FieldShape::ScalarArray {
                base: raw.base_type(),
            },
            _ => FieldShape::Scalar {
                base: raw.base_type(),
            },
        };
        model.fields.push(FieldDescriptor {
            name: raw.name,
            shape,
            optional: raw.optional,
        });
    }

    overlay_references(&mut model, &source.object_body, references);
    apply_foreign_keys(&mut model);

    model.nested_references = references.iter().map(|r| r.reference.clone()).collect();
    model
}

/// Replace the shape of fields the resolver identified as cross-schema
/// references; insert synthetic entries for references with no
/// corresponding recovered field at their declaration position, keeping
/// the field list in source order even when recovery missed them.
fn overlay_references(model: &mut ModelDescriptor, body: &str, references: &[ResolvedReference]) {
    for record in references {
        let shape = if record.array {
            FieldShape::NestedArray {
                reference: record.reference.clone(),
            }
        } else {
            FieldShape::NestedRef {
                reference: record.reference.clone(),
            }
        };

        match model.fields.iter_mut().find(|f| f.name == record.field_name) {
            Some(field) => {
                field.shape = shape;
                field.optional = field.optional || record.optional;
            }
            None => {
                let at = declaration_index(body, &model.fields, &record.field_name);
                model.fields.insert(
                    at,
                    FieldDescriptor {
                        name: record.field_name.clone(),
                        shape,
                        optional: record.optional,
                    },
                );
            }
        }
    }
}

/// Body line on which a field is declared.
fn declaration_line(body: &str, name: &str) -> Option<usize> {
    body.lines().position(|line| {
        line.trim_start()
            .strip_prefix(name)
            .is_some_and(|rest| rest.trim_start().starts_with(':'))
    })
}

/// Insertion index for a synthetic field: before the first recovered
/// field declared after it, at the end when it cannot be located.
fn declaration_index(body: &str, fields: &[FieldDescriptor], name: &str) -> usize {
    let Some(target) = declaration_line(body, name) else {
        return fields.len();
    };
    fields
        .iter()
        .position(|field| declaration_line(body, &field.name).is_some_and(|line| line > target))
        .unwrap_or(fields.len())
}

/// A string field named `<x>Id` references the model `X` by convention.
/// The exact name `id` is excluded, as are fields already classified as
/// nested references (the shape union keeps the two mutually exclusive).
fn apply_foreign_keys(model: &mut ModelDescriptor) {
    for field in &mut model.fields {
        let FieldShape::Scalar {
            base: BaseType::String,
        } = field.shape
        else {
            continue;
        };
        if field.name == "id" {
            continue;
        }
        let Some(prefix) = field.name.strip_suffix("Id") else {
            continue;
        };
        if prefix.is_empty() {
            continue;
        }
        field.shape = FieldShape::ForeignKey {
            referenced_model: ident::capitalize_first(prefix),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddle_core::NestedReference;
    use std::path::{Path, PathBuf};

    fn source() -> SchemaSource {
        SchemaSource::parse(
            Path::new("src/schemas/task.ts"),
            "export const taskSchema = z.object({});\n".to_string(),
        )
        .unwrap()
    }

    fn raw(name: &str, tag: &str) -> RawField {
        RawField {
            name: name.to_string(),
            type_tag: tag.to_string(),
            optional: false,
            array: false,
            enum_values: None,
        }
    }

    #[test]
    fn foreign_key_from_naming_convention() {
        let model = build_descriptor(&source(), vec![raw("ownerId", "ZodString")], &[]);
        assert_eq!(
            model.fields[0].referenced_model(),
            Some("Owner"),
            "ownerId should reference Owner"
        );
        assert!(model.fields[0].is_foreign_key());
    }

    #[test]
    fn exact_id_is_not_a_foreign_key() {
        let model = build_descriptor(&source(), vec![raw("id", "ZodString")], &[]);
        assert!(!model.fields[0].is_foreign_key());
    }

    #[test]
    fn non_string_id_suffix_is_not_a_foreign_key() {
        let model = build_descriptor(&source(), vec![raw("buildId", "ZodNumber")], &[]);
        assert!(!model.fields[0].is_foreign_key());
    }

    #[test]
    fn nested_ref_wins_over_foreign_key() {
        // A field the resolver classified as a nested reference must not
        // be reclassified by the naming heuristic.
        let reference = NestedReference {
            schema_ident: "ownerSchema".into(),
            model_name: "Owner".into(),
            display_field: "name".into(),
            source_path: PathBuf::from("src/schemas/owner.ts"),
        };
        let records = vec![ResolvedReference {
            field_name: "ownerId".into(),
            array: false,
            optional: false,
            reference,
        }];
        let model = build_descriptor(&source(), vec![raw("ownerId", "ZodString")], &records);
        assert!(model.fields[0].is_nested_ref());
        assert!(!model.fields[0].is_foreign_key());
    }

    #[test]
    fn synthetic_entry_for_unrecovered_reference() {
        let reference = NestedReference {
            schema_ident: "tagSchema".into(),
            model_name: "Tag".into(),
            display_field: "label".into(),
            source_path: PathBuf::from("src/schemas/tag.ts"),
        };
        let records = vec![ResolvedReference {
            field_name: "tags".into(),
            array: true,
            optional: true,
            reference,
        }];
        let model = build_descriptor(&source(), vec![raw("title", "ZodString")], &records);
        assert_eq!(model.fields.len(), 2);
        let tags = model.field("tags").unwrap();
        assert!(tags.is_nested_ref());
        assert!(tags.is_array());
        assert!(tags.optional);
        assert_eq!(model.nested_references.len(), 1);
    }

    #[test]
    fn synthetic_entry_lands_at_its_declaration_position() {
        let source = SchemaSource::parse(
            Path::new("src/schemas/post.ts"),
            "export const postSchema = z.object({\n  title: z.string(),\n  author: authorSchema,\n  createdAt: z.date(),\n});\n"
                .to_string(),
        )
        .unwrap();
        let reference = NestedReference {
            schema_ident: "authorSchema".into(),
            model_name: "Author".into(),
            display_field: "name".into(),
            source_path: PathBuf::from("src/schemas/author.ts"),
        };
        let records = vec![ResolvedReference {
            field_name: "author".into(),
            array: false,
            optional: false,
            reference,
        }];
        // Field recovery missed `author`; the synthetic entry must not
        // trail the timestamp columns.
        let model = build_descriptor(
            &source,
            vec![raw("title", "ZodString"), raw("createdAt", "ZodDate")],
            &records,
        );
        let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "author", "createdAt"]);
    }

    #[test]
    fn enum_values_produce_enum_shape() {
        let fields = vec![RawField {
            name: "priority".into(),
            type_tag: "ZodString".into(),
            optional: true,
            array: false,
            enum_values: Some(vec!["low".into(), "medium".into(), "high".into()]),
        }];
        let model = build_descriptor(&source(), fields, &[]);
        assert_eq!(
            model.fields[0].enum_values().unwrap(),
            ["low", "medium", "high"]
        );
    }
}
