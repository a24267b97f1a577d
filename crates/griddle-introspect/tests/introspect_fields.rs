use griddle_core::{BaseType, Error, FieldShape};
use griddle_introspect::{introspect, Fidelity, IntrospectOptions};
use pretty_assertions::assert_eq;

fn approximate() -> IntrospectOptions {
    IntrospectOptions {
        force_approximate: true,
        ..IntrospectOptions::default()
    }
}

// ---------------------------------------------------------------------------
// Field names and declaration order
// ---------------------------------------------------------------------------

#[test]
fn field_order_matches_declaration_order() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    let names: Vec<_> = result.model.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "id",
            "title",
            "done",
            "priority",
            "estimate",
            "dueAt",
            "ownerId",
            "tags",
            "createdAt",
            "updatedAt",
        ]
    );
}

#[test]
fn model_name_derived_from_file_name() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    assert_eq!(result.model.model_name, "Task");
    assert_eq!(result.model.schema_ident, "taskSchema");
}

// ---------------------------------------------------------------------------
// Optionality: `.optional()` and `.default(...)` both mark the field
// ---------------------------------------------------------------------------

#[test]
fn optional_and_default_both_report_optional() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    let model = &result.model;
    assert!(model.field("done").unwrap().optional, "default(false)");
    assert!(model.field("priority").unwrap().optional, "default value");
    assert!(model.field("estimate").unwrap().optional, "optional()");
    assert!(!model.field("title").unwrap().optional);
}

// ---------------------------------------------------------------------------
// Base types and arrays
// ---------------------------------------------------------------------------

#[test]
fn scalar_base_types() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    let model = &result.model;
    assert_eq!(model.field("title").unwrap().base_type(), BaseType::String);
    assert_eq!(model.field("done").unwrap().base_type(), BaseType::Boolean);
    assert_eq!(model.field("estimate").unwrap().base_type(), BaseType::Number);
    assert_eq!(model.field("dueAt").unwrap().base_type(), BaseType::Date);
}

#[test]
fn array_of_primitive_is_array_and_optional() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    let tags = result.model.field("tags").unwrap();
    assert!(tags.is_array());
    assert!(tags.optional);
    assert_eq!(tags.base_type(), BaseType::String);
}

// ---------------------------------------------------------------------------
// Foreign keys
// ---------------------------------------------------------------------------

#[test]
fn owner_id_is_foreign_key_to_owner() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    let owner = result.model.field("ownerId").unwrap();
    assert!(owner.is_foreign_key());
    assert_eq!(owner.referenced_model(), Some("Owner"));
}

#[test]
fn plain_id_is_not_a_foreign_key() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    assert!(!result.model.field("id").unwrap().is_foreign_key());
}

// ---------------------------------------------------------------------------
// Degraded fidelity
// ---------------------------------------------------------------------------

#[test]
fn forced_approximate_reports_degraded() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    assert!(matches!(result.fidelity, Fidelity::Degraded { .. }));
    // The regex tier cannot recover enum values.
    let priority = result.model.field("priority").unwrap();
    assert!(priority.enum_values().is_none());
    assert!(matches!(
        priority.shape,
        FieldShape::Scalar {
            base: BaseType::String
        }
    ));
}

// ---------------------------------------------------------------------------
// Empty schemas and reserved fields
// ---------------------------------------------------------------------------

#[test]
fn zero_field_schema_is_legal() {
    let result = introspect("tests/fixtures/empty.ts", &approximate()).unwrap();
    assert!(result.model.fields.is_empty());
    assert!(!result.model.has_id_field());
}

#[test]
fn reserved_fields_detected() {
    let result = introspect("tests/fixtures/task.ts", &approximate()).unwrap();
    assert!(result.model.has_id_field());
    assert!(result.model.has_created_at());
    assert!(result.model.has_updated_at());
    let form: Vec<_> = result.model.form_fields().map(|f| f.name.as_str()).collect();
    assert!(!form.contains(&"id"));
    assert!(!form.contains(&"createdAt"));
    assert!(!form.contains(&"updatedAt"));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_schema_not_found() {
    let err = introspect("tests/fixtures/nope.ts", &approximate()).unwrap_err();
    assert!(matches!(err, Error::SchemaNotFound { .. }));
}

#[test]
fn file_without_schema_export_is_shape_error() {
    let err = introspect("tests/fixtures/not-a-schema.ts", &approximate()).unwrap_err();
    assert!(matches!(err, Error::SchemaShape { .. }));
}
