use griddle_codegen::backend;
use griddle_core::{BaseType, FieldDescriptor, FieldShape, ModelDescriptor, TargetConfig};
use pretty_assertions::assert_eq;

fn task() -> ModelDescriptor {
    let mut model = ModelDescriptor::new("Task", "taskSchema");
    model.fields = vec![
        FieldDescriptor::scalar("id", BaseType::String),
        FieldDescriptor::scalar("title", BaseType::String),
        FieldDescriptor {
            name: "priority".into(),
            shape: FieldShape::Enum {
                values: vec!["low".into(), "medium".into(), "high".into()],
            },
            optional: true,
        },
        FieldDescriptor::scalar("createdAt", BaseType::Date),
        FieldDescriptor::scalar("updatedAt", BaseType::Date),
    ];
    model
}

// ---------------------------------------------------------------------------
// Route and naming conventions
// ---------------------------------------------------------------------------

#[test]
fn five_operations_on_the_camel_case_route() {
    let out = backend::generate(&task(), &TargetConfig::default());
    assert!(out.contains(r#"registerRoute("GET", "/task""#));
    assert!(out.contains(r#"registerRoute("GET", "/task/:id""#));
    assert!(out.contains(r#"registerRoute("POST", "/task""#));
    assert!(out.contains(r#"registerRoute("PUT", "/task/:id""#));
    assert!(out.contains(r#"registerRoute("DELETE", "/task/:id""#));
}

#[test]
fn container_name_matches_route() {
    let out = backend::generate(&task(), &TargetConfig::default());
    assert!(out.contains(r#"getContainer("task")"#));
}

#[test]
fn schema_import_is_relative_to_functions_dir() {
    let out = backend::generate(&task(), &TargetConfig::default());
    assert!(out.contains(r#"import { taskSchema } from "../src/schemas/task";"#));
}

// ---------------------------------------------------------------------------
// Create/update semantics
// ---------------------------------------------------------------------------

#[test]
fn create_populates_id_and_timestamps() {
    let out = backend::generate(&task(), &TargetConfig::default());
    assert!(out.contains("crypto.randomUUID()"));
    assert!(out.contains("createdAt: now"));
    assert!(out.contains("updatedAt: now"));
}

#[test]
fn update_preserves_created_at_and_refreshes_updated_at() {
    let out = backend::generate(&task(), &TargetConfig::default());
    assert!(out.contains("createdAt: existing.createdAt"));
    assert!(out.contains("updatedAt: new Date().toISOString()"));
}

#[test]
fn update_distinguishes_not_found_from_validation_failure() {
    let out = backend::generate(&task(), &TargetConfig::default());
    assert!(out.contains(r#"error: "NotFound""#));
    assert!(out.contains(r#"error: "ValidationFailed""#));
    assert!(out.contains(r#"error: "Internal""#));
    // Not-found check happens before the merged payload is validated.
    let put = out.find(r#"registerRoute("PUT""#).unwrap();
    let not_found = out[put..].find("notFound(params.id)").unwrap();
    let validate = out[put..].find("safeParse").unwrap();
    assert!(not_found < validate);
}

#[test]
fn every_operation_validates_before_persisting() {
    let out = backend::generate(&task(), &TargetConfig::default());
    // Both mutating operations validate the effective payload.
    assert_eq!(out.matches("taskSchema.safeParse").count(), 2);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn generation_is_byte_identical_across_runs() {
    let config = TargetConfig::default();
    assert_eq!(
        backend::generate(&task(), &config),
        backend::generate(&task(), &config)
    );
}
