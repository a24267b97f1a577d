use griddle_codegen::{backend, proxy};
use griddle_core::{BaseType, FieldDescriptor, ModelDescriptor, TargetConfig};
use pretty_assertions::assert_eq;

fn task() -> ModelDescriptor {
    let mut model = ModelDescriptor::new("Task", "taskSchema");
    model.fields = vec![
        FieldDescriptor::scalar("id", BaseType::String),
        FieldDescriptor::scalar("title", BaseType::String),
        FieldDescriptor::scalar("createdAt", BaseType::Date),
        FieldDescriptor::scalar("updatedAt", BaseType::Date),
    ];
    model
}

// ---------------------------------------------------------------------------
// Pass-through contract
// ---------------------------------------------------------------------------

#[test]
fn five_operations_are_exported() {
    let out = proxy::generate(&task(), &TargetConfig::default());
    for op in ["listTask", "getTask", "createTask", "updateTask", "deleteTask"] {
        assert!(out.contains(&format!("export async function {op}")), "{op}");
    }
}

#[test]
fn proxy_forwards_to_the_backend_route() {
    let out = proxy::generate(&task(), &TargetConfig::default());
    assert!(out.contains(r#"const BASE = "/api/task";"#));
}

#[test]
fn input_is_validated_before_forwarding() {
    let out = proxy::generate(&task(), &TargetConfig::default());
    let create = out.find("export async function createTask").unwrap();
    let validate = out[create..].find("inputSchema.safeParse").unwrap();
    let forward = out[create..].find("fetch(").unwrap();
    assert!(validate < forward);
}

#[test]
fn output_is_validated_after_receiving() {
    let out = proxy::generate(&task(), &TargetConfig::default());
    assert!(out.contains("echoValidated"));
    assert!(out.contains(r#"error: "InvalidUpstreamPayload""#));
}

#[test]
fn status_codes_are_forwarded_unchanged() {
    let out = proxy::generate(&task(), &TargetConfig::default());
    assert!(out.contains("status: res.status"));
}

#[test]
fn reserved_fields_are_optional_on_input() {
    let out = proxy::generate(&task(), &TargetConfig::default());
    assert!(out.contains(
        "taskSchema.partial({ id: true, createdAt: true, updatedAt: true })"
    ));
}

// ---------------------------------------------------------------------------
// Backend/proxy agreement: the textual reduction of the round-trip
// property — both layers must reference the same route and schema
// ---------------------------------------------------------------------------

#[test]
fn proxy_and_backend_agree_on_route_and_schema() {
    let config = TargetConfig::default();
    let model = task();
    let backend_out = backend::generate(&model, &config);
    let proxy_out = proxy::generate(&model, &config);

    let collection = model.collection_route();
    assert!(backend_out.contains(&format!("\"{collection}\"")));
    assert!(proxy_out.contains(&format!("{}{collection}", config.api_base)));
    assert!(backend_out.contains("taskSchema"));
    assert!(proxy_out.contains("taskSchema"));
}

#[test]
fn generation_is_byte_identical_across_runs() {
    let config = TargetConfig::default();
    assert_eq!(
        proxy::generate(&task(), &config),
        proxy::generate(&task(), &config)
    );
}
