use griddle_introspect::{introspect, IntrospectOptions};
use pretty_assertions::assert_eq;

fn approximate() -> IntrospectOptions {
    IntrospectOptions {
        force_approximate: true,
        ..IntrospectOptions::default()
    }
}

// ---------------------------------------------------------------------------
// Singular nested reference (`author: authorSchema`)
// ---------------------------------------------------------------------------

#[test]
fn singular_import_reference() {
    let result = introspect("tests/fixtures/article.ts", &approximate()).unwrap();
    let author = result.model.field("author").unwrap();
    assert!(author.is_nested_ref());
    assert!(!author.is_array());
    assert!(!author.is_foreign_key());

    let reference = author.nested_reference().unwrap();
    assert_eq!(reference.model_name, "Author");
    assert_eq!(reference.schema_ident, "authorSchema");
    assert_eq!(reference.display_field, "name");
}

// ---------------------------------------------------------------------------
// Array reference through an aliased import
// (`import { categorySchema as sectionSchema }`)
// ---------------------------------------------------------------------------

#[test]
fn aliased_array_reference() {
    let result = introspect("tests/fixtures/article.ts", &approximate()).unwrap();
    let sections = result.model.field("sections").unwrap();
    assert!(sections.is_nested_ref());
    assert!(sections.is_array());
    assert!(sections.optional);

    let reference = sections.nested_reference().unwrap();
    assert_eq!(reference.model_name, "Category");
    assert_eq!(reference.schema_ident, "sectionSchema");
    // Category has no `name` field; `title` is next in priority.
    assert_eq!(reference.display_field, "title");
}

// ---------------------------------------------------------------------------
// Resolution superset
// ---------------------------------------------------------------------------

#[test]
fn nested_references_list_covers_all_consuming_fields() {
    let result = introspect("tests/fixtures/article.ts", &approximate()).unwrap();
    let models: Vec<_> = result
        .model
        .nested_references
        .iter()
        .map(|r| r.model_name.as_str())
        .collect();
    assert_eq!(models, ["Author", "Category"]);
}

#[test]
fn field_order_matches_declaration_under_degradation() {
    // The regex tier cannot see `author: authorSchema`; its synthetic
    // entry must still land where the source declares it.
    let result = introspect("tests/fixtures/article.ts", &approximate()).unwrap();
    let names: Vec<_> = result.model.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["id", "title", "body", "author", "sections", "createdAt", "updatedAt"]
    );
}

#[test]
fn plain_fields_are_untouched_by_reference_overlay() {
    let result = introspect("tests/fixtures/article.ts", &approximate()).unwrap();
    let title = result.model.field("title").unwrap();
    assert!(!title.is_nested_ref());
    assert!(!title.is_foreign_key());
}
