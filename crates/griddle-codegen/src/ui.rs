//! UI generators: list, detail, form, create page, edit page. Columns and
//! controls derive from the descriptor's field shapes via exhaustive
//! matching, so every supported shape has exactly one rendering per
//! surface.

mod detail;
mod form;
mod list;
mod pages;

pub use detail::generate as detail;
pub use form::generate as form;
pub use list::generate as list;
pub use pages::{create_page, edit_page};

use griddle_core::{BaseType, FieldDescriptor, FieldShape};

/// JSX expression rendering one field of `row` for read-only display.
pub(crate) fn cell_expr(field: &FieldDescriptor) -> String {
    let name = &field.name;
    match &field.shape {
        FieldShape::Scalar { base: BaseType::Boolean } => {
            format!("{{row.{name} ? \"yes\" : \"no\"}}")
        }
        FieldShape::Scalar { base: BaseType::Date } => {
            format!("{{row.{name} ? new Date(row.{name} as string).toLocaleString() : \"\"}}")
        }
        FieldShape::Scalar { base: BaseType::Object } => {
            format!("{{JSON.stringify(row.{name} ?? null)}}")
        }
        FieldShape::Scalar { .. } | FieldShape::Enum { .. } | FieldShape::ForeignKey { .. } => {
            format!("{{String(row.{name} ?? \"\")}}")
        }
        FieldShape::ScalarArray { .. } => {
            format!("{{((row.{name} as unknown[]) ?? []).join(\", \")}}")
        }
        FieldShape::NestedRef { reference } => {
            format!("{{(row.{name} as any)?.{} ?? \"\"}}", reference.display_field)
        }
        FieldShape::NestedArray { reference } => format!(
            "{{(((row.{name} as any[]) ?? []).map((item) => item.{}).join(\", \"))}}",
            reference.display_field
        ),
    }
}

/// Human-readable column/label text for a field name.
pub(crate) fn label_text(name: &str) -> String {
    let mut label = String::new();
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                label.push(' ');
            }
            label.push(ch);
        }
    }
    label
}
