//! Form component generator. Every form control, state initializer, and
//! submit conversion is selected by an exhaustive match on the field
//! shape; reserved fields never appear.
//!
//! Submit conversions preserve the platform's coercion rules: an empty
//! numeric input means "field absent", never zero; scalar arrays are
//! entered as delimited text and split/trimmed/filtered on submit;
//! selected reference ids are translated back into embedded objects from
//! the loaded option records.

use super::label_text;
use crate::GENERATED_HEADER;
use griddle_core::{ident, BaseType, FieldDescriptor, FieldShape, ModelDescriptor, TargetConfig};
use indexmap::IndexSet;

pub fn generate(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let pascal = &model.model_name;
    let api_base = &config.api_base;

    let mut states = String::new();
    let mut payloads = String::new();
    let mut controls = String::new();
    for field in model.form_fields() {
        states.push_str(&state_decl(field));
        payloads.push_str(&payload_stmt(field));
        controls.push_str(&control_jsx(field));
    }

    let mut option_loaders = String::new();
    for referenced in option_sources(model) {
        let camel = ident::camel_case(&referenced);
        option_loaders.push_str(&format!(
            r#"  const [{camel}Options, set{referenced}Options] = useState<Record<string, unknown>[]>([]);
  useEffect(() => {{
    fetch(`${{API_BASE}}/{camel}`)
      .then((res) => res.json())
      .then(set{referenced}Options)
      .catch(() => set{referenced}Options([]));
  }}, []);
"#
        ));
    }

    let body = format!(
        r#"import {{ useEffect, useState }} from "react";

const API_BASE = "{api_base}";

const optionLabel = (record: Record<string, unknown>) =>
  String(record.name ?? record.title ?? record.label ?? record.id ?? "");

export interface {pascal}FormProps {{
  initial?: Record<string, unknown>;
  onSubmit: (values: Record<string, unknown>) => void | Promise<void>;
  submitLabel: string;
}}

export function {pascal}Form({{ initial, onSubmit, submitLabel }}: {pascal}FormProps) {{
{states}{option_loaders}
  const handleSubmit = async (event: React.FormEvent) => {{
    event.preventDefault();
    const values: Record<string, unknown> = {{}};
{payloads}    await onSubmit(values);
  }};

  return (
    <form onSubmit={{handleSubmit}}>
{controls}      <button type="submit">{{submitLabel}}</button>
    </form>
  );
}}
"#
    );
    format!("{GENERATED_HEADER}{body}")
}

/// Models whose collections back selection inputs, in field order.
fn option_sources(model: &ModelDescriptor) -> IndexSet<String> {
    let mut sources = IndexSet::new();
    for field in model.form_fields() {
        match &field.shape {
            FieldShape::ForeignKey { referenced_model } => {
                sources.insert(referenced_model.clone());
            }
            FieldShape::NestedRef { reference } | FieldShape::NestedArray { reference } => {
                sources.insert(reference.model_name.clone());
            }
            _ => {}
        }
    }
    sources
}

fn setter(name: &str) -> String {
    format!("set{}", ident::capitalize_first(name))
}

fn state_decl(field: &FieldDescriptor) -> String {
    let name = &field.name;
    let set = setter(name);
    match &field.shape {
        FieldShape::Scalar { base: BaseType::Boolean } => format!(
            "  const [{name}, {set}] = useState<boolean>(Boolean(initial?.{name} ?? false));\n"
        ),
        FieldShape::Scalar { base: BaseType::Number } => format!(
            "  const [{name}, {set}] = useState<string>(\
             initial?.{name} === undefined || initial?.{name} === null ? \"\" : String(initial.{name}));\n"
        ),
        FieldShape::Scalar { base: BaseType::Date } => format!(
            "  const [{name}, {set}] = useState<string>(\
             initial?.{name} ? String(initial.{name}).slice(0, 10) : \"\");\n"
        ),
        FieldShape::Scalar { base: BaseType::Object } => format!(
            "  const [{name}, {set}] = useState<string>(\
             initial?.{name} ? JSON.stringify(initial.{name}) : \"\");\n"
        ),
        FieldShape::Scalar { base: BaseType::String }
        | FieldShape::Enum { .. }
        | FieldShape::ForeignKey { .. } => format!(
            "  const [{name}, {set}] = useState<string>(String(initial?.{name} ?? \"\"));\n"
        ),
        FieldShape::ScalarArray { .. } => format!(
            "  const [{name}, {set}] = useState<string>(\
             (((initial?.{name} as unknown[]) ?? []).join(\", \")));\n"
        ),
        FieldShape::NestedRef { .. } => format!(
            "  const [{name}, {set}] = useState<string>(String((initial?.{name} as any)?.id ?? \"\"));\n"
        ),
        FieldShape::NestedArray { .. } => format!(
            "  const [{name}, {set}] = useState<string[]>(\
             (((initial?.{name} as any[]) ?? []).map((item) => String(item.id))));\n"
        ),
    }
}

fn payload_stmt(field: &FieldDescriptor) -> String {
    let name = &field.name;
    match &field.shape {
        FieldShape::Scalar { base: BaseType::Boolean } => {
            format!("    values.{name} = {name};\n")
        }
        // Empty numeric input means "absent", never zero.
        FieldShape::Scalar { base: BaseType::Number } => format!(
            "    if ({name} !== \"\") {{\n      values.{name} = Number({name});\n    }}\n"
        ),
        FieldShape::Scalar { base: BaseType::Date } => format!(
            "    if ({name} !== \"\") {{\n      values.{name} = new Date({name}).toISOString();\n    }}\n"
        ),
        FieldShape::Scalar { base: BaseType::Object } => format!(
            "    if ({name} !== \"\") {{\n      try {{\n        values.{name} = JSON.parse({name});\n      }} catch {{\n        values.{name} = undefined;\n      }}\n    }}\n"
        ),
        FieldShape::Scalar { base: BaseType::String }
        | FieldShape::Enum { .. }
        | FieldShape::ForeignKey { .. } => {
            if field.optional {
                format!(
                    "    if ({name} !== \"\") {{\n      values.{name} = {name};\n    }}\n"
                )
            } else {
                format!("    values.{name} = {name};\n")
            }
        }
        FieldShape::ScalarArray { base } => {
            let items = format!(
                "{name}.split(\",\").map((item) => item.trim()).filter((item) => item.length > 0)"
            );
            let converted = match base {
                BaseType::Number => format!("{items}.map(Number)"),
                _ => items,
            };
            if field.optional {
                format!(
                    "    if ({name}.trim() !== \"\") {{\n      values.{name} = {converted};\n    }}\n"
                )
            } else {
                format!("    values.{name} = {converted};\n")
            }
        }
        // Translate the selected id back into the embedded object.
        FieldShape::NestedRef { reference } => {
            let options = format!("{}Options", ident::camel_case(&reference.model_name));
            format!(
                "    if ({name} !== \"\") {{\n      const selected = {options}.find((option) => String(option.id) === {name});\n      if (selected) {{\n        values.{name} = selected;\n      }}\n    }}\n"
            )
        }
        FieldShape::NestedArray { reference } => {
            let options = format!("{}Options", ident::camel_case(&reference.model_name));
            let expr = format!(
                "{name}.map((id) => {options}.find((option) => String(option.id) === id)).filter((option) => option !== undefined)"
            );
            if field.optional {
                format!(
                    "    if ({name}.length > 0) {{\n      values.{name} = {expr};\n    }}\n"
                )
            } else {
                format!("    values.{name} = {expr};\n")
            }
        }
    }
}

fn control_jsx(field: &FieldDescriptor) -> String {
    let name = &field.name;
    let set = setter(name);
    let label = label_text(name);
    let control = match &field.shape {
        FieldShape::Scalar { base: BaseType::Boolean } => format!(
            r#"<input type="checkbox" checked={{{name}}} onChange={{(e) => {set}(e.target.checked)}} />"#
        ),
        FieldShape::Scalar { base: BaseType::Number } => format!(
            r#"<input type="number" value={{{name}}} onChange={{(e) => {set}(e.target.value)}} />"#
        ),
        FieldShape::Scalar { base: BaseType::Date } => format!(
            r#"<input type="date" value={{{name}}} onChange={{(e) => {set}(e.target.value)}} />"#
        ),
        FieldShape::Scalar { base: BaseType::Object } => format!(
            r#"<textarea value={{{name}}} onChange={{(e) => {set}(e.target.value)}} />"#
        ),
        FieldShape::Scalar { base: BaseType::String } => format!(
            r#"<input value={{{name}}} onChange={{(e) => {set}(e.target.value)}} />"#
        ),
        FieldShape::Enum { values } => {
            let mut options = String::new();
            if field.optional {
                options.push_str("\n            <option value=\"\">—</option>");
            }
            for value in values {
                options.push_str(&format!(
                    "\n            <option value=\"{value}\">{value}</option>"
                ));
            }
            format!(
                r#"<select value={{{name}}} onChange={{(e) => {set}(e.target.value)}}>{options}
          </select>"#
            )
        }
        FieldShape::ScalarArray { .. } => format!(
            r#"<input value={{{name}}} placeholder="comma-separated" onChange={{(e) => {set}(e.target.value)}} />"#
        ),
        FieldShape::ForeignKey { referenced_model } => {
            let options = format!("{}Options", ident::camel_case(referenced_model));
            format!(
                r#"<select value={{{name}}} onChange={{(e) => {set}(e.target.value)}}>
            <option value="">—</option>
            {{{options}.map((option) => (
              <option key={{String(option.id)}} value={{String(option.id)}}>
                {{optionLabel(option)}}
              </option>
            ))}}
          </select>"#
            )
        }
        FieldShape::NestedRef { reference } => {
            let options = format!("{}Options", ident::camel_case(&reference.model_name));
            let display = &reference.display_field;
            format!(
                r#"<select value={{{name}}} onChange={{(e) => {set}(e.target.value)}}>
            <option value="">—</option>
            {{{options}.map((option) => (
              <option key={{String(option.id)}} value={{String(option.id)}}>
                {{String(option.{display} ?? option.id)}}
              </option>
            ))}}
          </select>"#
            )
        }
        FieldShape::NestedArray { reference } => {
            let options = format!("{}Options", ident::camel_case(&reference.model_name));
            let display = &reference.display_field;
            format!(
                r#"<select multiple value={{{name}}} onChange={{(e) => {set}(Array.from(e.target.selectedOptions).map((option) => option.value))}}>
            {{{options}.map((option) => (
              <option key={{String(option.id)}} value={{String(option.id)}}>
                {{String(option.{display} ?? option.id)}}
              </option>
            ))}}
          </select>"#
            )
        }
    };

    format!(
        r#"      <label>
        {label}
        {control}
      </label>
"#
    )
}
