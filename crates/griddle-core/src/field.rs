use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Base type of a scalar field as declared in the schema DSL.
///
/// Array-ness is structural and carried by [`FieldShape`], not by the base
/// type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    String,
    Number,
    Boolean,
    Date,
    Object,
}

impl BaseType {
    /// TypeScript type name used in emitted artifacts.
    pub fn ts_name(self) -> &'static str {
        match self {
            BaseType::String => "string",
            BaseType::Number => "number",
            BaseType::Boolean => "boolean",
            BaseType::Date => "Date",
            BaseType::Object => "Record<string, unknown>",
        }
    }

    /// Parse the Zod type-tag reported by the evaluator (`ZodString` etc.)
    /// or the bare builder method name (`string`, `coerce.number`, ...).
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag.trim_start_matches("Zod").to_ascii_lowercase().as_str() {
            "string" => Some(BaseType::String),
            "number" | "bigint" => Some(BaseType::Number),
            "boolean" => Some(BaseType::Boolean),
            "date" => Some(BaseType::Date),
            "object" | "record" => Some(BaseType::Object),
            _ => None,
        }
    }
}

/// A resolved cross-model reference: a field whose declared type is another
/// model's schema object rather than an id string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedReference {
    /// Imported identifier as consumed in the field declaration, after
    /// alias resolution.
    pub schema_ident: String,

    /// PascalCase name of the referenced model.
    pub model_name: String,

    /// Field of the referenced model used as its human-readable label in
    /// lists and selects. Priority: `name`, then `title`, then `label`.
    pub display_field: String,

    /// Path of the referenced schema file.
    pub source_path: PathBuf,
}

/// Shape of one declared field. Exactly one variant applies, which makes
/// the foreign-key / nested-reference exclusivity structural: a field
/// cannot be classified as both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldShape {
    /// Plain scalar value.
    Scalar { base: BaseType },

    /// String constrained to a fixed, ordered value set.
    Enum { values: Vec<String> },

    /// Sequence of scalar elements.
    ScalarArray { base: BaseType },

    /// String id referencing another model, detected by the `<model>Id`
    /// naming convention.
    ForeignKey { referenced_model: String },

    /// Embedded reference to another model's schema object.
    NestedRef { reference: NestedReference },

    /// Array of embedded references.
    NestedArray { reference: NestedReference },
}

/// One declared field of a model, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within the owning model.
    pub name: String,

    /// Structural shape of the field.
    pub shape: FieldShape,

    /// True when the field may be absent or carries a declared default,
    /// regardless of which wrapper combinator expressed it.
    pub optional: bool,
}

impl FieldDescriptor {
    pub fn scalar(name: impl Into<String>, base: BaseType) -> Self {
        Self {
            name: name.into(),
            shape: FieldShape::Scalar { base },
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.shape,
            FieldShape::ScalarArray { .. } | FieldShape::NestedArray { .. }
        )
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self.shape, FieldShape::ForeignKey { .. })
    }

    pub fn is_nested_ref(&self) -> bool {
        matches!(
            self.shape,
            FieldShape::NestedRef { .. } | FieldShape::NestedArray { .. }
        )
    }

    pub fn referenced_model(&self) -> Option<&str> {
        match &self.shape {
            FieldShape::ForeignKey { referenced_model } => Some(referenced_model),
            FieldShape::NestedRef { reference } | FieldShape::NestedArray { reference } => {
                Some(&reference.model_name)
            }
            _ => None,
        }
    }

    pub fn nested_reference(&self) -> Option<&NestedReference> {
        match &self.shape {
            FieldShape::NestedRef { reference } | FieldShape::NestedArray { reference } => {
                Some(reference)
            }
            _ => None,
        }
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.shape {
            FieldShape::Enum { values } => Some(values),
            _ => None,
        }
    }

    /// Base type of the field as the original attribute model reported it.
    /// References are id strings or embedded objects respectively.
    pub fn base_type(&self) -> BaseType {
        match &self.shape {
            FieldShape::Scalar { base } | FieldShape::ScalarArray { base } => *base,
            FieldShape::Enum { .. } | FieldShape::ForeignKey { .. } => BaseType::String,
            FieldShape::NestedRef { .. } | FieldShape::NestedArray { .. } => BaseType::Object,
        }
    }

    /// True for `id`, `createdAt`, `updatedAt` — platform-managed fields
    /// excluded from generated input forms and auto-populated by the
    /// generated create/update handlers.
    pub fn is_reserved(&self) -> bool {
        matches!(self.name.as_str(), "id" | "createdAt" | "updatedAt")
    }

    /// TypeScript type of the field's submitted value.
    pub fn ts_type(&self) -> String {
        match &self.shape {
            FieldShape::Scalar { base } => base.ts_name().to_string(),
            FieldShape::Enum { values } => values
                .iter()
                .map(|v| format!("\"{v}\""))
                .collect::<Vec<_>>()
                .join(" | "),
            FieldShape::ScalarArray { base } => format!("{}[]", base.ts_name()),
            FieldShape::ForeignKey { .. } => "string".to_string(),
            FieldShape::NestedRef { reference } => reference.model_name.clone(),
            FieldShape::NestedArray { reference } => format!("{}[]", reference.model_name),
        }
    }
}
