use griddle_core::BaseType;
use serde::Deserialize;

/// Field attributes as reported by a recovery tier, before reference
/// merging and foreign-key classification. The precise tier deserializes
/// this directly from the evaluator's JSON output; the approximate tier
/// constructs it from surface syntax.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub name: String,

    /// Zod type tag of the unwrapped base (`ZodString`, `string`, ...).
    #[serde(rename = "type")]
    pub type_tag: String,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub array: bool,

    #[serde(default)]
    pub enum_values: Option<Vec<String>>,
}

impl RawField {
    /// Base type, defaulting to `string` when the tag is unclassifiable.
    /// A single odd field must not abort the whole introspection.
    pub fn base_type(&self) -> BaseType {
        BaseType::from_type_tag(&self.type_tag).unwrap_or(BaseType::String)
    }
}
