use crate::field::{FieldDescriptor, NestedReference};
use crate::ident;
use serde::{Deserialize, Serialize};

/// Structural description of one model, recovered by introspecting its
/// schema file. Built fresh on every invocation and immutable once
/// produced; every generator consumes the same instance so emitted
/// artifacts agree on names, routes, and types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// PascalCase model name, from the file name or an explicit
    /// `displayName` declaration.
    pub model_name: String,

    /// Name of the exported schema value in source (`taskSchema`, `Task`).
    pub schema_ident: String,

    /// Declared fields, in declaration order. Order matters: it drives
    /// column and form-field order in generated UI.
    pub fields: Vec<FieldDescriptor>,

    /// Cross-model references resolved from the import graph. Superset of
    /// the per-field nested-reference attributes.
    pub nested_references: Vec<NestedReference>,
}

impl ModelDescriptor {
    pub fn new(model_name: impl Into<String>, schema_ident: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            schema_ident: schema_ident.into(),
            fields: Vec::new(),
            nested_references: Vec::new(),
        }
    }

    pub fn has_id_field(&self) -> bool {
        self.fields.iter().any(|f| f.name == "id")
    }

    pub fn has_created_at(&self) -> bool {
        self.fields.iter().any(|f| f.name == "createdAt")
    }

    pub fn has_updated_at(&self) -> bool {
        self.fields.iter().any(|f| f.name == "updatedAt")
    }

    /// Fields that appear in generated input forms: everything except the
    /// platform-managed `id` / `createdAt` / `updatedAt`.
    pub fn form_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_reserved())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// camelCase form, used for collection routes and container names.
    pub fn camel_name(&self) -> String {
        ident::camel_case(&self.model_name)
    }

    /// kebab-case form, used for emitted file and directory names.
    pub fn kebab_name(&self) -> String {
        ident::kebab_case(&self.model_name)
    }

    /// Collection route shared by the backend and proxy layers.
    pub fn collection_route(&self) -> String {
        format!("/{}", self.camel_name())
    }

    /// Item route shared by the backend and proxy layers.
    pub fn item_route(&self) -> String {
        format!("/{}/{{id}}", self.camel_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::BaseType;

    fn task() -> ModelDescriptor {
        let mut model = ModelDescriptor::new("ProjectTask", "projectTaskSchema");
        model.fields = vec![
            FieldDescriptor::scalar("id", BaseType::String),
            FieldDescriptor::scalar("title", BaseType::String),
            FieldDescriptor::scalar("createdAt", BaseType::Date),
        ];
        model
    }

    #[test]
    fn routes_use_camel_case() {
        let model = task();
        assert_eq!(model.collection_route(), "/projectTask");
        assert_eq!(model.item_route(), "/projectTask/{id}");
        assert_eq!(model.kebab_name(), "project-task");
    }

    #[test]
    fn form_fields_exclude_reserved() {
        let model = task();
        let names: Vec<_> = model.form_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title"]);
        assert!(model.has_id_field());
        assert!(model.has_created_at());
        assert!(!model.has_updated_at());
    }
}
