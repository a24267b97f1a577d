//! Identifier case transforms shared by the introspector and every
//! generator. All naming in emitted artifacts funnels through here so the
//! backend, proxy, and UI layers agree on file names and routes.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

pub fn kebab_case(src: &str) -> String {
    src.to_kebab_case()
}

pub fn camel_case(src: &str) -> String {
    src.to_lower_camel_case()
}

pub fn pascal_case(src: &str) -> String {
    src.to_upper_camel_case()
}

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

/// Upper-case the first character, leaving the rest untouched.
///
/// Used when deriving a referenced model name from a `<model>Id` field
/// name, where the remainder must keep its original casing.
pub fn capitalize_first(src: &str) -> String {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_to_camel() {
        assert_eq!(camel_case("ProjectTask"), "projectTask");
    }

    #[test]
    fn pascal_to_kebab() {
        assert_eq!(kebab_case("ProjectTask"), "project-task");
    }

    #[test]
    fn kebab_to_pascal() {
        assert_eq!(pascal_case("project-task"), "ProjectTask");
    }

    #[test]
    fn capitalize_keeps_inner_casing() {
        assert_eq!(capitalize_first("projectTask"), "ProjectTask");
        assert_eq!(capitalize_first(""), "");
    }
}
