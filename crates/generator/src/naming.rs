//! Naming conventions for generated symbols

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// `{lowerCamel}Schema`, the binding of a shape's validator
pub fn schema_name(local_name: &str) -> String {
    format!("{}Schema", local_name.to_lower_camel_case())
}

/// Upper camel case type name (enums, type aliases)
pub fn type_name(local_name: &str) -> String {
    local_name.to_upper_camel_case()
}

/// `{UpperCamel}Error`, the class generated for an error structure
pub fn error_class_name(local_name: &str) -> String {
    format!("{}Error", type_name(local_name))
}

/// `{UpperCamel}Service`, the interface generated for a service
pub fn service_interface_name(local_name: &str) -> String {
    format!("{}Service", type_name(local_name))
}

/// Lower camel case method name of an operation
pub fn method_name(local_name: &str) -> String {
    local_name.to_lower_camel_case()
}

/// Local binding for `name` imported from `module` when `name` is taken
///
/// The prefix is the namespace segment of a generated module path, so
/// `tagSchema` from `./com.amazonaws.shared.structures.js` becomes
/// `sharedTagSchema`.
pub fn import_alias(module: &str, name: &str) -> String {
    let file = module.rsplit('/').next().unwrap_or(module);
    let stem = file.strip_suffix(".js").unwrap_or(file);
    let segments: Vec<&str> = stem.split('.').collect();
    let segment = match segments.as_slice() {
        [.., namespace, _sub] => namespace,
        _ => &stem,
    };
    let prefix = segment.to_lower_camel_case();
    let prefix = if prefix.is_empty() { "imported".to_string() } else { prefix };
    format!("{}{}", prefix, name.to_upper_camel_case())
}

/// Whether `name` can be written as a bare object key or enum member
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '$' || first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '$' || c == '_' || c.is_ascii_alphanumeric())
}

/// JSON-quoted string literal
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Object key or enum member name, quoted when not an identifier
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}
