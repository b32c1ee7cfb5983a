//! Rust-specific naming conventions.

use wiregen_core::{to_pascal_case, to_snake_case};

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Make `name` usable as an identifier.
pub fn escape(name: &str) -> String {
    if NOT_RAW.contains(&name) {
        format!("{name}_")
    } else if is_reserved(name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Struct field name for a proto field.
pub fn field_name(name: &str) -> String {
    escape(&to_snake_case(name))
}

/// Module name for the nested types of a message.
pub fn module_name(type_name: &str) -> String {
    escape(&to_snake_case(type_name))
}

/// Enum variant for a proto constant: `ORDER_OPEN` becomes `OrderOpen`.
pub fn variant_name(constant: &str) -> String {
    escape(&to_pascal_case(&constant.to_lowercase()))
}

/// Generated file name for a type, e.g. `OrderItem` becomes `order_item.rs`.
pub fn file_name(simple_name: &str) -> String {
    format!("{}.rs", to_snake_case(simple_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("UserName"), "user_name");
        assert_eq!(field_name("userId"), "user_id");
        assert_eq!(field_name("total_units"), "total_units");
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("type"));
        assert!(is_reserved("async"));
        assert!(!is_reserved("order"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(field_name("type"), "r#type");
        assert_eq!(field_name("self"), "self_");
        assert_eq!(module_name("Match"), "r#match");
        assert_eq!(field_name("hello"), "hello");
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(variant_name("STATUS_OPEN"), "StatusOpen");
        assert_eq!(variant_name("PENDING"), "Pending");
        assert_eq!(variant_name("SELF"), "Self_");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("OrderItem"), "order_item.rs");
        assert_eq!(file_name("Money"), "money.rs");
    }
}
