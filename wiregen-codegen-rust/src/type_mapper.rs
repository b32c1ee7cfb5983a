//! Maps proto scalar types to Rust types.

use wiregen_schema::ScalarType;

pub fn scalar(ty: ScalarType) -> &'static str {
    match ty {
        ScalarType::Double => "f64",
        ScalarType::Float => "f32",
        ScalarType::Int32 | ScalarType::Sint32 | ScalarType::Sfixed32 => "i32",
        ScalarType::Int64 | ScalarType::Sint64 | ScalarType::Sfixed64 => "i64",
        ScalarType::Uint32 | ScalarType::Fixed32 => "u32",
        ScalarType::Uint64 | ScalarType::Fixed64 => "u64",
        ScalarType::Bool => "bool",
        ScalarType::String => "String",
        ScalarType::Bytes => "Vec<u8>",
    }
}

pub fn optional(inner: &str) -> String {
    format!("Option<{inner}>")
}

pub fn boxed_optional(inner: &str) -> String {
    format!("Option<Box<{inner}>>")
}

pub fn repeated(inner: &str) -> String {
    format!("Vec<{inner}>")
}

pub fn map(key: &str, value: &str) -> String {
    format!("std::collections::HashMap<{key}, {value}>")
}
