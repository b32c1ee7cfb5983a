//! Rust AST builders for generated message and enum types.
//!
//! These build Rust syntax as [`CodeFragment`](wiregen_codegen::builder::CodeFragment)s,
//! rendered through a `CodeBuilder`.

mod enums;
mod module;
mod structs;

pub use enums::{Enum, Variant};
pub use module::{Item, Module, items_to_fragments};
pub use structs::{Field, Struct};
