//! Core utilities and types for the wiregen protobuf generator.
//!
//! This crate provides fundamental types and utilities used across
//! the wiregen crates: source locations, package-qualified names and
//! generated file writing.

mod file;
mod location;
mod name;
mod utils;

// File operations
pub use file::File;
// Fundamental types
pub use location::Location;
pub use name::QualifiedName;
// String utilities
pub use utils::{to_pascal_case, to_snake_case};
