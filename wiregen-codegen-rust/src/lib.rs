//! Rust backend for wiregen.
//!
//! Turns proto messages and enums into plain Rust structs and enums, one
//! file per top-level type.

mod generator;
mod naming;
mod type_mapper;

pub mod ast;

pub use generator::RustGenerator;
use wiregen_schema::{CodegenTarget, TypeGenerator, TypeGraph};

/// The Rust [`CodegenTarget`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RustTarget;

impl CodegenTarget for RustTarget {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn generator(&self, graph: &TypeGraph) -> Box<dyn TypeGenerator> {
        Box::new(RustGenerator::new(graph))
    }
}
