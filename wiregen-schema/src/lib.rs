//! Type graph model for the wiregen protobuf generator.
//!
//! This crate provides the linked representation of loaded proto files and
//! the boundary the pipeline uses to talk to a schema loader and a type
//! generator. Loaders and generators live in their own crates; the pipeline
//! only sees the traits defined here.
//!
//! # Architecture
//!
//! ```text
//! .proto roots → SchemaLoader → TypeGraph → (prune) → TypeGenerator → files
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod boundary;
mod error;
mod graph;
pub mod runtime;

pub use boundary::{
    CodegenTarget, GeneratedType, ImportRoot, LoadRequest, SchemaLoader, SourceEntry, TypeGenerator,
};
pub use error::SchemaError;
pub use graph::{
    EnumConstant, Field, FieldLabel, FieldType, ProtoFile, ProtoType, ScalarType, TypeGraph,
    TypeKind,
};
