//! Boundary between the pipeline and the schema loader / type generator.

use std::path::PathBuf;

use wiregen_core::{Location, QualifiedName};

use crate::{ProtoType, SchemaError, TypeGraph};

/// One entry of the source path handed to a [`SchemaLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    /// A single file that was located under a search root.
    File { location: Location, path: PathBuf },
    /// A file bundled with the loader (see [`crate::runtime`]).
    Runtime { location: Location },
    /// Every proto file under a search root.
    Root { location: Location, dir: PathBuf },
}

impl SourceEntry {
    pub fn location(&self) -> &Location {
        match self {
            Self::File { location, .. }
            | Self::Runtime { location }
            | Self::Root { location, .. } => location,
        }
    }
}

/// A directory searched only to satisfy imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRoot {
    /// The root as the caller named it.
    pub location: Location,
    /// Where it can be read from (the mount point for archives).
    pub dir: PathBuf,
}

/// Everything a loader needs to build a [`TypeGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    pub sources: Vec<SourceEntry>,
    pub import_roots: Vec<ImportRoot>,
}

/// Parses and links proto sources.
pub trait SchemaLoader {
    /// Load every source entry plus whatever it transitively imports.
    ///
    /// Files in the returned graph are ordered: sources first, in request
    /// order, then imports in the order they were discovered.
    fn load_schema(&self, request: &LoadRequest) -> Result<TypeGraph, SchemaError>;
}

/// Output of generating a single type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    /// Package-qualified output identifier.
    pub name: QualifiedName,
    /// Generated source, without the provenance header.
    pub source: String,
}

/// Turns a type into generated source.
pub trait TypeGenerator {
    /// Prefix for single-line comments in the generated language.
    fn line_comment(&self) -> &'static str {
        "//"
    }

    /// File name (without directories) for a generated type.
    fn file_name(&self, name: &QualifiedName) -> String;

    fn generate_type(&self, ty: &ProtoType) -> Result<GeneratedType, SchemaError>;
}

/// A target language: creates a generator bound to a loaded graph.
pub trait CodegenTarget {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    fn generator(&self, graph: &TypeGraph) -> Box<dyn TypeGenerator>;
}
