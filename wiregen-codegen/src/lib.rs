//! Source resolution, pruning and emission pipeline for wiregen.
//!
//! This crate turns a list of search roots and requested proto files into
//! generated sources. The schema loader and the type generator are
//! collaborators behind the traits in `wiregen-schema`.
//!
//! # Module Organization
//!
//! - [`roots`] - Search roots and archive mounting (RootMounter)
//! - [`locate`] - Resolving requested files under the roots (ProtoLocator)
//! - [`input`] - Explicit-files vs whole-roots inputs
//! - [`prune`] - Include/exclude rules and graph pruning (PruningEngine)
//! - [`emit`] - Per-type generation and writing (EmissionDriver)
//! - [`pipeline`] - The linear pipeline runner and its diagnostics
//! - [`builder`] - Code generation building blocks for backends
//! - [`testing`] - Test doubles (feature-gated)

pub mod builder;
pub mod emit;
mod error;
pub mod input;
pub mod locate;
pub mod pipeline;
pub mod prune;
pub mod roots;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use emit::{EmissionRecord, Emitter};
pub use error::{Error, Result};
pub use input::PipelineInput;
pub use locate::{ResolvedLocation, locate};
pub use pipeline::{Diagnostic, Pipeline, PipelineReport, Severity, Stage};
pub use prune::{PruneReport, RuleSet, prune};
pub use roots::{ArchiveMounter, MountedArchive, MountedRoots, RootKind, SearchRoot, TarMounter};
