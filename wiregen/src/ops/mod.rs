//! Core operations.
//!
//! This module contains the business logic for wiregen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

pub use check::check;
pub use generate::generate;
use wiregen_codegen::{Pipeline, PipelineInput, RuleSet};
use wiregen_manifest::Manifest;

/// Build the pipeline a manifest describes.
pub fn pipeline(manifest: &Manifest) -> Pipeline {
    let input = PipelineInput::new(
        manifest.sources.proto_paths.clone(),
        manifest.sources.proto_files.clone(),
    );
    let rules = RuleSet::new(&manifest.prune.includes, &manifest.prune.excludes);
    Pipeline::new(input, &manifest.output.directory).rules(rules)
}
