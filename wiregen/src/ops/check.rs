//! Check operation - load and prune without emitting.

use eyre::{Context, Result};
use wiregen_manifest::Manifest;
use wiregen_proto::ProtoLoader;

use super::pipeline;
use crate::reports::CheckReport;

/// Execute the check operation.
pub fn check(manifest: &Manifest) -> Result<CheckReport> {
    let report = pipeline(manifest)
        .check(&ProtoLoader::new())
        .wrap_err("failed compiling proto sources")?;

    Ok(CheckReport {
        roots: manifest.sources.proto_paths.clone(),
        files_loaded: report.files_loaded,
        types_before: report.prune.types_before,
        types_after: report.prune.types_after,
        warnings: report.warnings().map(ToString::to_string).collect(),
        emitted_files: report.emitted_files.iter().map(ToString::to_string).collect(),
    })
}
