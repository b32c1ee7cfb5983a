//! Generate operation - compile proto sources and emit code.

use eyre::{Context, Result};
use wiregen_codegen_rust::RustTarget;
use wiregen_manifest::Manifest;
use wiregen_proto::ProtoLoader;

use super::pipeline;
use crate::reports::{GenerateReport, PreviewFile, WrittenFile};

/// Execute the generate operation.
///
/// With `dry_run`, generated files are rendered into the report instead of
/// being written.
pub fn generate(manifest: &Manifest, dry_run: bool) -> Result<GenerateReport> {
    let report = pipeline(manifest)
        .dry_run(dry_run)
        .run(&ProtoLoader::new(), &RustTarget)
        .wrap_err("failed compiling proto sources")?;

    Ok(GenerateReport {
        output_dir: manifest.output.directory.clone(),
        dry_run,
        files_loaded: report.files_loaded,
        types_before: report.prune.types_before,
        types_after: report.prune.types_after,
        warnings: report.warnings().map(ToString::to_string).collect(),
        written: report
            .emitted
            .iter()
            .map(|record| WrittenFile {
                name: record.name.to_string(),
                path: record.path.clone(),
            })
            .collect(),
        previews: report
            .previews
            .iter()
            .map(|file| PreviewFile {
                path: file.path().to_path_buf(),
                content: file.render(),
            })
            .collect(),
    })
}
