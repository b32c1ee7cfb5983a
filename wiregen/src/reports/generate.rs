//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// A generated file that was written to disk.
#[derive(Debug, Clone)]
pub struct WrittenFile {
    /// Package-qualified type name.
    pub name: String,
    pub path: PathBuf,
}

/// A generated file rendered by a dry run.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    pub path: PathBuf,
    /// Full file contents, header included.
    pub content: String,
}

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub files_loaded: usize,
    pub types_before: usize,
    pub types_after: usize,
    pub warnings: Vec<String>,
    pub written: Vec<WrittenFile>,
    pub previews: Vec<PreviewFile>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.key_value("Proto files", &self.files_loaded.to_string());
        out.key_value(
            "Types",
            &format!("{} of {} retained", self.types_after, self.types_before),
        );
        out.newline();

        if self.dry_run {
            for preview in &self.previews {
                out.divider(&preview.path.display().to_string());
                out.preformatted(&preview.content);
                out.newline();
            }
            out.preformatted(&format!(
                "Dry run: {} files not written\n",
                self.previews.len()
            ));
            return;
        }

        out.section(&format!(
            "Generated {} file{} in {}",
            self.written.len(),
            if self.written.len() == 1 { "" } else { "s" },
            self.output_dir.display()
        ));
        for file in &self.written {
            let path = file
                .path
                .strip_prefix(&self.output_dir)
                .unwrap_or(&file.path);
            out.added_item(&format!("{} ({})", path.display(), file.name));
        }
    }
}
