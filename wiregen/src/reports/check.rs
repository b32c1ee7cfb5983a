//! Check command report data structures.

use super::output::{Output, Report};

/// Report data from loading and pruning without emitting.
#[derive(Debug)]
pub struct CheckReport {
    /// Search roots, in priority order.
    pub roots: Vec<String>,
    pub files_loaded: usize,
    pub types_before: usize,
    pub types_after: usize,
    pub warnings: Vec<String>,
    /// Files whose types would be generated.
    pub emitted_files: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!(
            "✓ {} proto files loaded from {}\n",
            self.files_loaded,
            self.roots.join(", ")
        ));
        out.key_value(
            "Types",
            &format!("{} of {} retained", self.types_after, self.types_before),
        );
        out.newline();

        out.section(&format!("Would generate from {} files", self.emitted_files.len()));
        for file in &self.emitted_files {
            out.list_item(file);
        }
    }
}
