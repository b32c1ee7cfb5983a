use std::{
    io,
    path::{Path, PathBuf},
};

/// A generated source file: header comment lines followed by the body.
///
/// Headers are rendered first, one per line, and separated from the body by
/// a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    header: Vec<String>,
    content: String,
}

impl File {
    /// Create a new file with the given path and content and no header.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header: Vec::new(),
            content: content.into(),
        }
    }

    /// Append a header line. The line is written as-is, so it must already
    /// carry the target language's comment prefix.
    pub fn header_line(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the body, without header
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Render the full file contents.
    pub fn render(&self) -> String {
        if self.header.is_empty() {
            return self.content.clone();
        }

        let mut out = self.header.join("\n");
        out.push_str("\n\n");
        out.push_str(&self.content);
        out
    }

    /// Write the rendered file, creating parent directories as needed.
    pub fn write(&self) -> io::Result<()> {
        write_file(&self.path, &self.render())
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_render_without_header() {
        let file = File::new("x.rs", "pub struct X;\n");
        assert_eq!(file.render(), "pub struct X;\n");
    }

    #[test]
    fn test_render_with_header() {
        let file = File::new("x.rs", "pub struct X;\n")
            .header_line("// first")
            .header_line("// second");

        assert_eq!(file.render(), "// first\n// second\n\npub struct X;\n");
    }

    #[test]
    fn test_write_renders_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shop").join("order.rs");

        File::new(&path, "body\n")
            .header_line("// generated")
            .write()
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().next(), Some("// generated"));
        assert!(written.ends_with("body\n"));
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = File::new(blocker.join("x.rs"), "").write();
        assert!(result.is_err());
    }
}
