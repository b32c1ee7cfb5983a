use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// A wiregen.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct WiregenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl WiregenToml {
    /// Open and parse a wiregen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_reads_and_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wiregen.toml");
        fs::write(&path, "[prune]\nincludes = [\"shop.Order\"]\n").unwrap();

        let file = WiregenToml::open(&path).unwrap();
        assert_eq!(file.path(), path);
        assert!(file.content().contains("shop.Order"));
        assert_eq!(file.manifest().prune.includes, ["shop.Order"]);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = WiregenToml::open(temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
