//! What a pipeline run compiles: explicit files, or whole roots.

use wiregen_core::Location;
use wiregen_schema::{ImportRoot, LoadRequest, SourceEntry};

use crate::{Result, locate::locate, roots::MountedRoots};

/// The inputs of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineInput {
    /// Compile the listed files. Every root is searched for imports, and
    /// only these files are emitted.
    Explicit { roots: Vec<String>, files: Vec<String> },
    /// Compile every proto file under every root.
    Roots { roots: Vec<String> },
}

impl PipelineInput {
    /// Pick the mode from whether any files were listed.
    pub fn new(roots: Vec<String>, files: Vec<String>) -> Self {
        if files.is_empty() {
            Self::Roots { roots }
        } else {
            Self::Explicit { roots, files }
        }
    }

    pub fn roots(&self) -> &[String] {
        match self {
            Self::Explicit { roots, .. } | Self::Roots { roots } => roots,
        }
    }

    /// Files whose types are emitted. Empty means every loaded file.
    pub fn explicit_files(&self) -> &[String] {
        match self {
            Self::Explicit { files, .. } => files,
            Self::Roots { .. } => &[],
        }
    }

    /// Build the loader request, locating explicit files under `mounted`.
    pub fn load_request(&self, mounted: &MountedRoots) -> Result<LoadRequest> {
        match self {
            Self::Explicit { files, .. } => {
                let sources = files
                    .iter()
                    .map(|name| locate(name, mounted).map(|resolved| resolved.into_source()))
                    .collect::<Result<Vec<_>>>()?;
                let import_roots = mounted
                    .iter()
                    .map(|root| ImportRoot {
                        location: Location::root(root.name()),
                        dir: root.effective().to_path_buf(),
                    })
                    .collect();
                Ok(LoadRequest {
                    sources,
                    import_roots,
                })
            }
            Self::Roots { .. } => Ok(LoadRequest {
                sources: mounted
                    .iter()
                    .map(|root| SourceEntry::Root {
                        location: Location::root(root.name()),
                        dir: root.effective().to_path_buf(),
                    })
                    .collect(),
                import_roots: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{Error, testing::write_tree};

    fn roots(temps: &[&TempDir]) -> Vec<String> {
        temps.iter().map(|t| t.path().display().to_string()).collect()
    }

    #[test]
    fn test_new_without_files_compiles_roots() {
        let input = PipelineInput::new(vec!["protos".into()], Vec::new());
        assert!(matches!(input, PipelineInput::Roots { .. }));
        assert!(input.explicit_files().is_empty());
    }

    #[test]
    fn test_new_with_files_is_explicit() {
        let input = PipelineInput::new(vec!["protos".into()], vec!["a.proto".into()]);
        assert!(matches!(input, PipelineInput::Explicit { .. }));
        assert_eq!(input.explicit_files(), ["a.proto"]);
        assert_eq!(input.roots(), ["protos"]);
    }

    #[test]
    fn test_explicit_request_locates_files_and_imports_from_all_roots() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_tree(second.path(), &[("shop/order.proto", "")]).unwrap();
        let names = roots(&[&first, &second]);
        let input = PipelineInput::new(names.clone(), vec!["shop/order.proto".into()]);

        let mounted = MountedRoots::mount(input.roots()).unwrap();
        let request = input.load_request(&mounted).unwrap();

        assert_eq!(
            request.sources,
            [SourceEntry::File {
                location: Location::new(names[1].clone(), "shop/order.proto"),
                path: second.path().join("shop/order.proto"),
            }]
        );
        let import_bases: Vec<_> = request
            .import_roots
            .iter()
            .map(|r| r.location.base().to_string())
            .collect();
        assert_eq!(import_bases, names);
    }

    #[test]
    fn test_roots_request_uses_every_root_as_source() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let input = PipelineInput::new(roots(&[&first, &second]), Vec::new());

        let mounted = MountedRoots::mount(input.roots()).unwrap();
        let request = input.load_request(&mounted).unwrap();

        assert_eq!(request.sources.len(), 2);
        assert!(
            request
                .sources
                .iter()
                .all(|s| matches!(s, SourceEntry::Root { .. }))
        );
        assert!(request.import_roots.is_empty());
    }

    #[test]
    fn test_explicit_request_fails_on_missing_file() {
        let root = TempDir::new().unwrap();
        let input = PipelineInput::new(roots(&[&root]), vec!["missing.proto".into()]);

        let mounted = MountedRoots::mount(input.roots()).unwrap();
        let err = input.load_request(&mounted).unwrap_err();
        assert!(matches!(*err, Error::Resolution { .. }));
    }
}
