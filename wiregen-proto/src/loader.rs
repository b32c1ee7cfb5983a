use std::{collections::VecDeque, fs, path::Path};

use indexmap::IndexMap;
use tracing::debug;
use walkdir::WalkDir;
use wiregen_core::Location;
use wiregen_schema::{LoadRequest, SchemaError, SchemaLoader, SourceEntry, TypeGraph, runtime};

use crate::{
    linker::link,
    parser::{ParsedFile, parse},
};

/// Loads `.proto` sources from disk and links them into a [`TypeGraph`].
///
/// Imports are looked up in the request's import roots, then in its
/// source roots, then among the runtime-provided files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProtoLoader;

impl ProtoLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLoader for ProtoLoader {
    fn load_schema(&self, request: &LoadRequest) -> Result<TypeGraph, SchemaError> {
        let mut search: Vec<(&Location, &Path)> = request
            .import_roots
            .iter()
            .map(|root| (&root.location, root.dir.as_path()))
            .collect();
        search.extend(request.sources.iter().filter_map(|entry| match entry {
            SourceEntry::Root { location, dir } => Some((location, dir.as_path())),
            _ => None,
        }));

        let mut session = Session::default();
        for entry in &request.sources {
            match entry {
                SourceEntry::File { location, path } => {
                    session.load(location.clone(), read(location, path)?)?;
                }
                SourceEntry::Runtime { location } => {
                    let source =
                        runtime::source(location.path()).ok_or_else(|| SchemaError::MissingImport {
                            location: location.clone(),
                            import: location.path().to_string(),
                        })?;
                    session.load(location.clone(), source.to_string())?;
                }
                SourceEntry::Root { location, dir } => {
                    for relative in proto_files(location, dir)? {
                        let file = location.at(relative);
                        let source = read(&file, &dir.join(file.path()))?;
                        session.load(file, source)?;
                    }
                }
            }
        }

        while let Some((import, importer)) = session.pending.pop_front() {
            if session.files.contains_key(&import) {
                continue;
            }
            let (location, source) =
                resolve_import(&import, &search).ok_or_else(|| SchemaError::MissingImport {
                    location: importer,
                    import: import.clone(),
                })??;
            session.load(location, source)?;
        }

        link(session.files.into_values().collect())
    }
}

/// Files parsed so far, keyed by path relative to their root, plus the
/// imports still to load.
#[derive(Default)]
struct Session {
    files: IndexMap<String, ParsedFile>,
    pending: VecDeque<(String, Location)>,
}

impl Session {
    fn load(&mut self, location: Location, source: String) -> Result<(), SchemaError> {
        let key = location.path().to_string();
        if let Some(existing) = self.files.get(&key) {
            debug!(file = %location, shadowed_by = %existing.location, "skipping shadowed proto file");
            return Ok(());
        }

        let parsed = parse(location, &source)?;
        debug!(file = %parsed.location, imports = parsed.imports.len(), "parsed proto file");
        for import in &parsed.imports {
            self.pending.push_back((import.clone(), parsed.location.clone()));
        }
        self.files.insert(key, parsed);
        Ok(())
    }
}

fn resolve_import(
    import: &str,
    search: &[(&Location, &Path)],
) -> Option<Result<(Location, String), SchemaError>> {
    for (root, dir) in search {
        let path = dir.join(import);
        if path.is_file() {
            let location = root.at(import);
            return Some(read(&location, &path).map(|source| (location, source)));
        }
    }
    runtime::source(import).map(|source| Ok((runtime::location(import), source.to_string())))
}

fn read(location: &Location, path: &Path) -> Result<String, SchemaError> {
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        location: location.clone(),
        source,
    })
}

/// Every `.proto` file under `dir`, as `/`-separated relative paths in a
/// stable order. A root that does not exist holds no files.
fn proto_files(location: &Location, dir: &Path) -> Result<Vec<String>, SchemaError> {
    if !dir.is_dir() {
        debug!(root = %location, "source root is not a directory, skipping");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| SchemaError::Io {
            location: location.clone(),
            source: err.into(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "proto") {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(dir) {
            files.push(to_slash(relative));
        }
    }
    Ok(files)
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;
    use wiregen_schema::{FieldType, ImportRoot};

    use super::*;

    fn write(root: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            let path = root.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    fn base(dir: &TempDir) -> String {
        dir.path().display().to_string()
    }

    fn file_entry(dir: &TempDir, name: &str) -> SourceEntry {
        SourceEntry::File {
            location: Location::new(base(dir), name),
            path: dir.path().join(name),
        }
    }

    fn import_root(dir: &TempDir) -> ImportRoot {
        ImportRoot {
            location: Location::root(base(dir)),
            dir: dir.path().to_path_buf(),
        }
    }

    fn paths(graph: &TypeGraph) -> Vec<String> {
        graph.files().iter().map(|f| f.location.to_string()).collect()
    }

    #[test]
    fn test_loads_sources_then_imports() {
        let src = TempDir::new().unwrap();
        let deps = TempDir::new().unwrap();
        write(
            src.path(),
            &[(
                "shop/order.proto",
                r#"syntax = "proto3";
                package shop;
                import "common/money.proto";
                import "google/protobuf/timestamp.proto";
                message Order {
                  common.Money total = 1;
                  google.protobuf.Timestamp placed_at = 2;
                }"#,
            )],
        );
        write(deps.path(), &[("common/money.proto", "package common; message Money { int64 units = 1; }")]);

        let request = LoadRequest {
            sources: vec![file_entry(&src, "shop/order.proto")],
            import_roots: vec![import_root(&src), import_root(&deps)],
        };
        let graph = ProtoLoader::new().load_schema(&request).unwrap();

        assert_eq!(
            paths(&graph),
            [
                format!("{}/shop/order.proto", base(&src)),
                format!("{}/common/money.proto", base(&deps)),
                "wiregen-runtime/google/protobuf/timestamp.proto".to_string(),
            ]
        );
        let order = graph.find_type("shop.Order").unwrap();
        assert_eq!(order.fields[1].ty, FieldType::Named("google.protobuf.Timestamp".into()));
    }

    #[test]
    fn test_missing_import_names_importer() {
        let src = TempDir::new().unwrap();
        write(src.path(), &[("a.proto", "import \"b.proto\";")]);

        let request = LoadRequest {
            sources: vec![file_entry(&src, "a.proto")],
            import_roots: vec![import_root(&src)],
        };
        let err = ProtoLoader::new().load_schema(&request).unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("{}/a.proto: unable to find import 'b.proto'", base(&src))
        );
    }

    #[test]
    fn test_root_entries_load_every_proto_file_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(
            first.path(),
            &[
                ("z.proto", "package z; import \"shared/s.proto\"; message Z { s.S s = 1; }"),
                ("a/a.proto", "package a; message A {}"),
                ("notes.txt", "not a proto"),
            ],
        );
        write(second.path(), &[("shared/s.proto", "package s; message S {}")]);

        let request = LoadRequest {
            sources: vec![
                SourceEntry::Root {
                    location: Location::root(base(&first)),
                    dir: first.path().to_path_buf(),
                },
                SourceEntry::Root {
                    location: Location::root(base(&second)),
                    dir: second.path().to_path_buf(),
                },
            ],
            import_roots: Vec::new(),
        };
        let graph = ProtoLoader::new().load_schema(&request).unwrap();

        let relative: Vec<_> = graph.files().iter().map(|f| f.location.path()).collect();
        assert_eq!(relative, ["a/a.proto", "z.proto", "shared/s.proto"]);
    }

    #[test]
    fn test_missing_root_directory_is_empty() {
        let request = LoadRequest {
            sources: vec![SourceEntry::Root {
                location: Location::root("does/not/exist"),
                dir: PathBuf::from("does/not/exist"),
            }],
            import_roots: Vec::new(),
        };
        let graph = ProtoLoader::new().load_schema(&request).unwrap();
        assert!(graph.files().is_empty());
    }

    #[test]
    fn test_runtime_source_entry() {
        let request = LoadRequest {
            sources: vec![SourceEntry::Runtime {
                location: runtime::location("google/protobuf/wrappers.proto"),
            }],
            import_roots: Vec::new(),
        };
        let graph = ProtoLoader::new().load_schema(&request).unwrap();
        assert!(graph.find_type("google.protobuf.StringValue").is_some());
    }

    #[test]
    fn test_every_runtime_file_parses() {
        for path in [
            "google/protobuf/any.proto",
            "google/protobuf/duration.proto",
            "google/protobuf/empty.proto",
            "google/protobuf/field_mask.proto",
            "google/protobuf/struct.proto",
            "google/protobuf/timestamp.proto",
            "google/protobuf/wrappers.proto",
        ] {
            let request = LoadRequest {
                sources: vec![SourceEntry::Runtime {
                    location: runtime::location(path),
                }],
                import_roots: Vec::new(),
            };
            assert!(ProtoLoader::new().load_schema(&request).is_ok(), "{path}");
        }
    }

    #[test]
    fn test_unreadable_source_is_an_io_error() {
        let src = TempDir::new().unwrap();
        let request = LoadRequest {
            sources: vec![file_entry(&src, "gone.proto")],
            import_roots: Vec::new(),
        };
        let err = ProtoLoader::new().load_schema(&request).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
