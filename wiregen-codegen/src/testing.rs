//! Test utilities for pipeline callers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    fs, io,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use flate2::{Compression, write::GzEncoder};
use tempfile::TempDir;
use wiregen_core::QualifiedName;
use wiregen_schema::{
    CodegenTarget, GeneratedType, LoadRequest, ProtoType, SchemaError, SchemaLoader,
    TypeGenerator, TypeGraph,
};

use crate::roots::{ArchiveMounter, MountedArchive};

/// Archive mounter that hands out empty temp dirs and counts mounts and
/// releases.
#[derive(Debug, Default, Clone)]
pub struct CountingMounter {
    mounted: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl CountingMounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of archives mounted so far.
    pub fn mounted(&self) -> usize {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Number of mounts released so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl ArchiveMounter for CountingMounter {
    fn mount(&self, _archive: &Path) -> io::Result<Box<dyn MountedArchive>> {
        self.mounted.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingMount {
            dir: TempDir::new()?,
            released: self.released.clone(),
        }))
    }
}

struct CountingMount {
    dir: TempDir,
    released: Arc<AtomicUsize>,
}

impl MountedArchive for CountingMount {
    fn root(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for CountingMount {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Write a tar archive (gzip-compressed if `gzip`) holding `files`.
pub fn write_tar(path: &Path, gzip: bool, files: &[(&str, &str)]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    if gzip {
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        append_files(&mut builder, files)?;
        builder.into_inner()?.finish()?;
    } else {
        let mut builder = tar::Builder::new(file);
        append_files(&mut builder, files)?;
        builder.finish()?;
    }
    Ok(())
}

fn append_files<W: io::Write>(builder: &mut tar::Builder<W>, files: &[(&str, &str)]) -> io::Result<()> {
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, content.as_bytes())?;
    }
    Ok(())
}

/// Write `files` (relative path, content) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) -> io::Result<()> {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

/// Loader that returns a fixed graph and records every request it gets.
#[derive(Debug, Default)]
pub struct StaticLoader {
    graph: TypeGraph,
    fail: Option<String>,
    requests: Mutex<Vec<LoadRequest>>,
}

impl StaticLoader {
    pub fn new(graph: TypeGraph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// A loader whose every load fails with a generation error carrying
    /// `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail: Some(message.into()),
            ..Self::default()
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<LoadRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl SchemaLoader for StaticLoader {
    fn load_schema(&self, request: &LoadRequest) -> Result<TypeGraph, SchemaError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.fail {
            Some(message) => Err(SchemaError::Generate {
                name: "schema".to_string(),
                message: message.clone(),
            }),
            None => Ok(self.graph.clone()),
        }
    }
}

/// Target whose generator writes one line per field, into `<Name>.txt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoTarget;

impl CodegenTarget for EchoTarget {
    fn language(&self) -> &'static str {
        "echo"
    }

    fn generator(&self, _graph: &TypeGraph) -> Box<dyn TypeGenerator> {
        Box::new(EchoGenerator)
    }
}

/// Deterministic generator used by [`EchoTarget`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoGenerator;

impl TypeGenerator for EchoGenerator {
    fn line_comment(&self) -> &'static str {
        "#"
    }

    fn file_name(&self, name: &QualifiedName) -> String {
        format!("{}.txt", name.simple_name())
    }

    fn generate_type(&self, ty: &ProtoType) -> Result<GeneratedType, SchemaError> {
        let mut source = format!("type {}\n", ty.name);
        for field in &ty.fields {
            source.push_str(&format!("  {} = {}\n", field.name, field.number));
        }
        for nested in &ty.nested {
            source.push_str(&format!("  nested {}\n", nested.name));
        }
        Ok(GeneratedType {
            name: ty.qualified_name(),
            source,
        })
    }
}
