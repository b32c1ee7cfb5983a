//! Write one generated file per emitted type.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::info;
use wiregen_core::{File, Location, QualifiedName};
use wiregen_schema::{ProtoType, TypeGenerator, TypeGraph};

use crate::{Error, Result};

/// One successfully written type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionRecord {
    pub name: QualifiedName,
    /// Source file the type was declared in.
    pub location: Location,
    /// Path of the written file.
    pub path: PathBuf,
    pub elapsed: Duration,
}

/// Drives a [`TypeGenerator`] over a graph and writes the results under an
/// output directory.
pub struct Emitter<'a> {
    generator: &'a dyn TypeGenerator,
    output_dir: PathBuf,
}

impl<'a> Emitter<'a> {
    pub fn new(generator: &'a dyn TypeGenerator, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate and write every type selected by `explicit`.
    ///
    /// Types are written in file order, then declaration order. Stops at the
    /// first failure; files written before it stay on disk. Two types that
    /// map to the same output path are a failure, not an overwrite.
    pub fn emit(&self, graph: &TypeGraph, explicit: &[String]) -> Result<Vec<EmissionRecord>> {
        let mut records = Vec::new();
        let mut claimed = OutputPaths::default();
        for ty in emitted_types(graph, explicit) {
            let start = Instant::now();
            let (name, file) = self.render(ty)?;
            claimed.claim(file.path(), &name)?;
            file.write().map_err(|source| {
                let directory = file.path().parent().unwrap_or(self.output_dir.as_path());
                Error::write(name.to_string(), directory, source)
            })?;
            let elapsed = start.elapsed();
            info!("Generated {} in {:?}", name, elapsed);

            records.push(EmissionRecord {
                name,
                location: ty.location.clone(),
                path: file.path().to_path_buf(),
                elapsed,
            });
        }
        Ok(records)
    }

    /// Render the files [`Emitter::emit`] would write, without writing them.
    pub fn preview(&self, graph: &TypeGraph, explicit: &[String]) -> Result<Vec<File>> {
        let mut claimed = OutputPaths::default();
        emitted_types(graph, explicit)
            .map(|ty| {
                let (name, file) = self.render(ty)?;
                claimed.claim(file.path(), &name)?;
                Ok(file)
            })
            .collect()
    }

    fn render(&self, ty: &ProtoType) -> Result<(QualifiedName, File)> {
        let generated = self.generator.generate_type(ty).map_err(Error::schema)?;
        let comment = self.generator.line_comment();
        let path = self
            .output_dir
            .join(generated.name.package_dir())
            .join(self.generator.file_name(&generated.name));

        let file = File::new(path, generated.source)
            .header_line(format!("{comment} Code generated by wiregen, do not edit."))
            .header_line(format!("{comment} Source: {}", ty.location));
        Ok((generated.name, file))
    }
}

/// Output paths already taken in one run, and the type that took each.
#[derive(Default)]
struct OutputPaths(HashMap<PathBuf, QualifiedName>);

impl OutputPaths {
    fn claim(&mut self, path: &Path, name: &QualifiedName) -> Result<()> {
        match self.0.get(path) {
            Some(first) => Err(Error::collision(path, first.to_string(), name.to_string())),
            None => {
                self.0.insert(path.to_path_buf(), name.clone());
                Ok(())
            }
        }
    }
}

/// Top-level types of the files selected by `explicit` (every file when it
/// is empty), in file order then declaration order.
pub fn emitted_types<'g>(
    graph: &'g TypeGraph,
    explicit: &'g [String],
) -> impl Iterator<Item = &'g ProtoType> {
    graph
        .files()
        .iter()
        .filter(move |file| {
            explicit.is_empty() || explicit.iter().any(|path| path == file.location.path())
        })
        .flat_map(|file| file.types.iter())
}
