use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use wiregen_schema::SchemaError;

/// Result type for pipeline operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// A failure that aborts a pipeline run.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to locate '{name}' in [{}]", .roots.join(", "))]
    #[diagnostic(
        code(wiregen::resolution),
        help("add the directory or archive that contains '{name}' to the proto paths")
    )]
    Resolution { name: String, roots: Vec<String> },

    #[error("failed to mount archive '{}'", .root.display())]
    #[diagnostic(
        code(wiregen::mount),
        help("archive roots must be tar files, optionally gzip-compressed")
    )]
    Mount {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(wiregen::schema))]
    Schema(SchemaError),

    #[error("failed to write {name} to {}", .directory.display())]
    #[diagnostic(code(wiregen::write))]
    Write {
        name: String,
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{first} and {second} both generate {}", .path.display())]
    #[diagnostic(
        code(wiregen::collision),
        help("rename one of the types, or exclude it with a prune rule")
    )]
    Collision {
        path: PathBuf,
        first: String,
        second: String,
    },
}

impl Error {
    /// Create a resolution error for a file missing from every root.
    pub fn resolution(
        name: impl Into<String>,
        roots: impl IntoIterator<Item = impl Into<String>>,
    ) -> Box<Self> {
        Box::new(Error::Resolution {
            name: name.into(),
            roots: roots.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a mount error for an archive root.
    pub fn mount(root: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Mount {
            root: root.into(),
            source,
        })
    }

    /// Wrap a loader or generator failure unchanged.
    pub fn schema(source: SchemaError) -> Box<Self> {
        Box::new(Error::Schema(source))
    }

    /// Create a write error for a generated type.
    pub fn write(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Box<Self> {
        Box::new(Error::Write {
            name: name.into(),
            directory: directory.into(),
            source,
        })
    }

    /// Create a collision error for two types sharing an output path.
    pub fn collision(
        path: impl Into<PathBuf>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::Collision {
            path: path.into(),
            first: first.into(),
            second: second.into(),
        })
    }
}
