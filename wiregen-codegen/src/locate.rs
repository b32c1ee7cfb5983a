//! Resolve requested file names against the mounted search roots.

use std::path::PathBuf;

use tracing::debug;
use wiregen_core::Location;
use wiregen_schema::{SourceEntry, runtime};

use crate::{Error, Result, roots::MountedRoots};

/// A requested file, found under exactly one root or in the runtime
/// registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Root of origin (as the caller named it) and relative path.
    pub location: Location,
    /// Readable path on disk; `None` for runtime-provided files.
    pub path: Option<PathBuf>,
}

impl ResolvedLocation {
    pub fn is_runtime(&self) -> bool {
        self.path.is_none()
    }

    /// Convert into an entry of a loader's source path.
    pub fn into_source(self) -> SourceEntry {
        match self.path {
            Some(path) => SourceEntry::File {
                location: self.location,
                path,
            },
            None => SourceEntry::Runtime {
                location: self.location,
            },
        }
    }
}

/// Find `name` under the first root, in caller order, that contains it.
///
/// Falls back to the runtime-provided files. When two roots both contain
/// `name`, the earlier one shadows the later.
pub fn locate(name: &str, roots: &MountedRoots) -> Result<ResolvedLocation> {
    for root in roots.iter() {
        let path = root.effective().join(name);
        if path.is_file() {
            debug!(name, root = root.name(), "located proto file");
            return Ok(ResolvedLocation {
                location: Location::new(root.name(), name),
                path: Some(path),
            });
        }
    }

    if runtime::is_runtime_proto(name) {
        debug!(name, "using runtime-provided proto file");
        return Ok(ResolvedLocation {
            location: runtime::location(name),
            path: None,
        });
    }

    Err(Error::resolution(name, roots.names()))
}
