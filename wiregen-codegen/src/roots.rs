//! Search roots: plain directories, and archives mounted as directories.
//!
//! A root that names a regular file is treated as an archive and mounted
//! through an [`ArchiveMounter`]. Mounts are owned by [`MountedRoots`] and
//! released when it is dropped, whichever way the pipeline exits.

use std::{
    collections::HashMap,
    fs,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;
use indexmap::IndexMap;
use tempfile::TempDir;
use tracing::debug;

use crate::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Mounts an archive file so its contents can be read as a directory.
pub trait ArchiveMounter {
    fn mount(&self, archive: &Path) -> io::Result<Box<dyn MountedArchive>>;
}

/// A mounted archive. Dropping it unmounts.
pub trait MountedArchive {
    /// Directory the archive contents are visible under.
    fn root(&self) -> &Path;
}

/// Mounts tar archives, optionally gzip-compressed, by unpacking them into
/// a private temporary directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarMounter;

impl ArchiveMounter for TarMounter {
    fn mount(&self, archive: &Path) -> io::Result<Box<dyn MountedArchive>> {
        let dir = tempfile::Builder::new().prefix("wiregen-mount-").tempdir()?;

        let mut file = fs::File::open(archive)?;
        let mut magic = [0u8; 2];
        let gzipped = file.read(&mut magic)? == magic.len() && magic == GZIP_MAGIC;
        file.seek(SeekFrom::Start(0))?;

        let reader = BufReader::new(file);
        if gzipped {
            tar::Archive::new(GzDecoder::new(reader)).unpack(dir.path())?;
        } else {
            tar::Archive::new(reader).unpack(dir.path())?;
        }

        Ok(Box::new(TarMount {
            archive: archive.to_path_buf(),
            dir,
        }))
    }
}

struct TarMount {
    archive: PathBuf,
    dir: TempDir,
}

impl MountedArchive for TarMount {
    fn root(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for TarMount {
    fn drop(&mut self) {
        debug!(archive = %self.archive.display(), "unmounting archive");
    }
}

/// How a search root is backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Directory,
    Archive,
}

/// A caller-supplied search root and where to look under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
    name: String,
    kind: RootKind,
    effective: PathBuf,
}

impl SearchRoot {
    /// The root exactly as the caller supplied it.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    /// Directory to search under: the root itself, or its mount point.
    pub fn effective(&self) -> &Path {
        &self.effective
    }
}

/// The search roots of one pipeline run, in caller order.
///
/// Owns every archive mount; they are released exactly once, when this
/// value is dropped.
pub struct MountedRoots {
    roots: IndexMap<String, SearchRoot>,
    mounts: Vec<Box<dyn MountedArchive>>,
}

impl MountedRoots {
    /// Mount `roots` using the default tar mounter.
    pub fn mount<S: AsRef<str>>(roots: &[S]) -> Result<Self> {
        Self::mount_with(roots, &TarMounter)
    }

    /// Mount `roots`, using `mounter` for archive roots.
    ///
    /// Roots naming the same archive share one mount. If any archive fails
    /// to mount, mounts made so far are released and nothing is returned.
    pub fn mount_with<S: AsRef<str>>(roots: &[S], mounter: &dyn ArchiveMounter) -> Result<Self> {
        let mut mounted = Self {
            roots: IndexMap::new(),
            mounts: Vec::new(),
        };
        let mut by_archive: HashMap<PathBuf, PathBuf> = HashMap::new();

        for root in roots {
            let name = root.as_ref();
            if mounted.roots.contains_key(name) {
                continue;
            }

            let path = Path::new(name);
            let search_root = if path.is_file() {
                let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                let effective = match by_archive.get(&key) {
                    Some(effective) => effective.clone(),
                    None => {
                        let mount = mounter
                            .mount(path)
                            .map_err(|source| Error::mount(path, source))?;
                        let effective = mount.root().to_path_buf();
                        debug!(root = name, mount = %effective.display(), "mounted archive");
                        mounted.mounts.push(mount);
                        by_archive.insert(key, effective.clone());
                        effective
                    }
                };
                SearchRoot {
                    name: name.to_string(),
                    kind: RootKind::Archive,
                    effective,
                }
            } else {
                SearchRoot {
                    name: name.to_string(),
                    kind: RootKind::Directory,
                    effective: path.to_path_buf(),
                }
            };

            mounted.roots.insert(name.to_string(), search_root);
        }

        Ok(mounted)
    }

    /// Iterate roots in caller order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchRoot> {
        self.roots.values()
    }

    /// Root names in caller order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Effective directory of a root, by name.
    pub fn effective(&self, name: &str) -> Option<&Path> {
        self.roots.get(name).map(SearchRoot::effective)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of live archive mounts.
    pub fn mount_count(&self) -> usize {
        self.mounts.len()
    }
}

impl std::fmt::Debug for MountedRoots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedRoots")
            .field("roots", &self.roots)
            .field("mounts", &self.mounts.len())
            .finish()
    }
}
