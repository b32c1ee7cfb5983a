use std::fmt;

/// Where a proto file was found: the search root it came from plus its path
/// relative to that root.
///
/// The base is the root string exactly as the caller supplied it (a
/// directory, an archive file, or a sentinel for bundled files), not the
/// directory it was mounted at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    base: String,
    path: String,
}

impl Location {
    pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
        }
    }

    /// A location naming a whole root rather than a file inside it.
    pub fn root(base: impl Into<String>) -> Self {
        Self::new(base, "")
    }

    /// The search root this location is relative to.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The path relative to [`Location::base`].
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a location for `path` under the same base.
    pub fn at(&self, path: impl Into<String>) -> Self {
        Self::new(self.base.clone(), path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.base.is_empty(), self.path.is_empty()) {
            (true, _) => write!(f, "{}", self.path),
            (false, true) => write!(f, "{}", self.base),
            (false, false) => write!(f, "{}/{}", self.base.trim_end_matches('/'), self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_base_and_path() {
        let loc = Location::new("/src/protos", "shop/order.proto");
        assert_eq!(loc.to_string(), "/src/protos/shop/order.proto");
    }

    #[test]
    fn test_display_trims_trailing_slash() {
        let loc = Location::new("/src/protos/", "order.proto");
        assert_eq!(loc.to_string(), "/src/protos/order.proto");
    }

    #[test]
    fn test_display_root_only() {
        assert_eq!(Location::root("deps.tar").to_string(), "deps.tar");
    }

    #[test]
    fn test_at_keeps_base() {
        let loc = Location::root("/src").at("a.proto");
        assert_eq!(loc.base(), "/src");
        assert_eq!(loc.path(), "a.proto");
    }
}
