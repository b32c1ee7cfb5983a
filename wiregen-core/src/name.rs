use std::{fmt, path::PathBuf};

/// A package-qualified type name such as `shop.v1.Order`.
///
/// The package may be empty for types declared without a `package`
/// statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    package: String,
    simple_name: String,
}

impl QualifiedName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_name: simple_name.into(),
        }
    }

    /// Split a dotted name at its last segment.
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((package, simple)) => Self::new(package, simple),
            None => Self::new("", name),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// The package segments, in order.
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split('.').filter(|s| !s.is_empty())
    }

    /// Directory for this name relative to an output root, one level per
    /// package segment.
    pub fn package_dir(&self) -> PathBuf {
        self.package_segments().collect()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.simple_name)
        } else {
            write!(f, "{}.{}", self.package, self.simple_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_parse_qualified() {
        let name = QualifiedName::parse("shop.v1.Order");
        assert_eq!(name.package(), "shop.v1");
        assert_eq!(name.simple_name(), "Order");
        assert_eq!(name.to_string(), "shop.v1.Order");
    }

    #[test]
    fn test_parse_unqualified() {
        let name = QualifiedName::parse("Order");
        assert_eq!(name.package(), "");
        assert_eq!(name.to_string(), "Order");
        assert_eq!(name.package_dir(), PathBuf::new());
    }

    #[test]
    fn test_package_dir() {
        let name = QualifiedName::new("com.example.shop", "Order");
        assert_eq!(name.package_dir(), Path::new("com").join("example").join("shop"));
    }
}
