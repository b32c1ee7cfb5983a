//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{MANIFEST_FILE, Manifest};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILE)
    }
}

impl Manifest {
    /// Parse a wiregen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a wiregen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    manifest.validate(&ctx)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_empty_manifest_uses_defaults() {
        let manifest: Manifest = "".parse().unwrap();
        assert_eq!(manifest.sources.proto_paths, ["src/main/proto"]);
        assert!(manifest.sources.proto_files.is_empty());
        assert!(manifest.prune.includes.is_empty());
        assert_eq!(
            manifest.output.directory,
            PathBuf::from("target/generated-sources/wire")
        );
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_full_manifest() {
        let manifest: Manifest = r#"
            [sources]
            proto_paths = ["src/main/proto", "vendor/common-protos.tar.gz"]
            proto_files = ["shop/order.proto"]

            [prune]
            includes = ["shop.Order"]
            excludes = ["shop.LegacyOrder", "audit.*"]

            [output]
            directory = "gen"
            "#
        .parse()
        .unwrap();

        assert_eq!(
            manifest.sources.proto_paths,
            ["src/main/proto", "vendor/common-protos.tar.gz"]
        );
        assert_eq!(manifest.sources.proto_files, ["shop/order.proto"]);
        assert_eq!(manifest.prune.excludes, ["shop.LegacyOrder", "audit.*"]);
        assert_eq!(manifest.output.directory, PathBuf::from("gen"));
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let err = "[sources]\nproto_path = [\"a\"]\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_table_is_a_parse_error() {
        let err = "[codegen]\nlanguage = \"rust\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let err = "[sources]\nproto_paths = \"src\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
