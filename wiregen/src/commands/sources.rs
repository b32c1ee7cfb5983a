//! Arguments shared by commands that compile proto sources.

use std::path::{Path, PathBuf};

use clap::Args;
use wiregen_manifest::{MANIFEST_FILE, Manifest, SourceContext, WiregenToml};

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Path to wiregen.toml (defaults to ./wiregen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory or archive to search for protos; replaces [sources].proto_paths
    #[arg(long = "proto-path", value_name = "PATH")]
    pub proto_paths: Vec<String>,

    /// Proto file to generate, relative to a proto path; replaces [sources].proto_files
    #[arg(long = "proto-file", value_name = "FILE")]
    pub proto_files: Vec<String>,

    /// Type or package to keep, with everything it references; replaces [prune].includes
    #[arg(long = "include", value_name = "RULE")]
    pub includes: Vec<String>,

    /// Type or package to drop; replaces [prune].excludes
    #[arg(long = "exclude", value_name = "RULE")]
    pub excludes: Vec<String>,
}

impl SourceArgs {
    /// Read the manifest and apply command-line overrides.
    ///
    /// An explicitly named config must exist. Without one, `./wiregen.toml`
    /// is used if present and defaults otherwise.
    pub fn manifest(&self) -> wiregen_manifest::Result<Manifest> {
        let file = match &self.config {
            Some(path) => Some(WiregenToml::open(path)?),
            None if Path::new(MANIFEST_FILE).is_file() => Some(WiregenToml::open(MANIFEST_FILE)?),
            None => None,
        };

        let ctx = match &file {
            Some(file) => SourceContext::new(file.content(), file.path().display().to_string()),
            None => SourceContext::new("", "command line"),
        };
        let mut manifest = file.map(WiregenToml::into_manifest).unwrap_or_default();

        if self.apply(&mut manifest) {
            manifest.validate(&ctx)?;
        }
        Ok(manifest)
    }

    /// Apply overrides, returning whether anything changed.
    fn apply(&self, manifest: &mut Manifest) -> bool {
        let mut changed = false;
        for (value, target) in [
            (&self.proto_paths, &mut manifest.sources.proto_paths),
            (&self.proto_files, &mut manifest.sources.proto_files),
            (&self.includes, &mut manifest.prune.includes),
            (&self.excludes, &mut manifest.prune.excludes),
        ] {
            if !value.is_empty() {
                *target = value.clone();
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_overrides_replace_manifest_values() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("wiregen.toml");
        fs::write(
            &config,
            "[sources]\nproto_paths = [\"protos\"]\nproto_files = [\"a.proto\"]\n[prune]\nincludes = [\"shop\"]\n",
        )
        .unwrap();

        let args = SourceArgs {
            config: Some(config),
            proto_paths: vec!["other".into(), "deps.tar".into()],
            excludes: vec!["shop.Legacy".into()],
            ..Default::default()
        };
        let manifest = args.manifest().unwrap();

        assert_eq!(manifest.sources.proto_paths, ["other", "deps.tar"]);
        assert_eq!(manifest.sources.proto_files, ["a.proto"]);
        assert_eq!(manifest.prune.includes, ["shop"]);
        assert_eq!(manifest.prune.excludes, ["shop.Legacy"]);
    }

    #[test]
    fn test_overrides_are_validated() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("wiregen.toml");
        fs::write(&config, "[prune]\nincludes = [\"shop\"]\n").unwrap();

        let args = SourceArgs {
            config: Some(config),
            excludes: vec!["shop".into()],
            ..Default::default()
        };
        let err = args.manifest().unwrap_err();
        assert_eq!(err.to_string(), "'shop' is both included and excluded");
    }

    #[test]
    fn test_named_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let args = SourceArgs {
            config: Some(temp.path().join("missing.toml")),
            ..Default::default()
        };
        assert!(matches!(*args.manifest().unwrap_err(), wiregen_manifest::Error::Io { .. }));
    }
}
