//! Manifest types and parsing for wiregen.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::WiregenToml;
use serde::Deserialize;
pub use validate::{find_value_span, rule_error};

/// Default manifest file name, looked up in the working directory.
pub const MANIFEST_FILE: &str = "wiregen.toml";

/// Root manifest for wiregen.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub sources: Sources,

    #[serde(default)]
    pub prune: Prune,

    #[serde(default)]
    pub output: Output,
}

/// `[sources]`: where protos are found and which ones to generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sources {
    /// Directories or archives to search, in priority order.
    #[serde(default = "default_proto_paths")]
    pub proto_paths: Vec<String>,

    /// Files to generate, relative to a proto path. When empty, every
    /// file under the proto paths is generated.
    #[serde(default)]
    pub proto_files: Vec<String>,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            proto_paths: default_proto_paths(),
            proto_files: Vec::new(),
        }
    }
}

/// `[prune]`: include and exclude rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prune {
    #[serde(default)]
    pub includes: Vec<String>,

    #[serde(default)]
    pub excludes: Vec<String>,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Output {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_proto_paths() -> Vec<String> {
    vec!["src/main/proto".to_string()]
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("target/generated-sources/wire")
}
