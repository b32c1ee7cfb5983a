//! `wiregen.toml` parsing and validation.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    MANIFEST_FILE, Manifest, Output, Prune, Sources, WiregenToml, find_value_span, rule_error,
};
