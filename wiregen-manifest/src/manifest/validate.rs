//! Validation of a parsed manifest.

use std::{
    collections::HashSet,
    path::{Component, Path},
};

use miette::SourceSpan;

use super::Manifest;
use crate::{Result, error::SourceContext};

impl Manifest {
    /// Check the manifest's values, labelling errors against `ctx`.
    ///
    /// Run automatically when parsing; call it again after changing values
    /// in code, e.g. after applying command-line overrides.
    pub fn validate(&self, ctx: &SourceContext) -> Result<()> {
        for path in &self.sources.proto_paths {
            if path.trim().is_empty() {
                return Err(ctx.validation_error(
                    "proto path must not be empty",
                    find_value_span(ctx.src(), path),
                ));
            }
        }

        let mut files = HashSet::new();
        for file in &self.sources.proto_files {
            if file.is_empty() || Path::new(file).is_absolute() {
                return Err(ctx.validation_error(
                    format!("proto file '{file}' must be a path relative to a proto path"),
                    find_value_span(ctx.src(), file),
                ));
            }
            if Path::new(file).components().any(|c| c == Component::ParentDir) {
                return Err(ctx.validation_error(
                    format!("proto file '{file}' must not contain '..'"),
                    find_value_span(ctx.src(), file),
                ));
            }
            if !files.insert(file.as_str()) {
                return Err(ctx.validation_error(
                    format!("proto file '{file}' is listed more than once"),
                    find_last_value_span(ctx.src(), file),
                ));
            }
        }

        for rule in self.prune.includes.iter().chain(&self.prune.excludes) {
            if let Some(reason) = rule_error(rule) {
                return Err(ctx.validation_error(
                    format!("invalid prune rule '{rule}': {reason}"),
                    find_value_span(ctx.src(), rule),
                ));
            }
        }

        let includes: HashSet<&str> = self.prune.includes.iter().map(|r| rule_name(r)).collect();
        if let Some(rule) = self
            .prune
            .excludes
            .iter()
            .find(|rule| includes.contains(rule_name(rule)))
        {
            return Err(ctx.validation_error(
                format!("'{rule}' is both included and excluded"),
                find_last_value_span(ctx.src(), rule),
            ));
        }

        Ok(())
    }
}

/// The name a rule matches, without its optional `.*` suffix.
fn rule_name(rule: &str) -> &str {
    rule.strip_suffix(".*").unwrap_or(rule)
}

/// Why `rule` is not a valid include or exclude rule, if it is not.
///
/// A rule is a dotted package or type name, optionally ending in `.*`.
pub fn rule_error(rule: &str) -> Option<String> {
    let name = rule_name(rule);
    if name.is_empty() {
        return Some("expected a package or type name".to_string());
    }

    for segment in name.split('.') {
        let mut chars = segment.chars();
        match chars.next() {
            None => return Some("names cannot contain empty segments".to_string()),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Some(format!("'{segment}' must start with a letter or underscore"));
            }
            _ => {}
        }
        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Some(format!("'{segment}' contains invalid character '{c}'"));
        }
    }
    None
}

/// Span of the first string literal in `src` holding exactly `value`,
/// excluding the quotes.
pub fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    ['"', '\''].into_iter().find_map(|quote| {
        src.find(&format!("{quote}{value}{quote}"))
            .map(|pos| SourceSpan::from((pos + 1, value.len())))
    })
}

fn find_last_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    ['"', '\''].into_iter().find_map(|quote| {
        src.rfind(&format!("{quote}{value}{quote}"))
            .map(|pos| SourceSpan::from((pos + 1, value.len())))
    })
}
