//! Diagnostic types for the pipeline.
//!
//! Diagnostics are observational: counts, timings and unused-rule warnings
//! collected while the pipeline runs. Fatal problems are [`crate::Error`]s
//! instead.

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Something the caller should clean up, such as a dead prune rule.
    Warning,
    /// Informational message about the run.
    Info,
}

impl Severity {
    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Pipeline stage a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Mount,
    Locate,
    Load,
    Prune,
    Emit,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Mount => "mount",
            Stage::Locate => "locate",
            Stage::Load => "load",
            Stage::Prune => "prune",
            Stage::Emit => "emit",
        };
        f.write_str(name)
    }
}

/// A diagnostic message from a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    /// What the message is about, e.g. a prune rule or a root.
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            stage,
            message: message.into(),
            location: None,
        }
    }

    /// Create a new info diagnostic.
    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            stage,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " ({})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning(Stage::Prune, "unused include").at("pkg.Foo");
        assert!(diag.severity.is_warning());
        assert_eq!(diag.to_string(), "warning: unused include (pkg.Foo)");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Mount.to_string(), "mount");
        assert_eq!(Stage::Emit.to_string(), "emit");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
