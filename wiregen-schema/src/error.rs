use miette::Diagnostic;
use thiserror::Error;
use wiregen_core::Location;

/// A failure reported by a schema loader or type generator.
///
/// The pipeline surfaces these unchanged.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("failed to read {location}")]
    #[diagnostic(code(wiregen::schema::io))]
    Io {
        location: Location,
        #[source]
        source: std::io::Error,
    },

    #[error("{location}:{line}: {message}")]
    #[diagnostic(code(wiregen::schema::syntax))]
    Syntax {
        location: Location,
        line: usize,
        message: String,
    },

    #[error("{location}:{line}: unable to resolve {name}")]
    #[diagnostic(
        code(wiregen::schema::unresolved),
        help("check the imports of {location} and the package of {name}")
    )]
    Unresolved {
        location: Location,
        line: usize,
        name: String,
    },

    #[error("{location}: unable to find import '{import}'")]
    #[diagnostic(
        code(wiregen::schema::missing_import),
        help("add the directory or archive containing '{import}' to the proto paths")
    )]
    MissingImport { location: Location, import: String },

    #[error("{location}: {name} is declared more than once")]
    #[diagnostic(code(wiregen::schema::duplicate_type))]
    DuplicateType { location: Location, name: String },

    #[error("cannot generate {name}: {message}")]
    #[diagnostic(code(wiregen::schema::generate))]
    Generate { name: String, message: String },
}

impl SchemaError {
    /// Create a syntax error at a line of a file.
    pub fn syntax(location: &Location, line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            location: location.clone(),
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_display() {
        let err = SchemaError::syntax(&Location::new("/src", "a.proto"), 3, "expected ';'");
        assert_eq!(err.to_string(), "/src/a.proto:3: expected ';'");
    }

    #[test]
    fn test_missing_import_display() {
        let err = SchemaError::MissingImport {
            location: Location::new("/src", "a.proto"),
            import: "b.proto".into(),
        };
        assert_eq!(err.to_string(), "/src/a.proto: unable to find import 'b.proto'");
    }
}
