/// Indentation unit of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Four spaces, as rustfmt writes.
    pub const RUST: Self = Self::Spaces(4);

    /// One indentation level.
    pub fn as_str(&self) -> &'static str {
        const SPACES: &str = "        ";
        match self {
            Self::Spaces(n) if (*n as usize) <= SPACES.len() => &SPACES[..*n as usize],
            Self::Spaces(_) => SPACES,
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::RUST.as_str(), "    ");
        assert_eq!(Indent::Spaces(12).as_str(), "        ");
        assert_eq!(Indent::Tab.as_str(), "\t");
    }
}
