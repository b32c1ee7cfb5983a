use super::{CodeFragment, Indent, Renderable};

/// Accumulates source text with tracked indentation.
///
/// ```
/// use wiregen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::rust();
/// builder.apply(CodeFragment::braced("pub struct Point {", vec![
///     CodeFragment::line("pub x: i32,"),
/// ]));
///
/// assert_eq!(builder.build(), "pub struct Point {\n    pub x: i32,\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// Write `s` at the current indentation, followed by a newline.
    pub fn line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            for _ in 0..self.level {
                self.buffer.push_str(self.indent.as_str());
            }
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Write every fragment of `node`.
    pub fn emit(&mut self, node: &(impl Renderable + ?Sized)) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply(fragment);
        }
        self
    }

    pub fn apply(&mut self, fragment: CodeFragment) -> &mut Self {
        match fragment {
            CodeFragment::Line(s) => self.line(&s),
            CodeFragment::Blank => self.blank(),
            CodeFragment::Doc(text) => self.line(&format!("/// {text}")),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.line(&header).indent();
                for f in body {
                    self.apply(f);
                }
                self.dedent();
                if let Some(close) = close {
                    self.line(&close);
                }
                self
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply(f);
                }
                self
            }
        }
    }

    pub fn build(self) -> String {
        self.buffer
    }
}
