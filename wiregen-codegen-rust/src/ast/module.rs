//! Rust module builder.

use wiregen_codegen::builder::{CodeFragment, Renderable};

use super::{Enum, Struct};

/// A top-level item of a generated file or module.
#[derive(Debug, Clone)]
pub enum Item {
    Struct(Struct),
    Enum(Enum),
    Module(Module),
}

impl Renderable for Item {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Item::Struct(s) => s.to_fragments(),
            Item::Enum(e) => e.to_fragments(),
            Item::Module(m) => m.to_fragments(),
        }
    }
}

/// Items separated by blank lines.
pub fn items_to_fragments(items: &[Item]) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            fragments.push(CodeFragment::Blank);
        }
        fragments.extend(item.to_fragments());
    }
    fragments
}

/// An inline `pub mod name { ... }`.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    items: Vec<Item>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Renderable for Module {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            format!("pub mod {} {{", self.name),
            items_to_fragments(&self.items),
        )]
    }
}
