//! Rust enum builder.

use wiregen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A unit variant, optionally with an explicit discriminant.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub value: Option<i32>,
    pub attrs: Vec<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            attrs: Vec::new(),
        }
    }

    pub fn value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    /// Add an attribute to the variant, e.g., `default`.
    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }
}

/// Builder for public Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Build the enum as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        if !self.derives.is_empty() {
            fragments.push(CodeFragment::line(format!("#[derive({})]", self.derives.join(", "))));
        }
        for attr in &self.attrs {
            fragments.push(CodeFragment::line(format!("#[{attr}]")));
        }

        if self.variants.is_empty() {
            fragments.push(CodeFragment::line(format!("pub enum {} {{}}", self.name)));
            return fragments;
        }

        let mut body = Vec::new();
        for variant in &self.variants {
            for attr in &variant.attrs {
                body.push(CodeFragment::line(format!("#[{attr}]")));
            }
            body.push(CodeFragment::line(match variant.value {
                Some(value) => format!("{} = {},", variant.name, value),
                None => format!("{},", variant.name),
            }));
        }
        fragments.push(CodeFragment::braced(format!("pub enum {} {{", self.name), body));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_enum() {
        assert_eq!(Enum::new("Never").build(), "pub enum Never {}\n");
    }

    #[test]
    fn test_enum_with_discriminants() {
        let e = Enum::new("Status")
            .derive("Debug")
            .attr("repr(i32)")
            .variant(Variant::new("Unknown").value(0).attr("default"))
            .variant(Variant::new("Open").value(1))
            .build();
        assert_eq!(
            e,
            "#[derive(Debug)]\n#[repr(i32)]\npub enum Status {\n    #[default]\n    Unknown = 0,\n    Open = 1,\n}\n"
        );
    }
}
