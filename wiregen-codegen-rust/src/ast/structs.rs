//! Rust struct builder.

use wiregen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A public field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Builder for public Rust structs with named fields.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            fields: Vec::new(),
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

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the struct as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        if !self.derives.is_empty() {
            fragments.push(CodeFragment::line(format!("#[derive({})]", self.derives.join(", "))));
        }

        if self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!("pub struct {} {{}}", self.name)));
        } else {
            let body = self
                .fields
                .iter()
                .flat_map(|field| {
                    let doc = field.doc.as_ref().map(CodeFragment::doc);
                    doc.into_iter()
                        .chain([CodeFragment::line(format!("pub {}: {},", field.name, field.ty))])
                })
                .collect();
            fragments.push(CodeFragment::braced(format!("pub struct {} {{", self.name), body));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_struct() {
        let s = Struct::new("Empty").build();
        assert_eq!(s, "pub struct Empty {}\n");
    }

    #[test]
    fn test_struct_with_derives() {
        let s = Struct::new("Foo").derive("Debug").derive("Clone").build();
        assert_eq!(s, "#[derive(Debug, Clone)]\npub struct Foo {}\n");
    }

    #[test]
    fn test_struct_with_fields() {
        let s = Struct::new("Person")
            .doc("A person.")
            .field(Field::new("name", "String").doc("Full name."))
            .field(Field::new("age", "u32"))
            .build();
        assert_eq!(
            s,
            "/// A person.\npub struct Person {\n    /// Full name.\n    pub name: String,\n    pub age: u32,\n}\n"
        );
    }
}
