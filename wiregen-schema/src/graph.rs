//! Linked type graph.
//!
//! A [`TypeGraph`] is an ordered list of loaded proto files, each with the
//! types it declares. Field types are already resolved to fully qualified
//! names, which makes them the cross-file reference edges used for
//! reachability.

use wiregen_core::{Location, QualifiedName};

/// The linked representation of every loaded proto file.
///
/// Files keep the order the loader produced them in. The graph is never
/// mutated once built; pruning produces a new graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeGraph {
    files: Vec<ProtoFile>,
}

impl TypeGraph {
    pub fn new(files: Vec<ProtoFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[ProtoFile] {
        &self.files
    }

    /// Find a file by its path relative to its root.
    pub fn file(&self, path: &str) -> Option<&ProtoFile> {
        self.files.iter().find(|f| f.location.path() == path)
    }

    /// Iterate over every type in the graph, nested types included, in
    /// file order then declaration order (parents before children).
    pub fn types(&self) -> impl Iterator<Item = &ProtoType> {
        self.files.iter().flat_map(|f| f.all_types())
    }

    /// Find a type by its fully qualified name.
    pub fn find_type(&self, name: &str) -> Option<&ProtoType> {
        self.types().find(|t| t.name == name)
    }

    /// Total number of declared types, nested types included.
    pub fn type_count(&self) -> usize {
        self.files.iter().map(ProtoFile::type_count).sum()
    }
}

/// A single loaded `.proto` file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoFile {
    /// Where the file was loaded from.
    pub location: Location,
    /// Declared package, empty if none.
    pub package: String,
    /// Imported paths, as written in the source.
    pub imports: Vec<String>,
    /// Top-level types in declaration order.
    pub types: Vec<ProtoType>,
}

impl ProtoFile {
    pub fn new(location: Location, package: impl Into<String>) -> Self {
        Self {
            location,
            package: package.into(),
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    /// All types declared in this file, depth first.
    pub fn all_types(&self) -> impl Iterator<Item = &ProtoType> {
        let mut stack: Vec<&ProtoType> = self.types.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.nested.iter().rev());
            Some(next)
        })
    }

    pub fn type_count(&self) -> usize {
        self.all_types().count()
    }
}

/// Kind of declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Message,
    Enum,
}

/// A message or enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoType {
    /// Fully qualified name, e.g. `shop.Order.Item`.
    pub name: String,
    /// Package of the declaring file.
    pub package: String,
    pub kind: TypeKind,
    /// File the type is declared in.
    pub location: Location,
    /// Message fields; empty for enums.
    pub fields: Vec<Field>,
    /// Enum constants; empty for messages.
    pub constants: Vec<EnumConstant>,
    /// Types declared inside this one.
    pub nested: Vec<ProtoType>,
}

impl ProtoType {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        kind: TypeKind,
        location: Location,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            location,
            fields: Vec::new(),
            constants: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// The name with the package split off. For nested types the simple
    /// name keeps the enclosing type names (`Order.Item`).
    pub fn qualified_name(&self) -> QualifiedName {
        let simple = if self.package.is_empty() {
            self.name.as_str()
        } else {
            self.name
                .strip_prefix(&self.package)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.name)
        };
        QualifiedName::new(self.package.clone(), simple)
    }

    /// The last segment of the name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Fully qualified names of the types referenced by this type's fields.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.ty.named())
    }
}

/// A message field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub number: i32,
    pub label: FieldLabel,
    pub ty: FieldType,
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    /// No label (proto3 implicit presence).
    Singular,
    /// `optional`, or a member of a `oneof`.
    Optional,
    Required,
    Repeated,
}

/// A resolved field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Scalar(ScalarType),
    /// A message or enum, by fully qualified name.
    Named(String),
    Map {
        key: ScalarType,
        value: Box<FieldType>,
    },
}

impl FieldType {
    /// The referenced type name, looking through maps.
    pub fn named(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Named(name) => Some(name),
            Self::Map { value, .. } => value.named(),
        }
    }
}

/// Protobuf scalar value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    /// Look up a scalar by its proto keyword.
    pub fn from_keyword(s: &str) -> Option<Self> {
        let scalar = match s {
            "double" => Self::Double,
            "float" => Self::Float,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "sint32" => Self::Sint32,
            "sint64" => Self::Sint64,
            "fixed32" => Self::Fixed32,
            "fixed64" => Self::Fixed64,
            "sfixed32" => Self::Sfixed32,
            "sfixed64" => Self::Sfixed64,
            "bool" => Self::Bool,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            _ => return None,
        };
        Some(scalar)
    }
}

/// An enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub name: String,
    pub value: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str) -> ProtoType {
        ProtoType::new(name, "shop", TypeKind::Message, Location::new("/src", "shop.proto"))
    }

    fn graph() -> TypeGraph {
        let mut order = message("shop.Order");
        order.nested.push(message("shop.Order.Item"));
        order.fields.push(Field {
            name: "customer".into(),
            number: 1,
            label: FieldLabel::Singular,
            ty: FieldType::Named("shop.Customer".into()),
        });
        order.fields.push(Field {
            name: "tags".into(),
            number: 2,
            label: FieldLabel::Singular,
            ty: FieldType::Map {
                key: ScalarType::String,
                value: Box::new(FieldType::Named("shop.Tag".into())),
            },
        });

        let mut file = ProtoFile::new(Location::new("/src", "shop.proto"), "shop");
        file.types.push(order);
        file.types.push(message("shop.Customer"));
        TypeGraph::new(vec![file])
    }

    #[test]
    fn test_types_are_depth_first() {
        let graph = graph();
        let names: Vec<_> = graph.types().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["shop.Order", "shop.Order.Item", "shop.Customer"]);
        assert_eq!(graph.type_count(), 3);
    }

    #[test]
    fn test_references_look_through_maps() {
        let graph = graph();
        let order = graph.find_type("shop.Order").unwrap();
        let refs: Vec<_> = order.references().collect();
        assert_eq!(refs, ["shop.Customer", "shop.Tag"]);
    }

    #[test]
    fn test_qualified_name_of_nested_type() {
        let graph = graph();
        let item = graph.find_type("shop.Order.Item").unwrap();
        assert_eq!(item.qualified_name().package(), "shop");
        assert_eq!(item.qualified_name().simple_name(), "Order.Item");
        assert_eq!(item.simple_name(), "Item");
    }

    #[test]
    fn test_file_lookup_by_path() {
        let graph = graph();
        assert!(graph.file("shop.proto").is_some());
        assert!(graph.file("other.proto").is_none());
    }

    #[test]
    fn test_scalar_keywords() {
        assert_eq!(ScalarType::from_keyword("sfixed64"), Some(ScalarType::Sfixed64));
        assert_eq!(ScalarType::from_keyword("Order"), None);
    }
}
