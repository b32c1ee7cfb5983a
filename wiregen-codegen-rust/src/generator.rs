use std::collections::HashMap;

use wiregen_codegen::builder::CodeBuilder;
use wiregen_core::QualifiedName;
use wiregen_schema::{
    Field, FieldLabel, FieldType, GeneratedType, ProtoType, SchemaError, TypeGenerator, TypeGraph,
    TypeKind,
};

use crate::{
    ast::{Enum, Field as StructField, Item, Module, Struct, Variant, items_to_fragments},
    naming, type_mapper,
};

const STRUCT_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq", "Default"];
const ENUM_DERIVES: &[&str] = &["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"];

/// Generates one Rust source file per top-level proto type.
///
/// Messages become structs with public fields and enums become
/// `#[repr(i32)]` enums. Nested types live in a module named after their
/// enclosing message. References are written as absolute `crate::` paths,
/// one module level per package segment.
pub struct RustGenerator {
    types: HashMap<String, TypeInfo>,
}

#[derive(Debug, Clone)]
struct TypeInfo {
    kind: TypeKind,
    path: String,
}

impl RustGenerator {
    pub fn new(graph: &TypeGraph) -> Self {
        let types = graph
            .types()
            .map(|ty| {
                let info = TypeInfo {
                    kind: ty.kind,
                    path: rust_path(ty),
                };
                (ty.name.clone(), info)
            })
            .collect();
        Self { types }
    }

    fn items(&self, ty: &ProtoType) -> Result<Vec<Item>, SchemaError> {
        match ty.kind {
            TypeKind::Enum => Ok(vec![Item::Enum(enum_item(ty))]),
            TypeKind::Message => {
                let mut items = vec![Item::Struct(self.struct_item(ty)?)];
                if !ty.nested.is_empty() {
                    let mut module = Module::new(naming::module_name(ty.simple_name()));
                    for nested in &ty.nested {
                        for item in self.items(nested)? {
                            module = module.item(item);
                        }
                    }
                    items.push(Item::Module(module));
                }
                Ok(items)
            }
        }
    }

    fn struct_item(&self, ty: &ProtoType) -> Result<Struct, SchemaError> {
        let mut item = STRUCT_DERIVES
            .iter()
            .fold(Struct::new(ty.simple_name()), |s, d| s.derive(*d));
        for field in &ty.fields {
            item = item.field(StructField::new(
                naming::field_name(&field.name),
                self.field_type(ty, field)?,
            ));
        }
        Ok(item)
    }

    fn field_type(&self, owner: &ProtoType, field: &Field) -> Result<String, SchemaError> {
        if let FieldType::Map { key, value } = &field.ty {
            let value = self.value_type(owner, value)?;
            return Ok(type_mapper::map(type_mapper::scalar(*key), &value));
        }

        let base = self.value_type(owner, &field.ty)?;
        let ty = match (field.label, &field.ty) {
            (FieldLabel::Repeated, _) => type_mapper::repeated(&base),
            (FieldLabel::Optional, FieldType::Scalar(_)) => type_mapper::optional(&base),
            (_, FieldType::Scalar(_)) => base,
            (label, FieldType::Named(name)) => match self.info(owner, name)?.kind {
                TypeKind::Message => type_mapper::boxed_optional(&base),
                TypeKind::Enum if label == FieldLabel::Optional => type_mapper::optional(&base),
                TypeKind::Enum => base,
            },
            (_, FieldType::Map { .. }) => base,
        };
        Ok(ty)
    }

    fn value_type(&self, owner: &ProtoType, ty: &FieldType) -> Result<String, SchemaError> {
        match ty {
            FieldType::Scalar(scalar) => Ok(type_mapper::scalar(*scalar).to_string()),
            FieldType::Named(name) => Ok(self.info(owner, name)?.path.clone()),
            FieldType::Map { .. } => Err(SchemaError::Generate {
                name: owner.name.clone(),
                message: "map values cannot be maps".to_string(),
            }),
        }
    }

    fn info(&self, owner: &ProtoType, name: &str) -> Result<&TypeInfo, SchemaError> {
        self.types.get(name).ok_or_else(|| SchemaError::Generate {
            name: owner.name.clone(),
            message: format!("unknown type {name}"),
        })
    }
}

impl TypeGenerator for RustGenerator {
    fn file_name(&self, name: &QualifiedName) -> String {
        naming::file_name(name.simple_name())
    }

    fn generate_type(&self, ty: &ProtoType) -> Result<GeneratedType, SchemaError> {
        let items = self.items(ty)?;
        let mut builder = CodeBuilder::rust();
        for fragment in items_to_fragments(&items) {
            builder.apply(fragment);
        }
        Ok(GeneratedType {
            name: ty.qualified_name(),
            source: builder.build(),
        })
    }
}

fn enum_item(ty: &ProtoType) -> Enum {
    let mut item = ENUM_DERIVES
        .iter()
        .fold(Enum::new(ty.simple_name()), |e, d| e.derive(*d));
    if !ty.constants.is_empty() {
        item = item.derive("Default");
    }
    item = item.attr("repr(i32)");

    let mut seen = Vec::new();
    for constant in &ty.constants {
        // Aliases share a discriminant with an earlier constant.
        if seen.contains(&constant.value) {
            continue;
        }
        let mut variant = Variant::new(naming::variant_name(&constant.name)).value(constant.value);
        if seen.is_empty() {
            variant = variant.attr("default");
        }
        seen.push(constant.value);
        item = item.variant(variant);
    }
    item
}

/// Absolute Rust path of a type: `shop.v1.Order.Item` in package `shop.v1`
/// becomes `crate::shop::v1::order::Item`.
fn rust_path(ty: &ProtoType) -> String {
    let name = ty.qualified_name();
    let mut segments = vec!["crate".to_string()];
    segments.extend(name.package_segments().map(naming::escape));

    let simple: Vec<&str> = name.simple_name().split('.').collect();
    if let Some((last, enclosing)) = simple.split_last() {
        segments.extend(enclosing.iter().map(|outer| naming::module_name(outer)));
        segments.push((*last).to_string());
    }
    segments.join("::")
}
