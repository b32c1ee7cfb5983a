//! Name resolution: turns parsed files into a linked [`TypeGraph`].

use std::collections::HashMap;

use wiregen_core::Location;
use wiregen_schema::{Field, FieldType, ProtoFile, ProtoType, SchemaError, TypeGraph, TypeKind};

use crate::parser::{Decl, ParsedFile, TypeRef};

/// Link `files`, keeping their order.
pub(crate) fn link(files: Vec<ParsedFile>) -> Result<TypeGraph, SchemaError> {
    let mut symbols: HashMap<String, TypeKind> = HashMap::new();
    for file in &files {
        declare(&file.package, &file.decls, &file.location, &mut symbols)?;
    }

    let linker = Linker { symbols };
    let files = files
        .into_iter()
        .map(|file| linker.file(file))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TypeGraph::new(files))
}

fn declare(
    scope: &str,
    decls: &[Decl],
    location: &Location,
    symbols: &mut HashMap<String, TypeKind>,
) -> Result<(), SchemaError> {
    for decl in decls {
        let (name, kind) = match decl {
            Decl::Message(message) => (qualify(scope, &message.name), TypeKind::Message),
            Decl::Enum(e) => (qualify(scope, &e.name), TypeKind::Enum),
        };
        if symbols.insert(name.clone(), kind).is_some() {
            return Err(SchemaError::DuplicateType {
                location: location.clone(),
                name,
            });
        }
        if let Decl::Message(message) = decl {
            declare(&name, &message.nested, location, symbols)?;
        }
    }
    Ok(())
}

struct Linker {
    symbols: HashMap<String, TypeKind>,
}

impl Linker {
    fn file(&self, file: ParsedFile) -> Result<ProtoFile, SchemaError> {
        let mut linked = ProtoFile::new(file.location, file.package);
        linked.imports = file.imports;
        for decl in &file.decls {
            let ty = self.decl(decl, &linked.package, &linked.package, &linked.location)?;
            linked.types.push(ty);
        }
        Ok(linked)
    }

    fn decl(
        &self,
        decl: &Decl,
        scope: &str,
        package: &str,
        location: &Location,
    ) -> Result<ProtoType, SchemaError> {
        match decl {
            Decl::Enum(e) => {
                let mut ty = ProtoType::new(qualify(scope, &e.name), package, TypeKind::Enum, location.clone());
                ty.constants = e.constants.clone();
                Ok(ty)
            }
            Decl::Message(message) => {
                let name = qualify(scope, &message.name);
                let mut ty = ProtoType::new(name.clone(), package, TypeKind::Message, location.clone());
                for field in &message.fields {
                    ty.fields.push(Field {
                        name: field.name.clone(),
                        number: field.number,
                        label: field.label,
                        ty: self.field_type(&field.ty, &name, location, field.line)?,
                    });
                }
                for nested in &message.nested {
                    ty.nested.push(self.decl(nested, &name, package, location)?);
                }
                Ok(ty)
            }
        }
    }

    fn field_type(
        &self,
        ty: &TypeRef,
        scope: &str,
        location: &Location,
        line: usize,
    ) -> Result<FieldType, SchemaError> {
        match ty {
            TypeRef::Scalar(scalar) => Ok(FieldType::Scalar(*scalar)),
            TypeRef::Named(name) => self
                .resolve(name, scope)
                .map(FieldType::Named)
                .ok_or_else(|| SchemaError::Unresolved {
                    location: location.clone(),
                    line,
                    name: name.clone(),
                }),
            TypeRef::Map { key, value } => Ok(FieldType::Map {
                key: *key,
                value: Box::new(self.field_type(value, scope, location, line)?),
            }),
        }
    }

    /// Resolve `name` as seen from inside `scope`: innermost scope first,
    /// then each enclosing scope out to the root. A leading `.` makes the
    /// name absolute.
    fn resolve(&self, name: &str, scope: &str) -> Option<String> {
        if let Some(absolute) = name.strip_prefix('.') {
            return self.symbols.contains_key(absolute).then(|| absolute.to_string());
        }

        let mut scope = Some(scope);
        while let Some(current) = scope {
            let candidate = qualify(current, name);
            if self.symbols.contains_key(&candidate) {
                return Some(candidate);
            }
            scope = match current.rsplit_once('.') {
                Some((parent, _)) => Some(parent),
                None if current.is_empty() => None,
                None => Some(""),
            };
        }
        None
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
