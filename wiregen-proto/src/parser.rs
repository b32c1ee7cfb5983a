//! Declaration parser for `.proto` sources.
//!
//! Only what the type graph needs is kept: the package, imports, and the
//! message and enum declarations with their fields and constants. Options,
//! reserved ranges, extension ranges, services and `extend` blocks are
//! read past.

use wiregen_core::Location;
use wiregen_schema::{EnumConstant, FieldLabel, ScalarType, SchemaError};

use crate::lexer::{Token, TokenKind, tokenize};

/// A parsed file, before name resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedFile {
    pub location: Location,
    pub package: String,
    pub imports: Vec<String>,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decl {
    Message(MessageDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MessageDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub nested: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EnumDecl {
    pub name: String,
    pub constants: Vec<EnumConstant>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldDecl {
    pub name: String,
    pub number: i32,
    pub label: FieldLabel,
    pub ty: TypeRef,
    pub line: usize,
}

/// A field type as written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TypeRef {
    Scalar(ScalarType),
    Named(String),
    Map { key: ScalarType, value: Box<TypeRef> },
}

/// Parse a whole file.
pub(crate) fn parse(location: Location, source: &str) -> Result<ParsedFile, SchemaError> {
    let tokens = tokenize(&location, source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        location,
    };
    parser.file()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    location: Location,
}

impl Parser {
    fn file(&mut self) -> Result<ParsedFile, SchemaError> {
        let mut package = String::new();
        let mut imports = Vec::new();
        let mut decls = Vec::new();

        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Symbol(';') {
                self.pos += 1;
                continue;
            }
            let (keyword, line) = self.ident()?;
            match keyword.as_str() {
                "syntax" | "edition" | "option" => self.skip_statement()?,
                "package" => {
                    package = self.ident()?.0;
                    self.symbol(';')?;
                }
                "import" => {
                    if matches!(self.peek_ident(), Some("public" | "weak")) {
                        self.pos += 1;
                    }
                    imports.push(self.string()?);
                    self.symbol(';')?;
                }
                "message" => decls.push(Decl::Message(self.message()?)),
                "enum" => decls.push(Decl::Enum(self.enumeration()?)),
                "service" | "extend" => {
                    self.ident()?;
                    self.skip_block()?;
                }
                other => return Err(self.error_at(line, format!("unexpected '{other}'"))),
            }
        }

        Ok(ParsedFile {
            location: self.location.clone(),
            package,
            imports,
            decls,
        })
    }

    fn message(&mut self) -> Result<MessageDecl, SchemaError> {
        let name = self.ident()?.0;
        self.symbol('{')?;
        let mut message = MessageDecl {
            name,
            fields: Vec::new(),
            nested: Vec::new(),
        };

        while !self.eat_symbol('}')? {
            if self.eat_symbol(';')? {
                continue;
            }
            match self.peek_ident() {
                Some("message") => {
                    self.pos += 1;
                    message.nested.push(Decl::Message(self.message()?));
                }
                Some("enum") => {
                    self.pos += 1;
                    message.nested.push(Decl::Enum(self.enumeration()?));
                }
                Some("oneof") => {
                    self.pos += 1;
                    self.ident()?;
                    self.symbol('{')?;
                    while !self.eat_symbol('}')? {
                        if self.eat_symbol(';')? {
                            continue;
                        }
                        if self.peek_ident() == Some("option") {
                            self.skip_statement()?;
                            continue;
                        }
                        message.fields.push(self.field(FieldLabel::Optional)?);
                    }
                }
                Some("option" | "reserved" | "extensions") => self.skip_statement()?,
                Some("extend") => {
                    self.pos += 1;
                    self.ident()?;
                    self.skip_block()?;
                }
                Some("optional") => {
                    self.pos += 1;
                    message.fields.push(self.field(FieldLabel::Optional)?);
                }
                Some("required") => {
                    self.pos += 1;
                    message.fields.push(self.field(FieldLabel::Required)?);
                }
                Some("repeated") => {
                    self.pos += 1;
                    message.fields.push(self.field(FieldLabel::Repeated)?);
                }
                _ => message.fields.push(self.field(FieldLabel::Singular)?),
            }
        }

        Ok(message)
    }

    fn field(&mut self, label: FieldLabel) -> Result<FieldDecl, SchemaError> {
        let (type_name, line) = self.ident()?;
        let ty = match type_name.as_str() {
            "group" => return Err(self.error_at(line, "groups are not supported")),
            "map" if self.peek_symbol('<') => {
                self.pos += 1;
                let (key, key_line) = self.ident()?;
                let key = ScalarType::from_keyword(&key)
                    .ok_or_else(|| self.error_at(key_line, format!("invalid map key type '{key}'")))?;
                self.symbol(',')?;
                let value = type_ref(self.ident()?.0);
                self.symbol('>')?;
                TypeRef::Map {
                    key,
                    value: Box::new(value),
                }
            }
            _ => type_ref(type_name),
        };

        let name = self.ident()?.0;
        self.symbol('=')?;
        let number = self.integer()?;
        if self.peek_symbol('[') {
            self.skip_balanced('[', ']')?;
        }
        self.symbol(';')?;

        Ok(FieldDecl {
            name,
            number,
            label,
            ty,
            line,
        })
    }

    fn enumeration(&mut self) -> Result<EnumDecl, SchemaError> {
        let name = self.ident()?.0;
        self.symbol('{')?;
        let mut constants = Vec::new();

        while !self.eat_symbol('}')? {
            if self.eat_symbol(';')? {
                continue;
            }
            if matches!(self.peek_ident(), Some("option" | "reserved")) {
                self.skip_statement()?;
                continue;
            }
            let name = self.ident()?.0;
            self.symbol('=')?;
            let value = self.integer()?;
            if self.peek_symbol('[') {
                self.skip_balanced('[', ']')?;
            }
            self.symbol(';')?;
            constants.push(EnumConstant { name, value });
        }

        Ok(EnumDecl { name, constants })
    }

    fn integer(&mut self) -> Result<i32, SchemaError> {
        let negative = self.eat_symbol('-')?;
        let line = self.line();
        match self.next().map(|t| t.kind) {
            Some(TokenKind::Number(text)) => parse_int(&text)
                .map(|n| if negative { -n } else { n })
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| self.error_at(line, format!("invalid integer '{text}'"))),
            _ => Err(self.error_at(line, "expected an integer")),
        }
    }

    fn ident(&mut self) -> Result<(String, usize), SchemaError> {
        let line = self.line();
        match self.next() {
            Some(Token {
                kind: TokenKind::Ident(name),
                line,
            }) => Ok((name, line)),
            Some(token) => Err(self.error_at(
                token.line,
                format!("expected identifier, found {}", describe(&token.kind)),
            )),
            None => Err(self.error_at(line, "expected identifier, found end of file")),
        }
    }

    fn string(&mut self) -> Result<String, SchemaError> {
        let line = self.line();
        match self.next().map(|t| t.kind) {
            Some(TokenKind::Str(value)) => Ok(value),
            _ => Err(self.error_at(line, "expected a string")),
        }
    }

    fn symbol(&mut self, symbol: char) -> Result<(), SchemaError> {
        let line = self.line();
        match self.next() {
            Some(Token {
                kind: TokenKind::Symbol(c),
                ..
            }) if c == symbol => Ok(()),
            Some(token) => Err(self.error_at(
                token.line,
                format!("expected '{symbol}', found {}", describe(&token.kind)),
            )),
            None => Err(self.error_at(line, format!("expected '{symbol}', found end of file"))),
        }
    }

    /// Consume `symbol` if it is next. Fails at end of input, so block
    /// loops stop on truncated files.
    fn eat_symbol(&mut self, symbol: char) -> Result<bool, SchemaError> {
        if self.peek().is_none() {
            return Err(self.error_at(self.line(), "unexpected end of file"));
        }
        if self.peek_symbol(symbol) {
            self.pos += 1;
            return Ok(true);
        }
        Ok(false)
    }

    /// Skip through the next `;` outside any brackets.
    fn skip_statement(&mut self) -> Result<(), SchemaError> {
        let mut depth = 0usize;
        let start = self.line();
        while let Some(token) = self.next() {
            match token.kind {
                TokenKind::Symbol('{' | '[' | '(') => depth += 1,
                TokenKind::Symbol('}' | ']' | ')') => depth = depth.saturating_sub(1),
                TokenKind::Symbol(';') if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        Err(self.error_at(start, "expected ';'"))
    }

    fn skip_block(&mut self) -> Result<(), SchemaError> {
        if !self.peek_symbol('{') {
            return self.symbol('{');
        }
        self.skip_balanced('{', '}')
    }

    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), SchemaError> {
        let start = self.line();
        let mut depth = 0usize;
        while let Some(token) = self.next() {
            match token.kind {
                TokenKind::Symbol(c) if c == open => depth += 1,
                TokenKind::Symbol(c) if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(self.error_at(start, format!("unclosed '{open}'")))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn peek_symbol(&self, symbol: char) -> bool {
        matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Symbol(c)) if *c == symbol)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Line of the next token, or of the last one at end of input.
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn error_at(&self, line: usize, message: impl Into<String>) -> SchemaError {
        SchemaError::syntax(&self.location, line, message)
    }
}

fn type_ref(name: String) -> TypeRef {
    match ScalarType::from_keyword(&name) {
        Some(scalar) => TypeRef::Scalar(scalar),
        None => TypeRef::Named(name),
    }
}

fn parse_int(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else if text.len() > 1 && text.starts_with('0') {
        i64::from_str_radix(&text[1..], 8).ok()
    } else {
        text.parse().ok()
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) => format!("'{name}'"),
        TokenKind::Number(text) => format!("'{text}'"),
        TokenKind::Str(value) => format!("\"{value}\""),
        TokenKind::Symbol(c) => format!("'{c}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(source: &str) -> ParsedFile {
        parse(Location::new("/src", "shop/order.proto"), source).unwrap()
    }

    fn message(decl: &Decl) -> &MessageDecl {
        match decl {
            Decl::Message(message) => message,
            Decl::Enum(e) => panic!("expected message, found enum {}", e.name),
        }
    }

    #[test]
    fn test_header_statements() {
        let file = parse_str(
            r#"
            syntax = "proto3";
            package shop.v1;
            import "common/money.proto";
            import public "common/address.proto";
            option java_package = "com.example.shop";
            option (custom.opt) = { key: "value" };
            "#,
        );
        assert_eq!(file.package, "shop.v1");
        assert_eq!(file.imports, ["common/money.proto", "common/address.proto"]);
        assert!(file.decls.is_empty());
    }

    #[test]
    fn test_message_with_labels_maps_and_oneof() {
        let file = parse_str(
            r#"
            message Order {
              string id = 1;
              repeated Item items = 2 [packed = true];
              map<string, int64> counts = 3;
              optional .common.Money total = 4;
              oneof payment {
                string card = 5;
                Voucher voucher = 6;
              }
              reserved 7, 8 to 10;
              reserved "legacy";
            }
            "#,
        );
        let order = message(&file.decls[0]);
        let labels: Vec<_> = order.fields.iter().map(|f| (f.name.as_str(), f.label)).collect();
        assert_eq!(
            labels,
            [
                ("id", FieldLabel::Singular),
                ("items", FieldLabel::Repeated),
                ("counts", FieldLabel::Singular),
                ("total", FieldLabel::Optional),
                ("card", FieldLabel::Optional),
                ("voucher", FieldLabel::Optional),
            ]
        );
        assert_eq!(
            order.fields[2].ty,
            TypeRef::Map {
                key: ScalarType::String,
                value: Box::new(TypeRef::Scalar(ScalarType::Int64)),
            }
        );
        assert_eq!(order.fields[3].ty, TypeRef::Named(".common.Money".into()));
        assert_eq!(order.fields[0].line, 3);
    }

    #[test]
    fn test_nested_types_and_enums() {
        let file = parse_str(
            r#"
            message Order {
              message Item { int32 qty = 1; }
              enum Status {
                option allow_alias = true;
                STATUS_UNKNOWN = 0;
                STATUS_OPEN = 1;
                STATUS_CLOSED = -1 [deprecated = true];
                STATUS_HEX = 0x10;
              }
              Status status = 1;
            }
            "#,
        );
        let order = message(&file.decls[0]);
        assert_eq!(order.nested.len(), 2);
        match &order.nested[1] {
            Decl::Enum(status) => {
                let values: Vec<_> = status.constants.iter().map(|c| c.value).collect();
                assert_eq!(values, [0, 1, -1, 16]);
            }
            Decl::Message(_) => panic!("expected enum"),
        }
    }

    #[test]
    fn test_services_and_extends_are_skipped() {
        let file = parse_str(
            r#"
            service Orders {
              rpc Get (GetRequest) returns (Order) { option (http) = { get: "/v1" }; }
            }
            extend google.protobuf.FieldOptions { string tag = 5000; }
            message Order { extensions 100 to max; }
            "#,
        );
        assert_eq!(file.decls.len(), 1);
        assert!(message(&file.decls[0]).fields.is_empty());
    }

    #[test]
    fn test_missing_semicolon_reports_line() {
        let err = parse(
            Location::new("/src", "bad.proto"),
            "message Order {\n  string id = 1\n}\n",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "/src/bad.proto:3: expected ';', found '}'");
    }

    #[test]
    fn test_truncated_message_is_an_error() {
        assert!(parse(Location::new("/src", "bad.proto"), "message Order { string id = 1;").is_err());
    }

    #[test]
    fn test_groups_are_rejected() {
        let err = parse(
            Location::new("/src", "g.proto"),
            "message A { optional group G = 1 { } }",
        )
        .unwrap_err();
        assert!(err.to_string().contains("groups are not supported"));
    }
}
