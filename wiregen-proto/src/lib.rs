//! Built-in schema loader for wiregen.
//!
//! Reads `.proto` sources, follows their imports, and links field types
//! into a [`wiregen_schema::TypeGraph`]. Only declarations are modelled;
//! options and services are read past.

mod lexer;
mod linker;
mod loader;
mod parser;

pub use loader::ProtoLoader;
