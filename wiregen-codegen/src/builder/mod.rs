//! Building blocks shared by language backends.
//!
//! - [`CodeBuilder`] accumulates indented source text
//! - [`CodeFragment`] is the intermediate form AST nodes render to
//! - [`Renderable`] is implemented by AST nodes

mod code_builder;
mod fragment;
mod indent;

pub use code_builder::CodeBuilder;
pub use fragment::{CodeFragment, Renderable};
pub use indent::Indent;
