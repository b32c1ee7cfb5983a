//! The generation pipeline.
//!
//! A run is strictly linear: mount the search roots, locate the requested
//! files, load the schema, prune it, then emit. Any failure aborts the
//! remaining stages; archive mounts are released on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use wiregen_codegen::{Pipeline, PipelineInput, RuleSet};
//!
//! let input = PipelineInput::new(vec!["src/main/proto".into()], vec!["shop/order.proto".into()]);
//! let report = Pipeline::new(input, "target/generated-sources/wire")
//!     .rules(RuleSet::new(["shop.Order"], Vec::<String>::new()))
//!     .run(&ProtoLoader::new(), &RustTarget)?;
//!
//! for diag in report.warnings() {
//!     eprintln!("{diag}");
//! }
//! ```

mod diagnostic;
mod runner;

pub use diagnostic::{Diagnostic, Severity, Stage};
pub use runner::{Pipeline, PipelineReport};
