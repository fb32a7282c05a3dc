//! Smithy JSON AST model parser
//!
//! Parses the Smithy JSON AST format into a typed shape graph.
//!
//! Smithy specs are available at: https://github.com/aws/api-models-aws
//!
//! ## Format
//! Smithy JSON AST contains:
//! - Shape definitions keyed by `namespace#name`, tagged with a `type`
//! - Members pointing at other shapes through `target`
//! - Traits (documentation, constraints, error metadata)
//!
//! ## Usage
//! ```rust,ignore
//! use smithy_zod_gen_parser::smithy::SmithyParser;
//!
//! let parser = SmithyParser::from_file("models/s3-2006-03-01.json")?
//!     .without_ignored_prefixes(&["smithy.test#"]);
//! let model = parser.into_model();
//! ```

mod parser;
mod shape_id;
mod traits;
mod types;

pub use parser::SmithyParser;
pub use shape_id::{prelude, ShapeId, PRELUDE_NAMESPACE};
pub use traits::{names as trait_names, Bounds, ErrorKind, TimestampFormat, Traits};
pub use types::*;
