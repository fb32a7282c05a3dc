//! Absolute shape identifiers (`namespace#name`)

use smithy_zod_gen_common::{GeneratorError, Result};
use std::fmt;

/// Namespace of the Smithy prelude
pub const PRELUDE_NAMESPACE: &str = "smithy.api";

/// Prelude shapes that resolve without being defined in the model
pub mod prelude {
    pub const STRING: &str = "smithy.api#String";
    pub const BOOLEAN: &str = "smithy.api#Boolean";
    pub const INTEGER: &str = "smithy.api#Integer";
    pub const LONG: &str = "smithy.api#Long";
    pub const BLOB: &str = "smithy.api#Blob";
    pub const TIMESTAMP: &str = "smithy.api#Timestamp";
    pub const DOCUMENT: &str = "smithy.api#Document";
    pub const UNIT: &str = "smithy.api#Unit";
}

/// A shape identifier split into namespace and local name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
}

impl<'a> ShapeId<'a> {
    /// Split `id` on its first `#`
    pub fn parse(id: &'a str) -> Result<Self> {
        id.split_once('#')
            .map(|(namespace, name)| ShapeId { namespace, name })
            .ok_or_else(|| GeneratorError::MalformedIdentifier { id: id.to_string() })
    }

    pub fn is_prelude(&self) -> bool {
        self.namespace == PRELUDE_NAMESPACE
    }
}

impl fmt::Display for ShapeId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)
    }
}
