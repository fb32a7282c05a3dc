//! Smithy JSON AST type definitions
//!
//! These types represent the structure of Smithy JSON files. Shapes and
//! members keep their document order.

use super::traits::Traits;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root Smithy model document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmithyModel {
    /// Smithy version (e.g., "2.0")
    pub smithy: String,

    /// Shape definitions keyed by absolute shape identifier
    #[serde(default)]
    pub shapes: IndexMap<String, Shape>,

    /// Metadata about the model
    #[serde(default)]
    pub metadata: IndexMap<String, serde_json::Value>,
}

/// A Smithy shape, tagged by its `type` field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Byte sequence
    Blob {
        #[serde(default)]
        traits: Traits,
    },

    /// Boolean type
    Boolean {
        #[serde(default)]
        traits: Traits,
    },

    /// Untyped JSON-like document
    Document {
        #[serde(default)]
        traits: Traits,
    },

    /// Closed set of string values
    Enum {
        /// Enum members; `enumValue` traits carry the wire values
        #[serde(default)]
        members: IndexMap<String, Member>,

        #[serde(default)]
        traits: Traits,
    },

    /// Integer type
    Integer {
        #[serde(default)]
        traits: Traits,
    },

    /// List type
    List {
        /// Member type
        member: Member,

        #[serde(default)]
        traits: Traits,
    },

    /// Long type
    Long {
        #[serde(default)]
        traits: Traits,
    },

    /// Map type
    Map {
        /// Key type
        key: Member,

        /// Value type
        value: Member,

        #[serde(default)]
        traits: Traits,
    },

    /// String type
    String {
        #[serde(default)]
        traits: Traits,
    },

    /// Structure definition (input/output/error types)
    Structure {
        /// Member fields
        #[serde(default)]
        members: IndexMap<String, Member>,

        #[serde(default)]
        traits: Traits,
    },

    /// Timestamp type
    Timestamp {
        #[serde(default)]
        traits: Traits,
    },

    /// Tagged union
    Union {
        /// Alternatives
        #[serde(default)]
        members: IndexMap<String, Member>,

        #[serde(default)]
        traits: Traits,
    },

    /// Operation definition
    Operation {
        /// Input shape; absent means `smithy.api#Unit`
        #[serde(default)]
        input: Option<ShapeReference>,

        /// Output shape; absent means `smithy.api#Unit`
        #[serde(default)]
        output: Option<ShapeReference>,

        /// Error shapes
        #[serde(default)]
        errors: Vec<ShapeReference>,

        #[serde(default)]
        traits: Traits,
    },

    /// Service definition
    Service {
        /// API version
        #[serde(default)]
        version: Option<String>,

        /// Operations exposed by this service
        #[serde(default)]
        operations: Vec<ShapeReference>,

        /// Resources managed by this service
        #[serde(default)]
        resources: Vec<ShapeReference>,

        #[serde(default)]
        traits: Traits,
    },

    /// Fallback for other shape types (resource, double, bigDecimal, ...)
    #[serde(other)]
    Other,
}

/// Reference to another shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeReference {
    /// Target shape ID (e.g., "com.amazonaws.s3#Bucket")
    pub target: String,
}

/// Member definition of a structure, union, enum, list or map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Target shape for this member
    pub target: String,

    #[serde(default)]
    pub traits: Traits,
}

/// Shape kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Blob,
    Boolean,
    Document,
    Enum,
    Integer,
    List,
    Long,
    Map,
    String,
    Structure,
    Timestamp,
    Union,
    Operation,
    Service,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Blob => "blob",
            ShapeKind::Boolean => "boolean",
            ShapeKind::Document => "document",
            ShapeKind::Enum => "enum",
            ShapeKind::Integer => "integer",
            ShapeKind::List => "list",
            ShapeKind::Long => "long",
            ShapeKind::Map => "map",
            ShapeKind::String => "string",
            ShapeKind::Structure => "structure",
            ShapeKind::Timestamp => "timestamp",
            ShapeKind::Union => "union",
            ShapeKind::Operation => "operation",
            ShapeKind::Service => "service",
        }
    }

    /// Whether shapes of this kind get a registered schema symbol
    pub fn is_schema_bearing(&self) -> bool {
        !matches!(self, ShapeKind::Operation | ShapeKind::Service)
    }

    /// Whether a value of this kind can key a record
    pub fn is_string_compatible(&self) -> bool {
        matches!(self, ShapeKind::String | ShapeKind::Enum)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Shape {
    /// Kind of this shape; `None` for unsupported shape types
    pub fn kind(&self) -> Option<ShapeKind> {
        let kind = match self {
            Shape::Blob { .. } => ShapeKind::Blob,
            Shape::Boolean { .. } => ShapeKind::Boolean,
            Shape::Document { .. } => ShapeKind::Document,
            Shape::Enum { .. } => ShapeKind::Enum,
            Shape::Integer { .. } => ShapeKind::Integer,
            Shape::List { .. } => ShapeKind::List,
            Shape::Long { .. } => ShapeKind::Long,
            Shape::Map { .. } => ShapeKind::Map,
            Shape::String { .. } => ShapeKind::String,
            Shape::Structure { .. } => ShapeKind::Structure,
            Shape::Timestamp { .. } => ShapeKind::Timestamp,
            Shape::Union { .. } => ShapeKind::Union,
            Shape::Operation { .. } => ShapeKind::Operation,
            Shape::Service { .. } => ShapeKind::Service,
            Shape::Other => return None,
        };
        Some(kind)
    }

    /// Shape-level traits; `None` for unsupported shape types
    pub fn traits(&self) -> Option<&Traits> {
        match self {
            Shape::Blob { traits }
            | Shape::Boolean { traits }
            | Shape::Document { traits }
            | Shape::Enum { traits, .. }
            | Shape::Integer { traits }
            | Shape::List { traits, .. }
            | Shape::Long { traits }
            | Shape::Map { traits, .. }
            | Shape::String { traits }
            | Shape::Structure { traits, .. }
            | Shape::Timestamp { traits }
            | Shape::Union { traits, .. }
            | Shape::Operation { traits, .. }
            | Shape::Service { traits, .. } => Some(traits),
            Shape::Other => None,
        }
    }

    /// Whether this is a structure carrying the `error` trait
    pub fn is_error_structure(&self) -> bool {
        matches!(self, Shape::Structure { traits, .. } if traits.error.is_some())
    }
}

impl SmithyModel {
    /// Find the service shapes in the model
    pub fn services(&self) -> impl Iterator<Item = (&String, &Shape)> {
        self.shapes
            .iter()
            .filter(|(_, shape)| matches!(shape, Shape::Service { .. }))
    }

    /// Get a shape by its ID
    pub fn get_shape(&self, shape_id: &str) -> Option<&Shape> {
        self.shapes.get(shape_id)
    }

    /// Kind of the shape with the given ID, if present and supported
    pub fn shape_kind(&self, shape_id: &str) -> Option<ShapeKind> {
        self.get_shape(shape_id).and_then(Shape::kind)
    }
}
