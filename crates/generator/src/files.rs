//! Output file keys
//!
//! Every emitted fragment belongs to exactly one file, identified by its
//! file-group (primary API namespace or a shared namespace) and sub-file.

use serde::Serialize;
use std::fmt;

/// File-group a shape is routed to by namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FileGroup {
    /// The primary API namespace
    Primary,
    /// Any other namespace, keyed by namespace
    Shared(String),
}

/// Sub-file within a file-group, selected by shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SubFile {
    Service,
    Enums,
    Structures,
    Errors,
    Schema,
}

impl SubFile {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubFile::Service => "service",
            SubFile::Enums => "enums",
            SubFile::Structures => "structures",
            SubFile::Errors => "errors",
            SubFile::Schema => "schema",
        }
    }
}

/// Identifies one generated file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileKey {
    pub group: FileGroup,
    pub sub: SubFile,
}

impl FileKey {
    pub fn primary(sub: SubFile) -> Self {
        Self {
            group: FileGroup::Primary,
            sub,
        }
    }

    pub fn shared(namespace: impl Into<String>, sub: SubFile) -> Self {
        Self {
            group: FileGroup::Shared(namespace.into()),
            sub,
        }
    }

    /// File name without extension: `{sub}` or `{namespace}.{sub}`
    pub fn stem(&self) -> String {
        match &self.group {
            FileGroup::Primary => self.sub.as_str().to_string(),
            FileGroup::Shared(namespace) => format!("{}.{}", namespace, self.sub.as_str()),
        }
    }

    /// Module specifier used by a file in `from` to import from this file
    ///
    /// Files of the same directory import each other relatively. A primary
    /// file importing a shared file uses `shared_prefix` when one is set.
    pub fn import_path(&self, from: &FileKey, shared_prefix: Option<&str>) -> String {
        match (&from.group, &self.group, shared_prefix) {
            (FileGroup::Primary, FileGroup::Shared(_), Some(prefix)) => {
                format!("{}/{}.js", prefix.trim_end_matches('/'), self.stem())
            }
            _ => format!("./{}.js", self.stem()),
        }
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            FileGroup::Primary => write!(f, "primary:{}", self.sub.as_str()),
            FileGroup::Shared(namespace) => {
                write!(f, "shared:{}:{}", namespace, self.sub.as_str())
            }
        }
    }
}
