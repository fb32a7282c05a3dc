//! Output file writing
//!
//! Rendered files are handed to an [`OutputSink`]. [`OutputLayout`] decides
//! where each file lives: primary files as `{primary_dir}/{sub}.ts`, shared
//! files as `{shared_dir}/{namespace}.{sub}.ts`.

use crate::files::{FileGroup, FileKey};
use smithy_zod_gen_common::{GeneratorError, OutputConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for rendered files
#[cfg_attr(test, mockall::automock)]
pub trait OutputSink {
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes files to disk, creating parent directories
#[derive(Debug, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Generation(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(path, contents).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// Maps file keys to output paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub primary_dir: PathBuf,
    pub shared_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(primary_dir: impl Into<PathBuf>, shared_dir: impl Into<PathBuf>) -> Self {
        Self {
            primary_dir: primary_dir.into(),
            shared_dir: shared_dir.into(),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(output.primary_dir.clone(), output.shared_dir.clone())
    }

    pub fn path_for(&self, file_key: &FileKey) -> Result<PathBuf> {
        let dir = match file_key.group {
            FileGroup::Primary => &self.primary_dir,
            FileGroup::Shared(_) => &self.shared_dir,
        };
        if dir.as_os_str().is_empty() {
            return Err(GeneratorError::MissingOutputPath {
                file_key: file_key.to_string(),
            });
        }
        Ok(dir.join(format!("{}.ts", file_key.stem())))
    }
}
