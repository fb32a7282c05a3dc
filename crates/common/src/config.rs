//! Codegen configuration loading from YAML files
//!
//! Namespace routing, import modules and output directories are read from an
//! optional YAML file instead of being hardcoded. Every field has a default,
//! so an empty document is a valid configuration.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root structure of a codegen configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Namespace that receives the dedicated primary file-group
    pub primary_namespace: String,
    /// Non-primary namespaces whose timestamps default to `date-time`
    pub date_time_namespaces: Vec<String>,
    /// Shape identifier prefixes dropped by the model loader
    pub ignored_shape_prefixes: Vec<String>,
    /// Modules referenced by generated imports
    pub imports: ImportModules,
    /// Output locations
    pub output: OutputConfig,
    /// Header comment placed at the top of every generated file
    pub header: String,
}

/// Modules referenced by generated import statements
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportModules {
    /// Module providing the schema DSL binding `z`
    pub zod: String,
    /// Shared runtime library (timestamp validators, `AwsError`)
    pub runtime: String,
}

/// Output directories for the primary and shared file-groups
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `{sub}.ts` files of the primary namespace
    pub primary_dir: PathBuf,
    /// Directory receiving `{namespace}.{sub}.ts` files of other namespaces
    pub shared_dir: PathBuf,
    /// Module prefix used when a primary file imports a shared file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_import_prefix: Option<String>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            primary_namespace: "com.amazonaws.s3".to_string(),
            date_time_namespaces: vec!["com.amazonaws.shared".to_string()],
            ignored_shape_prefixes: vec!["smithy.test#".to_string(), "smithy.waiters#".to_string()],
            imports: ImportModules::default(),
            output: OutputConfig::default(),
            header: "// Auto-generated by smithy-zod-gen. Do not edit.".to_string(),
        }
    }
}

impl Default for ImportModules {
    fn default() -> Self {
        Self {
            zod: "zod/v4".to_string(),
            runtime: "aws-api-shared".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            primary_dir: PathBuf::from("packages/s3/src/generated"),
            shared_dir: PathBuf::from("packages/aws-api-shared/src/generated"),
            shared_import_prefix: None,
        }
    }
}

impl CodegenConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Whether timestamps in `namespace` default to the `date-time` format
    pub fn defaults_to_date_time(&self, namespace: &str) -> bool {
        namespace == self.primary_namespace
            || self.date_time_namespaces.iter().any(|ns| ns == namespace)
    }
}
