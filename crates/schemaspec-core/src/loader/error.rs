//! Error types for schema document loading
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::validation::SchemaDefinitionError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading, resolving or compiling a schema document
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read schema document '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed YAML in '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Malformed JSON in '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot tell the format of '{path}' (use .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Well-formed text that does not follow the document layout
    #[error("Invalid schema document '{path}': {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// A collection refers to a schema the document does not define
    #[error("Schema '{schema}' references unknown schema '{reference}'")]
    UnknownReference { reference: String, schema: String },

    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// Nesting deeper than the configured limit
    #[error("Schema '{schema}' exceeds the maximum nesting depth of {max_depth}")]
    DepthExceeded { schema: String, max_depth: usize },

    /// A resolved schema failed its definition-time checks
    #[error(transparent)]
    SchemaDefinition(#[from] SchemaDefinitionError),
}

impl LoaderError {
    /// Circular reference error for a resolution chain such as `A -> B -> A`
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// The document path, for errors raised before resolution starts
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::InvalidDocument { path, .. } => Some(path),
            _ => None,
        }
    }
}
