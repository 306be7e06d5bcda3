//! Parsing of schema documents in YAML and JSON formats
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::path::Path;

/// Document text formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl Format {
    /// Pick the format from a file extension, ignoring case
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Decodes document text directly into a typed model
///
/// There is no intermediate value tree, so a key repeated in the text still
/// reaches the model's own deserializer.
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode a document file; the format comes from its extension
    pub fn parse_file<T: DeserializeOwned>(&self, path: &Path) -> LoaderResult<T> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| LoaderError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_content(&content, format, path)
    }

    /// Decode document text; `path` only labels errors
    pub fn parse_content<T: DeserializeOwned>(
        &self,
        content: &str,
        format: Format,
        path: &Path,
    ) -> LoaderResult<T> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Malformed YAML is a parse error; well-formed YAML of the wrong shape is
    /// an invalid document
    pub fn parse_yaml<T: DeserializeOwned>(&self, content: &str, path: &Path) -> LoaderResult<T> {
        serde_yaml::from_str::<serde_yaml::Value>(content).map_err(|source| {
            LoaderError::YamlParseError {
                path: path.to_path_buf(),
                source,
            }
        })?;
        serde_yaml::from_str(content).map_err(|e| LoaderError::InvalidDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Same split as [`SchemaParser::parse_yaml`], read from the error category
    pub fn parse_json<T: DeserializeOwned>(&self, content: &str, path: &Path) -> LoaderResult<T> {
        serde_json::from_str(content).map_err(|source| match source.classify() {
            Category::Data => LoaderError::InvalidDocument {
                path: path.to_path_buf(),
                reason: source.to_string(),
            },
            Category::Io | Category::Syntax | Category::Eof => LoaderError::JsonParseError {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}
