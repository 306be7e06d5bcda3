//! Loads schema documents and compiles every schema they declare
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::FieldDescriptor;
use crate::loader::document::{FieldSpec, ItemSpec, SchemaDefinition, SchemaDocument};
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::{Format, SchemaParser};
use crate::record::RecordType;
use crate::validation::CompileConfig;
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

/// Configuration for schema loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Configuration handed to every compiled record type
    pub compile: CompileConfig,
    /// Maximum depth of schema-to-schema references
    pub max_resolution_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            compile: CompileConfig::default(),
            max_resolution_depth: 10,
        }
    }
}

/// Compiled record types of one document, in declaration order
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    records: IndexMap<String, RecordType>,
}

impl SchemaSet {
    pub fn get(&self, name: &str) -> Option<&RecordType> {
        self.records.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordType)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, RecordType> {
        self.records
    }
}

/// Reads YAML or JSON schema documents and compiles them
#[derive(Debug, Default)]
pub struct SchemaLoader {
    config: LoaderConfig,
    parser: SchemaParser,
}

impl SchemaLoader {
    /// Create a new schema loader with default configuration
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a new schema loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: SchemaParser::new(),
        }
    }

    /// Load and compile a document file
    pub fn load_file(&self, path: &Path) -> LoaderResult<SchemaSet> {
        let document: SchemaDocument = self.parser.parse_file(path)?;
        self.compile_document(&document)
    }

    /// Load and compile document text in the given format
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<SchemaSet> {
        let document: SchemaDocument =
            self.parser.parse_content(content, format, Path::new("<inline>"))?;
        self.compile_document(&document)
    }

    /// Resolve references and compile every schema of a parsed document
    pub fn compile_document(&self, document: &SchemaDocument) -> LoaderResult<SchemaSet> {
        let mut compiled = IndexMap::with_capacity(document.schemas.len());
        let mut stack = Vec::new();
        for name in document.schemas.keys() {
            self.resolve(name, document, &mut compiled, &mut stack)?;
        }

        // Dependencies compile first; hand the set back in document order.
        let records = document
            .schemas
            .keys()
            .filter_map(|name| compiled.get(name).map(|record| (name.clone(), record.clone())))
            .collect::<IndexMap<_, _>>();
        debug!(schemas = records.len(), "loaded schema document");
        Ok(SchemaSet { records })
    }

    fn resolve(
        &self,
        name: &str,
        document: &SchemaDocument,
        compiled: &mut IndexMap<String, RecordType>,
        stack: &mut Vec<String>,
    ) -> LoaderResult<RecordType> {
        if let Some(record) = compiled.get(name) {
            return Ok(record.clone());
        }
        if stack.iter().any(|entry| entry == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            return Err(LoaderError::circular_reference(&chain));
        }
        if stack.len() >= self.config.max_resolution_depth {
            return Err(LoaderError::DepthExceeded {
                schema: name.to_string(),
                max_depth: self.config.max_resolution_depth,
            });
        }

        let definition = document.schemas.get(name).ok_or_else(|| LoaderError::UnknownReference {
            reference: name.to_string(),
            schema: stack.last().cloned().unwrap_or_default(),
        })?;

        stack.push(name.to_string());
        let record = self.compile_definition(name, definition, document, compiled, stack);
        stack.pop();

        let record = record?;
        compiled.insert(name.to_string(), record.clone());
        Ok(record)
    }

    fn compile_definition(
        &self,
        name: &str,
        definition: &SchemaDefinition,
        document: &SchemaDocument,
        compiled: &mut IndexMap<String, RecordType>,
        stack: &mut Vec<String>,
    ) -> LoaderResult<RecordType> {
        let mut config = self.config.compile.clone();
        if let Some(policy) = definition.unknown_fields {
            config.unknown_fields = policy;
        }

        let mut builder = RecordType::builder(name).with_config(config);
        for (field, spec) in &definition.fields {
            let descriptor = self.lower_field(spec, document, compiled, stack)?;
            builder = builder.field(field.clone(), descriptor);
        }
        Ok(builder.build()?)
    }

    fn lower_field(
        &self,
        spec: &FieldSpec,
        document: &SchemaDocument,
        compiled: &mut IndexMap<String, RecordType>,
        stack: &mut Vec<String>,
    ) -> LoaderResult<FieldDescriptor> {
        spec.lower(|items| match items {
            ItemSpec::Schema { schema } => {
                Ok(self.resolve(schema, document, compiled, stack)?.into())
            }
            ItemSpec::Field(item) => {
                Ok(self.lower_field(item, document, compiled, stack)?.into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_references_resolve_in_any_order() {
        let yaml = r#"
schemas:
  ListPetsResponse:
    fields:
      items: { type: array, items: { schema: Pet } }
      total: { type: integer }
  Pet:
    fields:
      name: { type: string, min_length: 3 }
"#;
        let set = SchemaLoader::new().load_str(yaml, Format::Yaml).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["ListPetsResponse", "Pet"]);

        let response = set.get("ListPetsResponse").unwrap();
        let ok = response.construct_value(&json!({"items": [{"name": "Rex"}], "total": 1}));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_circular_reference_is_detected() {
        let json = r#"{"schemas": {
            "A": {"fields": {"b": {"type": "array", "items": {"schema": "B"}}}},
            "B": {"fields": {"a": {"type": "array", "items": {"schema": "A"}}}}
        }}"#;
        let err = SchemaLoader::new().load_str(json, Format::Json).unwrap_err();
        match err {
            LoaderError::CircularReference { chain } => assert_eq!(chain, "A -> B -> A"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_reference() {
        let json = r#"{"schemas": {"A": {"fields": {
            "b": {"type": "array", "items": {"schema": "Missing"}}
        }}}}"#;
        let err = SchemaLoader::new().load_str(json, Format::Json).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::UnknownReference { ref reference, ref schema }
                if reference == "Missing" && schema == "A"
        ));
    }

    #[test]
    fn test_depth_limit() {
        let json = r#"{"schemas": {
            "A": {"fields": {"b": {"type": "array", "items": {"schema": "B"}}}},
            "B": {"fields": {"c": {"type": "array", "items": {"schema": "C"}}}},
            "C": {"fields": {"x": {"type": "integer"}}}
        }}"#;
        let loader = SchemaLoader::with_config(LoaderConfig {
            max_resolution_depth: 2,
            ..LoaderConfig::default()
        });
        let err = loader.load_str(json, Format::Json).unwrap_err();
        assert!(matches!(err, LoaderError::DepthExceeded { max_depth: 2, .. }));
    }

    #[test]
    fn test_per_schema_unknown_field_policy() {
        let yaml = r#"
schemas:
  Loose:
    unknown_fields: ignore
    fields:
      name: { type: string }
"#;
        let set = SchemaLoader::new().load_str(yaml, Format::Yaml).unwrap();
        let loose = set.get("Loose").unwrap();
        let instance = loose
            .construct_value(&json!({"name": "x", "extra": true}))
            .unwrap();
        assert_eq!(instance.to_text(), r#"{"name":"x"}"#);
    }

    #[test]
    fn test_definition_errors_surface() {
        let yaml = r#"
schemas:
  Bad:
    fields:
      kind: { type: enum, values: [] }
"#;
        let err = SchemaLoader::new().load_str(yaml, Format::Yaml).unwrap_err();
        assert!(matches!(err, LoaderError::SchemaDefinition(_)));
    }
}
