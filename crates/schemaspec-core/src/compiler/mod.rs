//! Schema compiler: turns named field descriptors into a [`RecordType`]
//!
//! Every descriptor is checked and lowered into a [`rules::FieldRule`] when the
//! record type is built, so broken schemas fail here rather than on first use.
//!
//! ```rust
//! use schemaspec_core::{FieldDescriptor, RecordType};
//! use serde_json::json;
//!
//! let pet = RecordType::builder("Pet")
//!     .field("name", FieldDescriptor::string().with_min_length(3).with_max_length(100))
//!     .field("age", FieldDescriptor::integer().with_min_value(0).with_max_value(30))
//!     .build()
//!     .unwrap();
//!
//! let buddy = pet.parse_text(r#"{"name": "Buddy", "age": 5}"#).unwrap();
//! assert_eq!(buddy.to_mapping()["age"], json!(5));
//! ```
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

pub(crate) mod rules;

use crate::descriptor::{FieldDescriptor, ItemDescriptor};
use crate::record::{CompiledField, RecordType};
use crate::validation::{CompileConfig, SchemaDefinitionError, ValidationContext, Violations};
use crate::value::FieldValue;
use indexmap::IndexMap;
use rules::{FieldRule, ItemRule};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Compile an ordered set of field descriptors with the default configuration
pub fn compile<N, I, K, D>(name: N, fields: I) -> Result<RecordType, SchemaDefinitionError>
where
    N: Into<String>,
    I: IntoIterator<Item = (K, D)>,
    K: Into<String>,
    D: Into<FieldDescriptor>,
{
    fields
        .into_iter()
        .fold(RecordType::builder(name), |builder, (field, descriptor)| {
            builder.field(field, descriptor)
        })
        .build()
}

/// Registration-and-build front end of the compiler
#[derive(Debug, Clone)]
pub struct RecordTypeBuilder {
    name: String,
    fields: Vec<(String, FieldDescriptor)>,
    config: CompileConfig,
}

impl RecordTypeBuilder {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
            config: CompileConfig::default(),
        }
    }

    /// Declare a field; declaration order is kept for serialization
    pub fn field<K, D>(mut self, name: K, descriptor: D) -> Self
    where
        K: Into<String>,
        D: Into<FieldDescriptor>,
    {
        self.fields.push((name.into(), descriptor.into()));
        self
    }

    pub fn with_config(mut self, config: CompileConfig) -> Self {
        self.config = config;
        self
    }

    /// Check every descriptor and compile the record type
    pub fn build(self) -> Result<RecordType, SchemaDefinitionError> {
        let RecordTypeBuilder {
            name,
            fields,
            config,
        } = self;

        if name.trim().is_empty() {
            return Err(SchemaDefinitionError::record(
                name,
                "record name cannot be empty",
            ));
        }

        let mut compiled = IndexMap::with_capacity(fields.len());
        for (field, descriptor) in fields {
            if field.is_empty() {
                return Err(SchemaDefinitionError::record(
                    &name,
                    "field name cannot be empty",
                ));
            }
            if compiled.contains_key(&field) {
                return Err(SchemaDefinitionError::field(
                    &name,
                    &field,
                    "field is declared more than once",
                ));
            }

            let rule = compile_rule(&name, &field, &descriptor)?;
            let default = compile_default(&name, &field, &descriptor, &rule)?;
            compiled.insert(
                field.clone(),
                CompiledField {
                    name: field,
                    descriptor,
                    rule,
                    default,
                },
            );
        }

        debug!(
            record = %name,
            fields = compiled.len(),
            unknown_fields = ?config.unknown_fields,
            "compiled record type"
        );
        Ok(RecordType::from_parts(name, compiled, config))
    }
}

fn compile_rule(
    record: &str,
    field: &str,
    descriptor: &FieldDescriptor,
) -> Result<FieldRule, SchemaDefinitionError> {
    match descriptor {
        FieldDescriptor::Text(text) => {
            if let (Some(min), Some(max)) = (text.min_length(), text.max_length()) {
                if min > max {
                    return Err(SchemaDefinitionError::field(
                        record,
                        field,
                        format!("min_length {} exceeds max_length {}", min, max),
                    ));
                }
            }
            Ok(FieldRule::Text {
                min_length: text.min_length(),
                max_length: text.max_length(),
            })
        }
        FieldDescriptor::Number(number) => {
            if let (Some(min), Some(max)) = (number.min_value(), number.max_value()) {
                if min > max {
                    return Err(SchemaDefinitionError::field(
                        record,
                        field,
                        format!("min_value {} exceeds max_value {}", min, max),
                    ));
                }
            }
            Ok(FieldRule::Integer {
                min_value: number.min_value(),
                max_value: number.max_value(),
            })
        }
        FieldDescriptor::Enumeration(enumeration) => {
            let values = enumeration.values();
            if values.is_empty() {
                return Err(SchemaDefinitionError::field(
                    record,
                    field,
                    "enumeration must allow at least one value",
                ));
            }
            let mut seen = HashSet::with_capacity(values.len());
            for value in values {
                if !seen.insert(value.as_str()) {
                    return Err(SchemaDefinitionError::field(
                        record,
                        field,
                        format!("enumeration value '{}' is listed more than once", value),
                    ));
                }
            }
            Ok(FieldRule::Enumeration {
                allowed: Arc::from(values.to_vec()),
            })
        }
        FieldDescriptor::Collection(list) => {
            let items = match list.items() {
                ItemDescriptor::Record(nested) => ItemRule::Record(nested.clone()),
                ItemDescriptor::Field(item) => {
                    ItemRule::Scalar(compile_rule(record, &format!("{}[]", field), item)?)
                }
            };
            Ok(FieldRule::List {
                items: Box::new(items),
            })
        }
    }
}

fn compile_default(
    record: &str,
    field: &str,
    descriptor: &FieldDescriptor,
    rule: &FieldRule,
) -> Result<Option<FieldValue>, SchemaDefinitionError> {
    let raw = match descriptor {
        FieldDescriptor::Number(number) => match number.default_value() {
            Some(default) => Value::from(default),
            None => return Ok(None),
        },
        FieldDescriptor::Collection(list) => Value::Array(list.default_value().to_vec()),
        FieldDescriptor::Text(_) | FieldDescriptor::Enumeration(_) => return Ok(None),
    };

    let mut out = Violations::new(&CompileConfig::strict());
    let ctx = ValidationContext::new().child(field);
    match rule.apply(&raw, &ctx, &mut out) {
        Some(value) => Ok(Some(value)),
        None => {
            let reasons = out
                .into_vec()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Err(SchemaDefinitionError::field(
                record,
                field,
                format!("default value is invalid: {}", reasons),
            ))
        }
    }
}
