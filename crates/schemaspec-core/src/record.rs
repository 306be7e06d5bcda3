//! Compiled record types and the instances they construct
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::compiler::rules::FieldRule;
use crate::compiler::RecordTypeBuilder;
use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::validation::{
    CompileConfig, Constraint, ParseError, UnknownFieldPolicy, ValidationContext, ValidationError,
    ValidationResult, Violations,
};
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One field of a compiled record type
#[derive(Debug)]
pub(crate) struct CompiledField {
    pub(crate) name: String,
    pub(crate) descriptor: FieldDescriptor,
    pub(crate) rule: FieldRule,
    pub(crate) default: Option<FieldValue>,
}

#[derive(Debug)]
struct RecordTypeInner {
    name: String,
    fields: IndexMap<String, CompiledField>,
    config: CompileConfig,
}

/// A compiled, reusable record definition
///
/// Cloning is cheap and clones share the same read-only metadata, so a record
/// type can be handed to other threads and used concurrently.
#[derive(Clone)]
pub struct RecordType {
    inner: Arc<RecordTypeInner>,
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.inner.name)
            .field("fields", &self.inner.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RecordType {
    /// Start declaring a record type
    pub fn builder<N: Into<String>>(name: N) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name.into())
    }

    pub(crate) fn from_parts(
        name: String,
        fields: IndexMap<String, CompiledField>,
        config: CompileConfig,
    ) -> Self {
        Self {
            inner: Arc::new(RecordTypeInner {
                name,
                fields,
                config,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn config(&self) -> &CompileConfig {
        &self.inner.config
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.inner
            .fields
            .values()
            .map(|field| (field.name.as_str(), &field.descriptor))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.inner.fields.get(name).map(|field| &field.descriptor)
    }

    /// Names of fields that must be supplied at construction
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.inner
            .fields
            .values()
            .filter(|field| field.default.is_none())
            .map(|field| field.name.as_str())
    }

    /// Construct an instance from a string-keyed mapping
    pub fn construct(&self, data: &Map<String, Value>) -> ValidationResult<RecordInstance> {
        let mut out = Violations::new(&self.inner.config);
        match self.construct_fields(data, &ValidationContext::new(), &mut out) {
            Some(instance) => Ok(instance),
            None => {
                let violations = out.into_vec();
                trace!(
                    record = %self.inner.name,
                    violations = violations.len(),
                    "record construction rejected"
                );
                Err(ValidationError::new(self.inner.name.clone(), violations))
            }
        }
    }

    /// Construct an instance from any JSON value; non-objects are rejected
    pub fn construct_value(&self, data: &Value) -> ValidationResult<RecordInstance> {
        match data {
            Value::Object(map) => self.construct(map),
            other => {
                let ctx = ValidationContext::new();
                Err(ValidationError::new(
                    self.inner.name.clone(),
                    vec![ctx.violation(Constraint::WrongType, "an object", Some(other))],
                ))
            }
        }
    }

    /// Parse JSON text and construct an instance from it
    pub fn parse_text(&self, json_text: &str) -> Result<RecordInstance> {
        let value: Value = serde_json::from_str(json_text).map_err(ParseError::from)?;
        Ok(self.construct_value(&value)?)
    }

    /// Construct a nested instance, recording violations under `ctx`
    pub(crate) fn construct_at(
        &self,
        data: &Value,
        ctx: &ValidationContext,
        out: &mut Violations,
    ) -> Option<RecordInstance> {
        match data {
            Value::Object(map) => self.construct_fields(map, ctx, out),
            other => {
                out.push(ctx.violation(
                    Constraint::WrongType,
                    format!("an object matching {}", self.inner.name),
                    Some(other),
                ));
                None
            }
        }
    }

    fn construct_fields(
        &self,
        data: &Map<String, Value>,
        ctx: &ValidationContext,
        out: &mut Violations,
    ) -> Option<RecordInstance> {
        let mut values = IndexMap::with_capacity(self.inner.fields.len());
        let mut failed = false;

        for (name, field) in &self.inner.fields {
            if out.is_full() {
                return None;
            }
            let field_ctx = ctx.child(name);
            match data.get(name) {
                Some(raw) => match field.rule.apply(raw, &field_ctx, out) {
                    Some(value) => {
                        values.insert(name.clone(), value);
                    }
                    None => failed = true,
                },
                None => match &field.default {
                    Some(default) => {
                        values.insert(name.clone(), default.clone());
                    }
                    None => {
                        out.push(field_ctx.violation(Constraint::Required, "a value", None));
                        failed = true;
                    }
                },
            }
        }

        let unknown = data
            .iter()
            .filter(|(key, _)| !self.inner.fields.contains_key(key.as_str()));
        match self.inner.config.unknown_fields {
            UnknownFieldPolicy::Reject => {
                for (key, value) in unknown {
                    out.push(ctx.child(key).violation(
                        Constraint::UnknownField,
                        format!("no field named '{}' on {}", key, self.inner.name),
                        Some(value),
                    ));
                    failed = true;
                }
            }
            UnknownFieldPolicy::Ignore => {
                let dropped: Vec<&str> = unknown.map(|(key, _)| key.as_str()).collect();
                if !dropped.is_empty() {
                    debug!(record = %self.inner.name, ?dropped, "ignoring unknown fields");
                }
            }
        }

        if failed {
            None
        } else {
            Some(RecordInstance {
                record_type: self.clone(),
                values,
            })
        }
    }

    /// Whether two handles point at the same compiled type
    pub fn same_type(&self, other: &RecordType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// A value that satisfies every rule of its record type
#[derive(Clone)]
pub struct RecordInstance {
    record_type: RecordType,
    values: IndexMap<String, FieldValue>,
}

impl RecordInstance {
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_i64)
    }

    pub fn list(&self, field: &str) -> Option<&[FieldValue]> {
        self.get(field).and_then(FieldValue::as_list)
    }

    /// Field values in declaration order
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Take ownership of the field values
    pub fn into_values(self) -> IndexMap<String, FieldValue> {
        self.values
    }

    /// Canonical mapping form made of plain JSON values
    pub fn to_mapping(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }

    /// Consume the instance into its canonical mapping
    pub fn into_mapping(self) -> Map<String, Value> {
        self.to_mapping()
    }

    /// Canonical compact JSON text of [`RecordInstance::to_mapping`]
    pub fn to_text(&self) -> String {
        Value::Object(self.to_mapping()).to_string()
    }
}

impl PartialEq for RecordInstance {
    fn eq(&self, other: &Self) -> bool {
        self.record_type.name() == other.record_type.name() && self.values == other.values
    }
}

impl fmt::Debug for RecordInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(self.record_type.name());
        for (name, value) in &self.values {
            debug.field(name, value);
        }
        debug.finish()
    }
}

impl fmt::Display for RecordInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for RecordInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn pet() -> RecordType {
        RecordType::builder("Pet")
            .field("name", FieldDescriptor::string().with_min_length(3))
            .field("age", FieldDescriptor::integer().with_default(1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_construct_value_rejects_non_objects() {
        let err = pet().construct_value(&json!([1, 2])).unwrap_err();
        assert_eq!(err.violations[0].path, "$");
        assert_eq!(err.violations[0].constraint, Constraint::WrongType);
    }

    #[test]
    fn test_default_fills_missing_field() {
        let instance = pet().construct_value(&json!({"name": "Rex"})).unwrap();
        assert_eq!(instance.integer("age"), Some(1));
        assert_eq!(pet().required_fields().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_parse_text_distinguishes_parse_errors() {
        let err = pet().parse_text("{\"name\": ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = pet().parse_text("{\"name\": \"Bo\"}").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_serialize_matches_to_text() {
        let instance = pet().construct_value(&json!({"name": "Rex", "age": 4})).unwrap();
        assert_eq!(serde_json::to_string(&instance).unwrap(), instance.to_text());
        assert_eq!(instance.to_text(), r#"{"name":"Rex","age":4}"#);
    }

    #[test]
    fn test_clones_share_compiled_type() {
        let record = pet();
        let other = record.clone();
        assert!(record.same_type(&other));
        assert!(!record.same_type(&pet()));
    }
}
