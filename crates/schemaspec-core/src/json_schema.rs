//! JSON Schema export for compiled record types
//!
//! The output follows draft 2020-12 keywords so external generators (docs,
//! stub generators) can consume record types without linking this crate.
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::{FieldDescriptor, ItemDescriptor};
use crate::record::RecordType;
use crate::validation::UnknownFieldPolicy;
use serde_json::{json, Map, Value};

impl RecordType {
    /// Describe this record type as a JSON Schema object
    ///
    /// Nested record types used as collection items are inlined.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for (name, descriptor) in self.fields() {
            properties.insert(name.to_string(), field_schema(descriptor));
        }
        let required: Vec<&str> = self.required_fields().collect();

        let mut schema = json!({
            "title": self.name(),
            "type": "object",
            "properties": properties,
            "required": required,
        });
        if self.config().unknown_fields == UnknownFieldPolicy::Reject {
            schema["additionalProperties"] = Value::Bool(false);
        }
        schema
    }
}

fn field_schema(descriptor: &FieldDescriptor) -> Value {
    let mut schema = Map::new();
    match descriptor {
        FieldDescriptor::Text(text) => {
            schema.insert("type".into(), json!("string"));
            if let Some(min) = text.min_length() {
                schema.insert("minLength".into(), json!(min));
            }
            if let Some(max) = text.max_length() {
                schema.insert("maxLength".into(), json!(max));
            }
        }
        FieldDescriptor::Number(number) => {
            schema.insert("type".into(), json!("integer"));
            // Open bounds still stop at the i64 range construction accepts.
            let min = number.min_value().unwrap_or(i64::MIN);
            let max = number.max_value().unwrap_or(i64::MAX);
            schema.insert("minimum".into(), json!(min));
            schema.insert("maximum".into(), json!(max));
            if let Some(default) = number.default_value() {
                schema.insert("default".into(), json!(default));
            }
        }
        FieldDescriptor::Enumeration(enumeration) => {
            schema.insert("type".into(), json!("string"));
            schema.insert("enum".into(), json!(enumeration.values()));
        }
        FieldDescriptor::Collection(list) => {
            schema.insert("type".into(), json!("array"));
            let items = match list.items() {
                ItemDescriptor::Record(record) => record.json_schema(),
                ItemDescriptor::Field(item) => field_schema(item),
            };
            schema.insert("items".into(), items);
            schema.insert("default".into(), Value::Array(list.default_value().to_vec()));
        }
    }
    if let Some(description) = descriptor.description() {
        schema.insert("description".into(), json!(description));
    }
    Value::Object(schema)
}
