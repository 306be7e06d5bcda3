//! Schemaspec Core - declarative schemas compiled into validated record types
//!
//! Field descriptors (text, integer, enumeration, collection) are compiled
//! into a [`RecordType`]. A record type constructs [`RecordInstance`]s from
//! mappings or JSON text, enforcing every constraint, and serializes them back
//! to a canonical mapping or JSON text.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaspec_core::{FieldDescriptor, RecordType};
//! use serde_json::json;
//!
//! let pet = RecordType::builder("Pet")
//!     .field("name", FieldDescriptor::string().with_min_length(3).with_max_length(100))
//!     .field("age", FieldDescriptor::integer().with_min_value(0).with_max_value(30))
//!     .field("species", FieldDescriptor::enumeration(["dog", "cat", "bird"]))
//!     .field("tags", FieldDescriptor::array(FieldDescriptor::string().with_max_length(20)))
//!     .build()?;
//!
//! let buddy = pet.construct_value(&json!({
//!     "name": "Buddy", "age": 5, "species": "dog", "tags": ["friendly", "trained"]
//! }))?;
//! assert_eq!(buddy.text("species"), Some("dog"));
//!
//! let err = pet.construct_value(&json!({"name": "Bo", "age": 5, "species": "dog"})).unwrap_err();
//! assert_eq!(err.violations[0].path, "$.name");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Unknown fields
//!
//! Record types reject keys they do not declare unless compiled with
//! [`UnknownFieldPolicy::Ignore`], in which case those keys are dropped.
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

pub mod compiler;
pub mod descriptor;
pub mod error;
pub mod json_schema;
pub mod loader;
pub mod record;
pub mod validation;
pub mod value;

// Re-export commonly used types for convenience
pub use compiler::{compile, RecordTypeBuilder};
pub use descriptor::{
    EnumField, FieldDescriptor, ItemDescriptor, ListField, NumberField, TextField,
};
pub use error::{Error, Result};
pub use record::{RecordInstance, RecordType};
pub use validation::{
    CompileConfig, Constraint, ParseError, SchemaDefinitionError, UnknownFieldPolicy,
    ValidationError, ValidationResult, Violation,
};
pub use value::FieldValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
