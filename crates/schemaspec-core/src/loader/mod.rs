//! Schema documents: the declarative schema language as YAML or JSON files
//!
//! A document lists named schemas; collection items may refer to other
//! schemas of the same document by name, in any declaration order.
//!
//! # Example Usage
//!
//! ```rust
//! use schemaspec_core::loader::{Format, SchemaLoader};
//!
//! let yaml = r#"
//! schemas:
//!   Pet:
//!     fields:
//!       name: { type: string, min_length: 3, max_length: 100 }
//!       species: { type: enum, values: [dog, cat, bird] }
//! "#;
//! let schemas = SchemaLoader::new().load_str(yaml, Format::Yaml)?;
//! let pet = schemas.get("Pet").unwrap();
//! assert!(pet.parse_text(r#"{"name": "Luna", "species": "bird"}"#).is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod error;
pub mod parser;
pub mod schema_loader;

pub use document::{FieldSpec, ItemSpec, SchemaDefinition, SchemaDocument};
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use schema_loader::{LoaderConfig, SchemaLoader, SchemaSet};
