//! Serde model of a schema document
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::descriptor::{FieldDescriptor, ItemDescriptor, ListField, NumberField, TextField};
use crate::loader::error::LoaderResult;
use crate::validation::UnknownFieldPolicy;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Top level of a schema document: named schemas in declaration order
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(deserialize_with = "unique_entries")]
    pub schemas: IndexMap<String, SchemaDefinition>,
}

/// One named schema
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    /// Overrides the loader's unknown-field policy for this schema
    #[serde(default)]
    pub unknown_fields: Option<UnknownFieldPolicy>,
    #[serde(deserialize_with = "unique_entries")]
    pub fields: IndexMap<String, FieldSpec>,
}

/// Deserialize a name-keyed map, failing on a repeated name instead of
/// letting the last entry win
fn unique_entries<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueEntries<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueEntries<V> {
        type Value = IndexMap<String, V>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map with unique names")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, value)) = access.next_entry::<String, V>()? {
                if entries.contains_key(&name) {
                    return Err(de::Error::custom(format_args!(
                        "'{}' is declared more than once",
                        name
                    )));
                }
                entries.insert(name, value);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(UniqueEntries(PhantomData))
}

/// A field as written in a document, tagged by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum FieldSpec {
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
        description: Option<String>,
    },
    Integer {
        min_value: Option<i64>,
        max_value: Option<i64>,
        description: Option<String>,
        default: Option<i64>,
    },
    Enum {
        values: Vec<String>,
        description: Option<String>,
    },
    Array {
        items: Box<ItemSpec>,
        description: Option<String>,
        #[serde(default)]
        default: Vec<Value>,
    },
}

/// Collection items: a reference to another schema or an inline field
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemSpec {
    Schema { schema: String },
    Field(FieldSpec),
}

impl FieldSpec {
    /// Lower the spec into a descriptor, resolving collection items through
    /// `resolve_items`
    pub(crate) fn lower<F>(&self, mut resolve_items: F) -> LoaderResult<FieldDescriptor>
    where
        F: FnMut(&ItemSpec) -> LoaderResult<ItemDescriptor>,
    {
        match self {
            FieldSpec::String {
                min_length,
                max_length,
                description,
            } => {
                let mut field = TextField::default();
                if let Some(min) = min_length {
                    field = field.with_min_length(*min);
                }
                if let Some(max) = max_length {
                    field = field.with_max_length(*max);
                }
                if let Some(description) = description {
                    field = field.with_description(description.clone());
                }
                Ok(field.into())
            }
            FieldSpec::Integer {
                min_value,
                max_value,
                description,
                default,
            } => {
                let mut field = NumberField::default();
                if let Some(min) = min_value {
                    field = field.with_min_value(*min);
                }
                if let Some(max) = max_value {
                    field = field.with_max_value(*max);
                }
                if let Some(description) = description {
                    field = field.with_description(description.clone());
                }
                if let Some(default) = default {
                    field = field.with_default(*default);
                }
                Ok(field.into())
            }
            FieldSpec::Enum {
                values,
                description,
            } => {
                let mut field = FieldDescriptor::enumeration(values.iter().cloned());
                if let Some(description) = description {
                    field = field.with_description(description.clone());
                }
                Ok(field.into())
            }
            FieldSpec::Array {
                items,
                description,
                default,
            } => {
                let mut list =
                    ListField::new(resolve_items(items)?).with_default(default.iter().cloned());
                if let Some(description) = description {
                    list = list.with_description(description.clone());
                }
                Ok(list.into())
            }
        }
    }
}
