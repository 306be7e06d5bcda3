//! Field descriptors: the declarative building blocks of a record type
//!
//! Descriptors only carry the constraint parameters; the compiler copies them
//! into validation rules, so a descriptor can be dropped or reused once the
//! record type is built.
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::record::RecordType;
use serde_json::Value;

/// Description of a single record field
#[derive(Debug, Clone)]
pub enum FieldDescriptor {
    Text(TextField),
    Number(NumberField),
    Enumeration(EnumField),
    Collection(ListField),
}

impl FieldDescriptor {
    /// Start a text descriptor
    pub fn string() -> TextField {
        TextField::default()
    }

    /// Start an integer descriptor
    pub fn integer() -> NumberField {
        NumberField::default()
    }

    /// Start an enumeration descriptor over a closed set of values
    pub fn enumeration<I, S>(values: I) -> EnumField
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumField::new(values)
    }

    /// Start a collection descriptor
    pub fn array<T: Into<ItemDescriptor>>(items: T) -> ListField {
        ListField::new(items)
    }

    /// Human-readable description, if any
    pub fn description(&self) -> Option<&str> {
        match self {
            FieldDescriptor::Text(f) => f.description(),
            FieldDescriptor::Number(f) => f.description(),
            FieldDescriptor::Enumeration(f) => f.description(),
            FieldDescriptor::Collection(f) => f.description(),
        }
    }

    /// Short name of the underlying value type
    pub fn kind(&self) -> &'static str {
        match self {
            FieldDescriptor::Text(_) => "string",
            FieldDescriptor::Number(_) => "integer",
            FieldDescriptor::Enumeration(_) => "enum",
            FieldDescriptor::Collection(_) => "array",
        }
    }
}

/// Text field with optional length bounds, counted in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    min_length: Option<usize>,
    max_length: Option<usize>,
    description: Option<String>,
}

impl TextField {
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Integer field with optional inclusive bounds and default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberField {
    min_value: Option<i64>,
    max_value: Option<i64>,
    description: Option<String>,
    default: Option<i64>,
}

impl NumberField {
    pub fn with_min_value(mut self, min_value: i64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max_value(mut self, max_value: i64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: i64) -> Self {
        self.default = Some(default);
        self
    }

    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<i64> {
        self.default
    }
}

/// String field restricted to a closed, ordered set of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumField {
    values: Vec<String>,
    description: Option<String>,
}

impl EnumField {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// What the elements of a collection must be
#[derive(Debug, Clone)]
pub enum ItemDescriptor {
    /// Each element is checked against a single field descriptor
    Field(Box<FieldDescriptor>),
    /// Each element is constructed as a nested record
    Record(RecordType),
}

/// Collection field; defaults to an empty sequence
#[derive(Debug, Clone)]
pub struct ListField {
    items: ItemDescriptor,
    description: Option<String>,
    default: Vec<Value>,
}

impl ListField {
    pub fn new<T: Into<ItemDescriptor>>(items: T) -> Self {
        Self {
            items: items.into(),
            description: None,
            default: Vec::new(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the empty default with the given raw elements; they are
    /// validated when the record type is compiled
    pub fn with_default<I: IntoIterator<Item = Value>>(mut self, default: I) -> Self {
        self.default = default.into_iter().collect();
        self
    }

    pub fn items(&self) -> &ItemDescriptor {
        &self.items
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> &[Value] {
        &self.default
    }
}

impl From<TextField> for FieldDescriptor {
    fn from(field: TextField) -> Self {
        FieldDescriptor::Text(field)
    }
}

impl From<NumberField> for FieldDescriptor {
    fn from(field: NumberField) -> Self {
        FieldDescriptor::Number(field)
    }
}

impl From<EnumField> for FieldDescriptor {
    fn from(field: EnumField) -> Self {
        FieldDescriptor::Enumeration(field)
    }
}

impl From<ListField> for FieldDescriptor {
    fn from(field: ListField) -> Self {
        FieldDescriptor::Collection(field)
    }
}

impl From<FieldDescriptor> for ItemDescriptor {
    fn from(field: FieldDescriptor) -> Self {
        ItemDescriptor::Field(Box::new(field))
    }
}

impl From<TextField> for ItemDescriptor {
    fn from(field: TextField) -> Self {
        FieldDescriptor::from(field).into()
    }
}

impl From<NumberField> for ItemDescriptor {
    fn from(field: NumberField) -> Self {
        FieldDescriptor::from(field).into()
    }
}

impl From<EnumField> for ItemDescriptor {
    fn from(field: EnumField) -> Self {
        FieldDescriptor::from(field).into()
    }
}

impl From<ListField> for ItemDescriptor {
    fn from(field: ListField) -> Self {
        FieldDescriptor::from(field).into()
    }
}

impl From<RecordType> for ItemDescriptor {
    fn from(record: RecordType) -> Self {
        ItemDescriptor::Record(record)
    }
}

impl From<&RecordType> for ItemDescriptor {
    fn from(record: &RecordType) -> Self {
        ItemDescriptor::Record(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_builder() {
        let field = FieldDescriptor::string()
            .with_min_length(3)
            .with_max_length(100)
            .with_description("Pet's name");
        assert_eq!(field.min_length(), Some(3));
        assert_eq!(field.max_length(), Some(100));
        assert_eq!(field.description(), Some("Pet's name"));
    }

    #[test]
    fn test_descriptor_kind() {
        let tags: FieldDescriptor = FieldDescriptor::array(FieldDescriptor::string()).into();
        assert_eq!(tags.kind(), "array");
        assert!(tags.description().is_none());

        let species: FieldDescriptor = FieldDescriptor::enumeration(["dog", "cat"]).into();
        assert_eq!(species.kind(), "enum");
    }

    #[test]
    fn test_list_default_is_empty() {
        let field = FieldDescriptor::array(FieldDescriptor::integer());
        assert!(field.default_value().is_empty());
        assert!(matches!(field.items(), ItemDescriptor::Field(_)));
    }
}
