//! Error types for the Schemaspec core library
//!
//! Callers of the record API only ever see three failure kinds: invalid input
//! data, malformed input text, and schemas that cannot be compiled.

use crate::validation::{ParseError, SchemaDefinitionError, ValidationError};
use thiserror::Error;

/// Main error type for Schemaspec operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input data violated one or more field constraints
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Input text was not valid JSON
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A schema failed its definition-time checks
    #[error(transparent)]
    SchemaDefinition(#[from] SchemaDefinitionError),
}

impl Error {
    /// The validation error, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
