//! Validation error types for record construction
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The constraint a value failed to satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    EnumMembership,
    Required,
    WrongType,
    UnknownField,
}

impl Constraint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Constraint::MinLength => "min_length",
            Constraint::MaxLength => "max_length",
            Constraint::MinValue => "min_value",
            Constraint::MaxValue => "max_value",
            Constraint::EnumMembership => "enum_membership",
            Constraint::Required => "required",
            Constraint::WrongType => "wrong_type",
            Constraint::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single constraint violation with its location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the offending value, e.g. `$.items[0].name`
    pub path: String,
    /// The constraint that was violated
    pub constraint: Constraint,
    /// What was expected
    pub expected: String,
    /// The offending value, `None` when the value was absent
    pub actual: Option<Value>,
}

impl Violation {
    pub fn new<P, E>(path: P, constraint: Constraint, expected: E, actual: Option<Value>) -> Self
    where
        P: Into<String>,
        E: Into<String>,
    {
        Self {
            path: path.into(),
            constraint,
            expected: expected.into(),
            actual,
        }
    }

    /// Name of the innermost field the violation points at
    pub fn field(&self) -> &str {
        let tail = self.path.rsplit('.').next().unwrap_or(&self.path);
        tail.split('[').next().unwrap_or(tail)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "{}: rule '{}' violated: expected {}, but found {}",
                self.path, self.constraint, self.expected, actual
            ),
            None => write!(
                f,
                "{}: rule '{}' violated: expected {}, but the value is missing",
                self.path, self.constraint, self.expected
            ),
        }
    }
}

/// Aggregated failure of a record construction
///
/// Construction is all-or-nothing: when this error is returned no instance
/// exists, and every violation found up to the configured limit is listed.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the record type that rejected the input
    pub record: String,
    /// Every violation that was found
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error(s) for {}",
            self.violations.len(),
            self.record
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl ValidationError {
    pub fn new<R: Into<String>>(record: R, violations: Vec<Violation>) -> Self {
        Self {
            record: record.into(),
            violations,
        }
    }

    /// Find the first violation at the given path
    pub fn violation_at(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.path == path)
    }

    /// Check whether any violation of `constraint` was reported
    pub fn has(&self, constraint: Constraint) -> bool {
        self.violations.iter().any(|v| v.constraint == constraint)
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed input text, reported separately from constraint failures
#[derive(Debug, Error)]
#[error("Failed to parse JSON input at line {line}, column {column}: {source}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    #[source]
    pub source: serde_json::Error,
}

impl From<serde_json::Error> for ParseError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

/// A schema that cannot be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid schema definition for {record}{}: {reason}", field_suffix(.field))]
pub struct SchemaDefinitionError {
    pub record: String,
    pub field: Option<String>,
    pub reason: String,
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(field) => format!(".{}", field),
        None => String::new(),
    }
}

impl SchemaDefinitionError {
    pub fn record<R, M>(record: R, reason: M) -> Self
    where
        R: Into<String>,
        M: Into<String>,
    {
        Self {
            record: record.into(),
            field: None,
            reason: reason.into(),
        }
    }

    pub fn field<R, F, M>(record: R, field: F, reason: M) -> Self
    where
        R: Into<String>,
        F: Into<String>,
        M: Into<String>,
    {
        Self {
            record: record.into(),
            field: Some(field.into()),
            reason: reason.into(),
        }
    }
}
