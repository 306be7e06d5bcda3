//! Validation context and violation collection
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{Constraint, Violation};
use crate::validation::CompileConfig;
use serde_json::Value;

/// Tracks the path of the value currently being validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext {
    /// Create a context rooted at `$`
    pub fn new() -> Self {
        Self {
            path: "$".to_string(),
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }

    /// Build a violation located at this context's path
    pub fn violation<E: Into<String>>(
        &self,
        constraint: Constraint,
        expected: E,
        actual: Option<&Value>,
    ) -> Violation {
        Violation::new(self.path.clone(), constraint, expected, actual.cloned())
    }
}

/// Accumulates violations for one construction, honouring the error limits
/// from [`CompileConfig`]
#[derive(Debug)]
pub struct Violations {
    items: Vec<Violation>,
    fail_fast: bool,
    max_errors: usize,
}

impl Violations {
    pub fn new(config: &CompileConfig) -> Self {
        Self {
            items: Vec::new(),
            fail_fast: config.fail_fast,
            max_errors: config.max_errors,
        }
    }

    pub fn push(&mut self, violation: Violation) {
        if !self.is_full() {
            self.items.push(violation);
        }
    }

    /// True once no further violations will be recorded
    pub fn is_full(&self) -> bool {
        if self.fail_fast && !self.items.is_empty() {
            return true;
        }
        self.max_errors > 0 && self.items.len() >= self.max_errors
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.items
    }
}
