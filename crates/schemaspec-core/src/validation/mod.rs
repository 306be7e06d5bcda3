//! Validation errors, paths and configuration shared by the compiler and
//! compiled record types
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;

use serde::{Deserialize, Serialize};

pub use base::{ValidationContext, Violations};
pub use error::{
    Constraint, ParseError, SchemaDefinitionError, ValidationError, ValidationResult, Violation,
};

/// What construction does with keys that no field declares
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Report every undeclared key as an `unknown_field` violation
    #[default]
    Reject,
    /// Drop undeclared keys; they never reach the instance
    Ignore,
}

/// Configuration captured by a record type when it is compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// Policy for undeclared keys in construction input
    pub unknown_fields: UnknownFieldPolicy,
    /// Whether to stop on the first violation or collect all of them
    pub fail_fast: bool,
    /// Maximum number of violations to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl CompileConfig {
    /// Reject unknown fields and collect every violation
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            fail_fast: false,
            max_errors: 0,
        }
    }

    /// Ignore unknown fields and collect every violation
    pub fn lenient() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            ..Self::strict()
        }
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of violations to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_config_defaults() {
        let config = CompileConfig::default();
        assert_eq!(config.unknown_fields, UnknownFieldPolicy::Reject);
        assert!(!config.fail_fast);
        assert_eq!(config.max_errors, 0);
    }

    #[test]
    fn test_compile_config_builders() {
        let config = CompileConfig::strict().with_fail_fast().with_max_errors(5);
        assert!(config.fail_fast);
        assert_eq!(config.max_errors, 5);

        let lenient = CompileConfig::lenient();
        assert_eq!(lenient.unknown_fields, UnknownFieldPolicy::Ignore);
    }
}
