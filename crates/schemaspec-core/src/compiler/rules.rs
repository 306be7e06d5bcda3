//! Compiled validation rules
//!
//! A rule owns copies of every constraint value it checks. Nothing here points
//! back at the descriptor it was built from.
//!
//! Copyright (c) 2025 Schemaspec Team
//! Licensed under the Apache-2.0 license

use crate::record::RecordType;
use crate::validation::{Constraint, ValidationContext, Violations};
use crate::value::FieldValue;
use serde_json::Value;
use std::sync::Arc;

/// Validation rule for one field or collection element
#[derive(Debug, Clone)]
pub(crate) enum FieldRule {
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Integer {
        min_value: Option<i64>,
        max_value: Option<i64>,
    },
    Enumeration {
        allowed: Arc<[String]>,
    },
    List {
        items: Box<ItemRule>,
    },
}

/// Rule applied to every element of a collection
#[derive(Debug, Clone)]
pub(crate) enum ItemRule {
    Scalar(FieldRule),
    Record(RecordType),
}

impl FieldRule {
    /// Check `value`, returning the validated value or recording violations
    pub(crate) fn apply(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        out: &mut Violations,
    ) -> Option<FieldValue> {
        match self {
            FieldRule::Text {
                min_length,
                max_length,
            } => {
                let Some(text) = value.as_str() else {
                    out.push(ctx.violation(Constraint::WrongType, "a string", Some(value)));
                    return None;
                };
                let length = text.chars().count();
                if let Some(min) = min_length {
                    if length < *min {
                        out.push(ctx.violation(
                            Constraint::MinLength,
                            format!("at least {} characters", min),
                            Some(value),
                        ));
                        return None;
                    }
                }
                if let Some(max) = max_length {
                    if length > *max {
                        out.push(ctx.violation(
                            Constraint::MaxLength,
                            format!("at most {} characters", max),
                            Some(value),
                        ));
                        return None;
                    }
                }
                Some(FieldValue::Text(text.to_string()))
            }
            FieldRule::Integer {
                min_value,
                max_value,
            } => {
                let Some(number) = as_integer(value) else {
                    out.push(ctx.violation(Constraint::WrongType, "an integer", Some(value)));
                    return None;
                };
                if let Some(min) = min_value {
                    if number < *min {
                        out.push(ctx.violation(
                            Constraint::MinValue,
                            format!("a value greater than or equal to {}", min),
                            Some(value),
                        ));
                        return None;
                    }
                }
                if let Some(max) = max_value {
                    if number > *max {
                        out.push(ctx.violation(
                            Constraint::MaxValue,
                            format!("a value less than or equal to {}", max),
                            Some(value),
                        ));
                        return None;
                    }
                }
                Some(FieldValue::Integer(number))
            }
            FieldRule::Enumeration { allowed } => {
                let Some(text) = value.as_str() else {
                    out.push(ctx.violation(Constraint::WrongType, "a string", Some(value)));
                    return None;
                };
                if allowed.iter().any(|candidate| candidate == text) {
                    Some(FieldValue::Text(text.to_string()))
                } else {
                    out.push(ctx.violation(
                        Constraint::EnumMembership,
                        format!("one of: {}", allowed.join(", ")),
                        Some(value),
                    ));
                    None
                }
            }
            FieldRule::List { items } => {
                let Some(elements) = value.as_array() else {
                    out.push(ctx.violation(Constraint::WrongType, "an array", Some(value)));
                    return None;
                };
                let mut accepted = Vec::with_capacity(elements.len());
                let mut failed = false;
                for (index, element) in elements.iter().enumerate() {
                    if out.is_full() {
                        return None;
                    }
                    match items.apply(element, &ctx.child_index(index), out) {
                        Some(item) => accepted.push(item),
                        None => failed = true,
                    }
                }
                if failed {
                    None
                } else {
                    Some(FieldValue::List(accepted))
                }
            }
        }
    }
}

/// Read a JSON number as `i64`, accepting floats with no fractional part
/// (`5.0`, and `-0` which the parser reads as `-0.0`)
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    if !value.is_f64() {
        return None;
    }
    let float = value.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

impl ItemRule {
    fn apply(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        out: &mut Violations,
    ) -> Option<FieldValue> {
        match self {
            ItemRule::Scalar(rule) => rule.apply(value, ctx, out),
            ItemRule::Record(record) => record
                .construct_at(value, ctx, out)
                .map(FieldValue::Record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::CompileConfig;
    use serde_json::json;

    fn run(rule: &FieldRule, value: Value) -> (Option<FieldValue>, Vec<crate::Violation>) {
        let mut out = Violations::new(&CompileConfig::strict());
        let result = rule.apply(&value, &ValidationContext::new().child("f"), &mut out);
        (result, out.into_vec())
    }

    #[test]
    fn test_text_counts_characters_not_bytes() {
        let rule = FieldRule::Text {
            min_length: None,
            max_length: Some(3),
        };
        let (value, violations) = run(&rule, json!("héé"));
        assert_eq!(value, Some(FieldValue::from("héé")));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_integer_rejects_fractional_floats() {
        let rule = FieldRule::Integer {
            min_value: None,
            max_value: None,
        };
        let (value, violations) = run(&rule, json!(2.5));
        assert!(value.is_none());
        assert_eq!(violations[0].constraint, Constraint::WrongType);
    }

    #[test]
    fn test_integer_accepts_integral_floats() {
        let rule = FieldRule::Integer {
            min_value: Some(0),
            max_value: None,
        };
        let (value, violations) = run(&rule, json!(5.0));
        assert_eq!(value, Some(FieldValue::Integer(5)));
        assert!(violations.is_empty());

        let (value, _) = run(&rule, json!(-0.0));
        assert_eq!(value, Some(FieldValue::Integer(0)));
    }

    #[test]
    fn test_integer_rejects_out_of_range_numbers() {
        let rule = FieldRule::Integer {
            min_value: None,
            max_value: None,
        };
        for raw in [json!(10000000000000000000u64), json!(1e30), json!(-1e30)] {
            let (value, violations) = run(&rule, raw);
            assert!(value.is_none());
            assert_eq!(violations[0].constraint, Constraint::WrongType);
        }
    }

    #[test]
    fn test_list_reports_each_bad_element() {
        let rule = FieldRule::List {
            items: Box::new(ItemRule::Scalar(FieldRule::Text {
                min_length: None,
                max_length: Some(2),
            })),
        };
        let (value, violations) = run(&rule, json!(["ok", "long", 3]));
        assert!(value.is_none());
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "$.f[1]");
        assert_eq!(violations[0].constraint, Constraint::MaxLength);
        assert_eq!(violations[1].path, "$.f[2]");
        assert_eq!(violations[1].constraint, Constraint::WrongType);
    }

    #[test]
    fn test_enumeration_lists_allowed_values() {
        let rule = FieldRule::Enumeration {
            allowed: Arc::from(vec!["dog".to_string(), "cat".to_string()]),
        };
        let (_, violations) = run(&rule, json!("hamster"));
        assert_eq!(violations[0].expected, "one of: dog, cat");
        assert_eq!(violations[0].actual, Some(json!("hamster")));
    }
}
