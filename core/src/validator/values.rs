//! Enumerated-value validators

use serde_json::Value;

use super::TypeConstraints;
use crate::error::RuleViolation;

/// Render a value the way it appears in messages: lists joined by commas
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// String tokens of a scalar-or-list value; non-string entries are skipped
#[must_use]
pub fn tokens(value: &Value) -> Vec<&str> {
    match value {
        Value::String(text) => vec![text.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn owned(values: &[impl AsRef<str>]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_string()).collect()
}

/// The value must be a single string equal to one of `allowed`
///
/// # Errors
///
/// Returns `RuleViolation::NotOneOf` for any other value, lists included.
pub fn one_of(allowed: &[impl AsRef<str>], value: &Value) -> Result<(), RuleViolation> {
    match value.as_str() {
        Some(text) if allowed.iter().any(|a| a.as_ref() == text) => Ok(()),
        _ => Err(RuleViolation::NotOneOf {
            value: display_value(value),
            allowed: owned(allowed),
        }),
    }
}

/// The value, or at least one element of it, must be in `allowed`
///
/// # Errors
///
/// Returns `RuleViolation::NoneOf` when no element matches.
pub fn at_least_one_of(allowed: &[impl AsRef<str>], value: &Value) -> Result<(), RuleViolation> {
    let matched = tokens(value)
        .into_iter()
        .any(|token| allowed.iter().any(|a| a.as_ref() == token));
    if matched {
        Ok(())
    } else {
        Err(RuleViolation::NoneOf {
            value: display_value(value),
            allowed: owned(allowed),
        })
    }
}

/// Every entry of `required` must be present in the value
///
/// # Errors
///
/// Returns `RuleViolation::MissingRequired` when any entry is absent.
pub fn contains(required: &[impl AsRef<str>], value: &Value) -> Result<(), RuleViolation> {
    let present = tokens(value);
    if required
        .iter()
        .all(|needed| present.contains(&needed.as_ref()))
    {
        Ok(())
    } else {
        Err(RuleViolation::MissingRequired {
            value: display_value(value),
            required: owned(required),
        })
    }
}

/// Check a `type` value against the constraints of the model being validated
///
/// A non-empty allowed list means the type must be exactly one of it;
/// otherwise a non-empty required list must be fully contained.
///
/// # Errors
///
/// Returns the violation raised by [`one_of`] or [`contains`].
pub fn type_checker(subject: &dyn TypeConstraints, value: &Value) -> Result<(), RuleViolation> {
    let allowed = subject.allowed_types();
    if !allowed.is_empty() {
        return one_of(allowed, value);
    }
    let required = subject.required_types();
    if !required.is_empty() {
        return contains(required, value);
    }
    Ok(())
}
