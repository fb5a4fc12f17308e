use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing,
    WrongType { expected: &'static str },
    Empty,
    TooLong { max: usize, actual: usize },
    UnknownValue {
        value: String,
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing => f.write_str("field required"),
            Violation::WrongType { expected } => write!(f, "expected {expected}"),
            Violation::Empty => f.write_str("must not be empty"),
            Violation::TooLong { max, actual } => {
                write!(f, "at most {max} characters allowed, got {actual}")
            }
            Violation::UnknownValue { value, allowed } => {
                write!(f, "unknown value `{value}`, expected one of {}", allowed.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Path of the offending field, e.g. `blocks[2].role`.
    pub field: String,
    pub violation: Violation,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.violation)
    }
}

/// A schema violation. Lists every offending field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema violation: {}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, violation: Violation) -> Self {
        ValidationError {
            violations: vec![FieldViolation {
                field: field.into(),
                violation,
            }],
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// Re-root every field path under `prefix` (`role` -> `blocks[2].role`).
    pub fn nested(mut self, prefix: &str) -> Self {
        for v in &mut self.violations {
            v.field = if v.field.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}.{}", v.field)
            };
        }
        self
    }
}

/// Bounds on a string field, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub non_empty: bool,
    pub max_chars: Option<usize>,
}

impl Limit {
    pub const fn required(max_chars: usize) -> Self {
        Limit {
            non_empty: true,
            max_chars: Some(max_chars),
        }
    }

    pub const fn non_empty() -> Self {
        Limit {
            non_empty: true,
            max_chars: None,
        }
    }

    pub const fn unbounded() -> Self {
        Limit {
            non_empty: false,
            max_chars: None,
        }
    }

    pub const fn at_most(max_chars: usize) -> Self {
        Limit {
            non_empty: false,
            max_chars: Some(max_chars),
        }
    }

    pub fn check(&self, value: &str) -> Option<Violation> {
        if self.non_empty && value.is_empty() {
            return Some(Violation::Empty);
        }
        if let Some(max) = self.max_chars {
            let actual = value.chars().count();
            if actual > max {
                return Some(Violation::TooLong { max, actual });
            }
        }
        None
    }
}

/// Accumulates field violations; converts to a `ValidationError` at the end.
#[derive(Debug, Default)]
pub struct Violations {
    inner: Vec<FieldViolation>,
}

impl Violations {
    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        self.inner.push(FieldViolation {
            field: field.into(),
            violation,
        });
    }

    pub fn check(&mut self, field: &str, value: &str, limit: Limit) {
        if let Some(violation) = limit.check(value) {
            self.push(field, violation);
        }
    }

    pub fn check_optional(&mut self, field: &str, value: Option<&str>, limit: Limit) {
        if let Some(value) = value {
            self.check(field, value, limit);
        }
    }

    pub fn absorb(&mut self, error: ValidationError) {
        self.inner.extend(error.violations);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.inner.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.inner,
            })
        }
    }
}

/// Reads typed fields off an untyped JSON object, recording every violation.
///
/// Accessors return placeholder values on failure so a caller can keep reading
/// and report all offending fields from `finish`.
pub(crate) struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    violations: Violations,
}

impl<'a> FieldReader<'a> {
    pub fn object(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(object) => Ok(FieldReader {
                object,
                violations: Violations::default(),
            }),
            _ => Err(ValidationError::single(
                "",
                Violation::WrongType { expected: "object" },
            )),
        }
    }

    pub fn required_str(&mut self, field: &str, limit: Limit) -> &'a str {
        let object = self.object;
        match object.get(field) {
            None | Some(Value::Null) => {
                self.violations.push(field, Violation::Missing);
                ""
            }
            Some(Value::String(s)) => {
                self.violations.check(field, s, limit);
                s
            }
            Some(_) => {
                self.violations
                    .push(field, Violation::WrongType { expected: "string" });
                ""
            }
        }
    }

    /// Absent and `null` both read as `None`.
    pub fn optional_str(&mut self, field: &str, limit: Limit) -> Option<&'a str> {
        let object = self.object;
        match object.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                self.violations.check(field, s, limit);
                Some(s)
            }
            Some(_) => {
                self.violations
                    .push(field, Violation::WrongType { expected: "string" });
                None
            }
        }
    }

    /// Absent and `null` both read as an empty slice.
    pub fn optional_array(&mut self, field: &str) -> &'a [Value] {
        let object = self.object;
        match object.get(field) {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.violations
                    .push(field, Violation::WrongType { expected: "array" });
                &[]
            }
        }
    }

    pub fn violations(&mut self) -> &mut Violations {
        &mut self.violations
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        self.violations.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn limit_counts_characters_not_bytes() {
        let limit = Limit::required(3);
        assert_eq!(limit.check("אבג"), None);
        assert_eq!(
            limit.check("אבגד"),
            Some(Violation::TooLong { max: 3, actual: 4 })
        );
        assert_eq!(limit.check(""), Some(Violation::Empty));
    }

    #[test]
    fn reader_collects_all_violations() {
        let value = json!({ "name": 7, "description": null });
        let mut reader = FieldReader::object(&value).unwrap();
        assert_eq!(reader.required_str("name", Limit::required(10)), "");
        assert_eq!(reader.optional_str("description", Limit::at_most(10)), None);
        assert_eq!(reader.required_str("title", Limit::required(10)), "");

        let err = reader.finish().unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("title"));
        assert!(!err.has_field("description"));
    }

    #[test]
    fn nested_rewrites_paths() {
        let err = ValidationError::single("role", Violation::Empty).nested("blocks[2]");
        assert!(err.has_field("blocks[2].role"));

        let err = ValidationError::single("", Violation::WrongType { expected: "object" })
            .nested("blocks[0]");
        assert!(err.has_field("blocks[0]"));
    }
}
