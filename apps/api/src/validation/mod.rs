/// Shared field-level validation machinery.
///
/// Schemas walk a raw `serde_json::Value` with a [`Checker`], which records one
/// [`FieldError`] per violated field instead of stopping at the first problem.
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A single violated field. `field` is the dot-joined key path, e.g.
/// `results.0.location.postcode`. The root of the document has an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// One or more fields failed validation. Errors keep the order in which the
/// schema visited the fields.
#[derive(Debug, Clone, Error)]
#[error("{} field(s) failed validation", errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }
}

/// Location of a value inside the document being validated.
#[derive(Debug, Clone, Default)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: impl fmt::Display) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Type name used in "Expected X, received Y" messages. A missing value is
/// reported as `undefined`.
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Accumulates field errors while a schema walks a document.
///
/// Each accessor returns `None` when the value at `path` is unusable and has
/// already recorded why, so callers can keep visiting sibling fields.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: path.to_string(),
            message: message.into(),
        });
    }

    pub fn type_mismatch(&mut self, path: &FieldPath, expected: &str, value: Option<&Value>) {
        match value {
            None => self.fail(path, "Required"),
            Some(v) => self.fail(
                path,
                format!("Expected {expected}, received {}", type_name(Some(v))),
            ),
        }
    }

    pub fn object<'v>(
        &mut self,
        value: Option<&'v Value>,
        path: &FieldPath,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Some(Value::Object(map)) => Some(map),
            other => {
                self.type_mismatch(path, "object", other);
                None
            }
        }
    }

    pub fn array<'v>(&mut self, value: Option<&'v Value>, path: &FieldPath) -> Option<&'v [Value]> {
        match value {
            Some(Value::Array(items)) => Some(items),
            other => {
                self.type_mismatch(path, "array", other);
                None
            }
        }
    }

    pub fn string(&mut self, value: Option<&Value>, path: &FieldPath) -> Option<String> {
        match value {
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                self.type_mismatch(path, "string", other);
                None
            }
        }
    }

    /// Looks up `key` in `parent` and requires a string there.
    pub fn string_field(
        &mut self,
        parent: &Map<String, Value>,
        key: &str,
        path: &FieldPath,
    ) -> Option<String> {
        self.string(parent.get(key), &path.key(key))
    }

    /// Yields `value` only if nothing was recorded. A missing value with no
    /// recorded error is a schema bug and is reported at the root.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationFailure> {
        match value {
            Some(v) if self.errors.is_empty() => Ok(v),
            None if self.errors.is_empty() => Err(ValidationFailure::single("", "Invalid input")),
            _ => Err(ValidationFailure {
                errors: self.errors,
            }),
        }
    }
}
