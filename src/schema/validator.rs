//! Item payload validator
//!
//! Validation semantics:
//! - Payload must be a JSON object
//! - `title` (or `name`) is required and must be a non-empty string
//! - `description` is an optional string, `null` means absent
//! - `done` (or `completed`) is an optional boolean, default false
//! - No implicit type coercion
//! - `id` and undeclared fields are ignored
//!
//! Every offending field is reported, not only the first one.

use serde_json::{Map, Value};

use super::errors::{FieldError, ValidationError, ValidationResult};
use super::types::{ItemInput, ALIAS_DONE, ALIAS_TITLE, FIELD_DESCRIPTION, FIELD_DONE, FIELD_TITLE};

/// Field name used when the payload itself is malformed
pub const BODY_FIELD: &str = "$body";

/// Validates an inbound item payload.
///
/// The same rules apply to create and update.
///
/// # Errors
///
/// Returns a `ValidationError` naming each field that is missing, empty or
/// of the wrong type.
pub fn validate_item(payload: &Value) -> ValidationResult<ItemInput> {
    let obj = payload.as_object().ok_or_else(|| {
        FieldError::type_mismatch(BODY_FIELD, "object", json_type_name(payload))
    })?;

    let mut errors = Vec::new();

    let title = match lookup(obj, FIELD_TITLE, ALIAS_TITLE) {
        None => {
            errors.push(FieldError::missing(FIELD_TITLE));
            None
        }
        Some((key, Value::String(s))) => {
            if s.trim().is_empty() {
                errors.push(FieldError::empty(key));
                None
            } else {
                Some(s.clone())
            }
        }
        Some((key, other)) => {
            errors.push(FieldError::type_mismatch(key, "string", json_type_name(other)));
            None
        }
    };

    let description = match obj.get(FIELD_DESCRIPTION) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::type_mismatch(
                FIELD_DESCRIPTION,
                "string",
                json_type_name(other),
            ));
            None
        }
    };

    let done = match lookup(obj, FIELD_DONE, ALIAS_DONE) {
        None => false,
        Some((_, Value::Bool(b))) => *b,
        Some((key, other)) => {
            errors.push(FieldError::type_mismatch(key, "boolean", json_type_name(other)));
            false
        }
    };

    match title {
        Some(title) if errors.is_empty() => Ok(ItemInput {
            title,
            description,
            done,
        }),
        _ => Err(ValidationError::new(errors)),
    }
}

/// Finds a field by canonical name, falling back to its alias.
///
/// Returns the key that was actually present so errors name what the client sent.
fn lookup<'a>(
    obj: &'a Map<String, Value>,
    name: &'static str,
    alias: &'static str,
) -> Option<(&'static str, &'a Value)> {
    obj.get(name)
        .map(|v| (name, v))
        .or_else(|| obj.get(alias).map(|v| (alias, v)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
