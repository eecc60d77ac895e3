//! Input validation and output representations.

pub mod snippet;
pub mod user;

use serde_json::{Map, Value};

use crate::error::{ValidationErrors, NOT_NULL};

pub use snippet::{Mode, SnippetChanges, SnippetRepresentation};
pub use user::{Credentials, Registration, UserRepresentation};

pub(crate) const INVALID_STRING: &str = "Not a valid string.";

/// The payload as an object, or the non-field error every serializer
/// reports for anything else.
pub(crate) fn expect_object(data: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    data.as_object().ok_or_else(|| {
        ValidationErrors::non_field(format!(
            "Invalid data. Expected a dictionary, but got {}.",
            type_name(data)
        ))
    })
}

/// How the value's type is named in client-facing messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Runs `parse` on a present, non-null field and files its error under
/// `name`. Absent fields yield `None` without an error.
pub(crate) fn field<T>(
    object: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
    parse: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
    match object.get(name) {
        None => None,
        Some(Value::Null) => {
            errors.add(name, NOT_NULL);
            None
        }
        Some(value) => match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.add(name, message);
                None
            }
        },
    }
}

/// Text input: strings are trimmed, numbers are taken as their decimal form.
pub(crate) fn string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.trim().to_owned()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(INVALID_STRING.to_owned()),
    }
}
