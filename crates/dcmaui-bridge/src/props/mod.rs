mod value;

pub use value::{PropValue, PropertySet};

use thiserror::Error;

/// Failure to turn a serialized payload into the property model.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid script value: {0}")]
    Script(String),
}

/// A decoded property set that does not fit what a component expects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropError {
    #[error("missing required property '{key}'")]
    Missing { key: String },

    #[error("property '{key}' must be a {expected}, got {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("property '{key}' is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

/// Decode a serialized property map. The top-level value must be an object.
pub fn decode_props(payload: &str) -> Result<PropertySet, DecodeError> {
    match serde_json::from_str::<PropValue>(payload)? {
        PropValue::Map(map) => Ok(map),
        other => Err(DecodeError::Shape {
            expected: "an object",
            found: other.type_name(),
        }),
    }
}

/// Decode a serialized list of strings (child ids, event types).
pub fn decode_id_list(payload: &str) -> Result<Vec<String>, DecodeError> {
    let items = match serde_json::from_str::<PropValue>(payload)? {
        PropValue::List(items) => items,
        other => {
            return Err(DecodeError::Shape {
                expected: "a list of strings",
                found: other.type_name(),
            });
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            PropValue::String(s) => Ok(s),
            other => Err(DecodeError::Shape {
                expected: "a string",
                found: other.type_name(),
            }),
        })
        .collect()
}
