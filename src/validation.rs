//! Validation rules for the order status form and the field-error map both
//! client and server errors are funnelled into.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern")
});

pub const NAME_REQUIRED: &str = "form:error-name-required";
pub const SERIAL_NOT_A_NUMBER: &str = "form:error-serial-number";
pub const SERIAL_MIN: &str = "form:error-serial-min";
pub const COLOR_INVALID: &str = "form:error-color-invalid";

/// Values that passed (or are about to be checked against) the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct FormValues {
    #[validate(length(min = 1, message = "form:error-name-required"))]
    pub name: String,
    #[validate(range(min = 1, message = "form:error-serial-min"))]
    pub serial: i64,
    #[validate(regex(path = *HEX_COLOR, message = "form:error-color-invalid"))]
    pub color: String,
}

/// The inputs of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Serial,
    Color,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Serial, Field::Color];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Serial => "serial",
            Field::Color => "color",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Error messages per known field. Iteration always follows `Field::ALL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<Field, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.messages.entry(field).or_default().push(message.into());
    }

    pub fn first(&self, field: Field) -> Option<&str> {
        self.messages
            .get(&field)
            .and_then(|m| m.first())
            .map(String::as_str)
    }

    pub fn clear(&mut self, field: Field) {
        self.messages.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.messages.iter().map(|(f, m)| (*f, m.as_slice()))
    }

    /// Read a server rejection body. Accepts `{"name": ["..."]}` or the same
    /// map nested under `"errors"`. Returns `None` unless at least one known
    /// field carries a message.
    pub fn from_server_body(body: &Value) -> Option<Self> {
        let map = match body.get("errors") {
            Some(Value::Object(nested)) => nested,
            _ => body.as_object()?,
        };

        let mut errors = Self::new();
        for (key, value) in map {
            let Some(field) = Field::from_key(key) else {
                if key != "message" {
                    tracing::warn!(key = %key, "ignoring error for unknown field");
                }
                continue;
            };
            match value {
                Value::Array(items) => {
                    for msg in items.iter().filter_map(Value::as_str) {
                        errors.push(field, msg);
                    }
                }
                Value::String(msg) => errors.push(field, msg.as_str()),
                _ => {}
            }
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = Self::new();
        for (key, list) in errors.field_errors() {
            let Some(field) = Field::from_key(&key) else {
                continue;
            };
            for err in list.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(field, message);
            }
        }
        out
    }
}

/// Build `FormValues` from the raw input buffers and run the schema over them.
/// A serial that is not an integer fails here, before the schema runs.
pub fn validate_inputs(name: &str, serial: &str, color: &str) -> Result<FormValues, FieldErrors> {
    let mut errors = FieldErrors::new();

    let serial = match serial.trim().parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            errors.push(Field::Serial, SERIAL_NOT_A_NUMBER);
            // keeps the range rule from reporting a second serial error
            1
        }
    };

    let values = FormValues {
        name: name.trim().to_string(),
        serial,
        color: color.trim().to_string(),
    };

    if let Err(schema) = values.validate() {
        for (field, messages) in FieldErrors::from(&schema).iter() {
            for msg in messages {
                errors.push(field, msg.as_str());
            }
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}
