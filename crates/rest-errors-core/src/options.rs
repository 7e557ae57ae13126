use std::fmt;

use http::StatusCode;
use serde_json::{Map, Value};

use crate::{ConstructError, TraceBoundary};

/// Construction input for [`RestError`](crate::RestError)
///
/// Every field is optional. `cause` and the positional message go to the
/// wrapping step; the rest is the options record layered on top.
#[derive(Debug, Default)]
pub struct ErrorOptions {
    pub(crate) cause: Option<anyhow::Error>,
    pub(crate) args: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) status_code: Option<StatusCode>,
    pub(crate) constructor_opt: Option<TraceBoundary>,
    pub(crate) info: Map<String, Value>,
}

impl ErrorOptions {
    /// Empty options: no cause, no message, no status override
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a prior error as the cause
    #[must_use]
    pub fn cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Positional message built from a template and substitutions
    ///
    /// Used when no explicit [`message`](Self::message) is given.
    #[must_use]
    pub fn format(mut self, args: fmt::Arguments<'_>) -> Self {
        self.args = Some(args.to_string());
        self
    }

    /// Positional message taken verbatim
    #[must_use]
    pub fn args(mut self, message: impl Into<String>) -> Self {
        self.args = Some(message.into());
        self
    }

    /// Explicit message; wins over the positional one when non-empty
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Per-instance status override from a raw code
    ///
    /// `0` leaves the variant default in place. Any other code outside
    /// 100..=999 cannot be held by a [`StatusCode`]; it is dropped with a
    /// warning and the variant default stays. Variants without a default,
    /// such as the base `HttpError`, then report no status. Use
    /// [`ErrorOptions::from_value`] to reject such codes instead.
    #[must_use]
    pub fn status_code(mut self, code: u16) -> Self {
        if code == 0 {
            return self;
        }
        match StatusCode::from_u16(code) {
            Ok(status) => self.status_code = Some(status),
            Err(_) => tracing::warn!(code, "ignoring invalid status code"),
        }
        self
    }

    /// Per-instance status override
    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Hide frames at and below `boundary` from the captured trace
    #[must_use]
    pub fn constructor_opt(mut self, boundary: TraceBoundary) -> Self {
        self.constructor_opt = Some(boundary);
        self
    }

    /// Set the trace boundary unless the caller already chose one
    ///
    /// Variant constructors use this to hide themselves while still letting
    /// deeper wrappers hide more.
    #[must_use]
    pub fn or_constructor_opt(mut self, boundary: TraceBoundary) -> Self {
        self.constructor_opt.get_or_insert(boundary);
        self
    }

    /// Attach an informational field
    #[must_use]
    pub fn info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }

    /// Classify a raw options record
    ///
    /// Recognised keys are `message`, `statusCode`, `constructorOpt` and
    /// `info`. Falsy values count as absent. Unknown keys are kept as info
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, or a recognised key
    /// holds a truthy value of the wrong kind
    pub fn from_value(value: Value) -> Result<Self, ConstructError> {
        let Value::Object(record) = value else {
            return Err(ConstructError::NotARecord {
                found: value_kind(&value),
            });
        };

        let mut options = Self::new();
        let mut extra = Map::new();

        for (key, value) in record {
            match key.as_str() {
                _ if is_falsy(&value) && key != "info" => {}
                "message" => match value {
                    Value::String(message) => options.message = Some(message),
                    _ => {
                        return Err(ConstructError::InvalidOption {
                            field: "message",
                            expected: "a string",
                        });
                    }
                },
                "statusCode" => options.status_code = Some(parse_status(&value)?),
                "constructorOpt" => match value {
                    Value::String(path) => options.constructor_opt = Some(TraceBoundary::named(path)),
                    _ => {
                        return Err(ConstructError::InvalidOption {
                            field: "constructorOpt",
                            expected: "a function path string",
                        });
                    }
                },
                "info" => match value {
                    Value::Object(info) => options.info.extend(info),
                    Value::Null => {}
                    _ => {
                        return Err(ConstructError::InvalidOption {
                            field: "info",
                            expected: "a record",
                        });
                    }
                },
                _ => {
                    extra.insert(key.clone(), value);
                }
            }
        }

        // explicit `info` entries win over loose extras
        for (key, value) in extra {
            options.info.entry(key).or_insert(value);
        }

        Ok(options)
    }
}

fn parse_status(value: &Value) -> Result<StatusCode, ConstructError> {
    value
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ConstructError::InvalidStatusCode {
            value: value.to_string(),
        })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a record",
    }
}
