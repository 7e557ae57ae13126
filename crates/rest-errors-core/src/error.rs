use http::StatusCode;
use thiserror::Error;

use crate::ErrorBody;

/// Trait for domain errors that can be rendered as HTTP responses
///
/// [`RestError`](crate::RestError) implements it, and feature crates can
/// implement it for their own error enums to get the same body shape. The
/// transport layer turns these into actual responses.
pub trait HttpError: std::error::Error {
    /// HTTP status code, if one is known for this error
    fn status_code(&self) -> Option<StatusCode>;

    /// Machine-readable error code (e.g. `NotFoundError`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Response payload built from the code and client message
    fn response_body(&self) -> ErrorBody {
        ErrorBody::new(self.error_type(), self.client_message())
    }
}

/// Malformed construction input
#[derive(Debug, Error)]
pub enum ConstructError {
    /// Options were not a JSON object
    #[error("error options must be a record, got {found}")]
    NotARecord { found: &'static str },

    /// An option had the wrong type
    #[error("invalid option `{field}`: expected {expected}")]
    InvalidOption {
        /// Option name as it appears in the record
        field: &'static str,
        /// Description of the accepted values
        expected: &'static str,
    },

    /// `statusCode` was truthy but not a valid HTTP status
    #[error("invalid status code: {value}")]
    InvalidStatusCode { value: String },
}
