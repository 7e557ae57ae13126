use serde::{Deserialize, Serialize};

/// Serializable error payload sent to clients
///
/// `code` is the error's variant name, not the numeric status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error name
    pub code: String,
    /// Human-readable message, empty when none was given
    pub message: String,
}

impl ErrorBody {
    /// Create a body from a code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
