//! Core HTTP error type
//!
//! Builds a single error value carrying a message, an optional HTTP status,
//! a serializable response body and a filtered stack trace. Named error kinds
//! are [`Variant`]s; [`RestError::new`] is the one constructor they share.

mod body;
mod error;
mod options;
mod rest_error;
pub mod trace;
mod variant;

pub use body::ErrorBody;
pub use error::{ConstructError, HttpError};
pub use options::ErrorOptions;
pub use rest_error::RestError;
pub use trace::{StackTrace, TraceBoundary, TraceFrame, TraceSettings};
pub use variant::{HTTP_ERROR, Variant};
