use rest_errors_core::{ErrorBody, RestError, StackTrace};
use serde::Serialize;
use serde_json::{Map, Value};

/// Structured view of an error for logs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub name: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_code: Option<&'static str>,
    pub body: ErrorBody,
    /// Info merged across the cause chain
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub info: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackTrace>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<CauseReport>,
}

/// One error below the reported one
#[derive(Debug, Serialize)]
pub struct CauseReport {
    /// Variant name, for causes that are themselves `RestError`s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub message: String,
}

impl ErrorReport {
    pub fn new(error: &RestError) -> Self {
        let causes = error
            .causes()
            .map(|cause| match cause.downcast_ref::<RestError>() {
                Some(rest) => CauseReport {
                    name: Some(rest.name()),
                    message: rest.message().to_owned(),
                },
                None => CauseReport {
                    name: None,
                    message: cause.to_string(),
                },
            })
            .collect();

        Self {
            name: error.name(),
            message: error.message().to_owned(),
            status_code: error.status_code().map(|s| s.as_u16()),
            rest_code: error.variant().rest_code(),
            body: error.body().clone(),
            info: error.info_chain(),
            stack: error.trace().cloned(),
            causes,
        }
    }
}

impl From<&RestError> for ErrorReport {
    fn from(error: &RestError) -> Self {
        Self::new(error)
    }
}

/// Log an error with its report attached
///
/// Client errors log at `warn`; server errors and errors without a status
/// log at `error`.
pub fn log_error(error: &RestError) {
    let status = error.status_code();
    let report = serde_json::to_string(&ErrorReport::new(error)).unwrap_or_default();

    match status {
        Some(status) if !status.is_server_error() => tracing::warn!(
            name = error.name(),
            status = status.as_u16(),
            report = %report,
            "{error:#}"
        ),
        _ => tracing::error!(
            name = error.name(),
            status = status.map(|s| s.as_u16()),
            report = %report,
            "{error:#}"
        ),
    }
}
